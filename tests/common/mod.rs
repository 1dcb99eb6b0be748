//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::Path;
use tempfile::TempDir;

pub const COMPLETE_README: &str =
    "# Project\n\n## Data\nWhere the data lives.\n\n## Reference\nCite us.\n\n## Setup\npip install -r requirements.txt\n";

/// A repository that satisfies every template requirement.
pub fn conforming_repo() -> TempDir {
    let temp = TempDir::new().expect("should create temp dir");
    let root = temp.path();

    std::fs::create_dir_all(root.join("src")).unwrap();
    std::fs::create_dir_all(root.join("data")).unwrap();
    write(root, "README.md", COMPLETE_README);
    write(root, ".gitignore", "__pycache__/\n");
    write(root, "LICENSE", "MIT License\n");
    write(root, "requirements.txt", "numpy\n");
    write(root, "main.py", "from src import run\n\nrun()\n");
    write(root, "src/__init__.py", "def run():\n    return 0\n");

    temp
}

pub fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}
