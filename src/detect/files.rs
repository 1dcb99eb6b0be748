//! Detection of missing required files and directories.

use std::path::Path;

use crate::template::{EntryKind, RequiredEntry};

use super::{Finding, FindingRule, Outcome, Phase, PhaseResult};

/// Check whether a single required entry exists under `base_dir`.
///
/// Absence is a normal outcome, never an error. A directory entry that
/// resolves to a regular file counts as missing.
pub fn check_exists<P: AsRef<Path>>(base_dir: P, entry: &RequiredEntry) -> Outcome {
    let full_path = base_dir.as_ref().join(entry.relative_path());
    let present = match entry.kind {
        EntryKind::Directory => full_path.is_dir(),
        EntryKind::File => full_path.exists(),
    };

    if present {
        Outcome::Found
    } else {
        tracing::debug!(path = %full_path.display(), "required entry is absent");
        Outcome::Missing
    }
}

/// Check every required entry, one error per absent entry.
pub fn detect_missing_files<P: AsRef<Path>>(base_dir: P, entries: &[RequiredEntry]) -> PhaseResult {
    let base = base_dir.as_ref();
    let mut result = PhaseResult::new(Phase::Structure);

    for entry in entries {
        result.record(check_exists(base, entry), || missing_file(&entry.path));
    }

    result
}

/// Finding reported for an absent entry.
pub(crate) fn missing_file(name: &str) -> Finding {
    Finding {
        rule: FindingRule::MissingFile,
        message: format!("File missing: {}", name),
        file: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Template, REQUIRED_ENTRIES};
    use tempfile::TempDir;

    fn entries(raw: &[&str]) -> Vec<RequiredEntry> {
        raw.iter().map(|r| RequiredEntry::parse(r)).collect()
    }

    fn scaffold(root: &Path, skip: &[&str]) {
        for raw in REQUIRED_ENTRIES {
            if skip.contains(raw) {
                continue;
            }
            let path = root.join(raw.trim_end_matches('/'));
            if raw.ends_with('/') {
                std::fs::create_dir_all(&path).unwrap();
            } else {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).unwrap();
                }
                std::fs::write(&path, "").unwrap();
            }
        }
    }

    #[test]
    fn test_check_exists() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("exists.txt"), "content").unwrap();

        let found = check_exists(temp.path(), &RequiredEntry::parse("exists.txt"));
        let missing = check_exists(temp.path(), &RequiredEntry::parse("missing.txt"));

        assert_eq!(found, Outcome::Found);
        assert_eq!(missing, Outcome::Missing);
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("data"), "not a dir").unwrap();

        let outcome = check_exists(temp.path(), &RequiredEntry::parse("data/"));
        assert_eq!(outcome, Outcome::Missing);
    }

    #[test]
    fn test_complete_tree_has_no_errors() {
        let temp = TempDir::new().unwrap();
        scaffold(temp.path(), &[]);

        let result = detect_missing_files(temp.path(), &Template::standard().required_entries);
        assert_eq!(result.error_count, 0);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_one_error_per_missing_entry() {
        let temp = TempDir::new().unwrap();
        scaffold(temp.path(), &["LICENSE", ".gitignore"]);

        let result = detect_missing_files(temp.path(), &Template::standard().required_entries);
        assert_eq!(result.error_count, 2);

        let messages: Vec<_> = result.findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, vec!["File missing: .gitignore", "File missing: LICENSE"]);
    }

    #[test]
    fn test_count_is_order_independent() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a"), "").unwrap();

        let forward = detect_missing_files(temp.path(), &entries(&["a", "b", "c/"]));
        let backward = detect_missing_files(temp.path(), &entries(&["c/", "b", "a"]));
        assert_eq!(forward.error_count, 2);
        assert_eq!(forward.error_count, backward.error_count);
    }
}
