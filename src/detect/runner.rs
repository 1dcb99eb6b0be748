//! Check runner that orchestrates all phases.

use std::path::{Path, PathBuf};

use crate::template::Template;

use super::{detect_missing_files, detect_missing_sections, PhaseResult, StyleChecker};

/// Executes the three check phases against a repository root.
pub struct Runner {
    base_dir: PathBuf,
    max_line_length: usize,
}

/// Per-phase error counts of a complete run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub style: usize,
    pub structure: usize,
    pub readme: usize,
}

impl CheckSummary {
    pub fn total(&self) -> usize {
        self.style + self.structure + self.readme
    }

    pub fn passed(&self) -> bool {
        self.total() == 0
    }
}

impl Runner {
    /// Create a new runner for the given root.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            max_line_length: super::style::DEFAULT_MAX_LINE_LENGTH,
        }
    }

    /// Set the line-length threshold for the style phase.
    pub fn max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// Style phase.
    pub fn run_style(&self) -> anyhow::Result<PhaseResult> {
        let checker = StyleChecker::new(self.max_line_length)?;
        let report = checker.check_tree(&self.base_dir)?;
        Ok(report.into_phase_result())
    }

    /// Directory-structure phase.
    pub fn run_structure(&self, template: &Template) -> PhaseResult {
        detect_missing_files(&self.base_dir, &template.required_entries)
    }

    /// README phase.
    pub fn run_readme(&self, template: &Template) -> anyhow::Result<PhaseResult> {
        detect_missing_sections(
            &self.base_dir,
            &template.readme_file,
            &template.readme_sections,
        )
    }

    /// Run every phase in order, handing each result to `on_phase` as soon
    /// as it is available. A failing phase never skips the next one.
    pub fn run<F>(&self, template: &Template, mut on_phase: F) -> anyhow::Result<CheckSummary>
    where
        F: FnMut(&PhaseResult),
    {
        tracing::info!(
            root = %self.base_dir.display(),
            max_line_length = self.max_line_length,
            template = %template.name,
            "running checks"
        );

        let style = self.run_style()?;
        on_phase(&style);

        let structure = self.run_structure(template);
        on_phase(&structure);

        let readme = self.run_readme(template)?;
        on_phase(&readme);

        Ok(CheckSummary {
            style: style.error_count,
            structure: structure.error_count,
            readme: readme.error_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::Phase;
    use tempfile::TempDir;

    fn conforming_repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::create_dir_all(root.join("data")).unwrap();
        std::fs::write(
            root.join("README.md"),
            "# Project\n## Data\nInputs.\n## Reference\nPaper.\n## Setup\npip install\n",
        )
        .unwrap();
        std::fs::write(root.join(".gitignore"), "*.pyc\n").unwrap();
        std::fs::write(root.join("LICENSE"), "MIT\n").unwrap();
        std::fs::write(root.join("requirements.txt"), "numpy\n").unwrap();
        std::fs::write(root.join("main.py"), "print('hi')\n").unwrap();
        std::fs::write(root.join("src/__init__.py"), "").unwrap();
        temp
    }

    #[test]
    fn test_runner_conforming_repo() {
        let temp = conforming_repo();
        let mut phases = Vec::new();

        let summary = Runner::new(temp.path())
            .run(&Template::standard(), |p| phases.push(p.phase))
            .unwrap();

        assert!(summary.passed());
        assert_eq!(phases, vec![Phase::Style, Phase::Structure, Phase::Readme]);
    }

    #[test]
    fn test_runner_uses_line_length() {
        let temp = conforming_repo();
        std::fs::write(temp.path().join("main.py"), format!("x = '{}'\n", "a".repeat(90))).unwrap();

        let template = Template::standard();
        let relaxed = Runner::new(temp.path()).run(&template, |_| {}).unwrap();
        let strict = Runner::new(temp.path())
            .max_line_length(80)
            .run(&template, |_| {})
            .unwrap();

        assert_eq!(relaxed.style, 0);
        assert_eq!(strict.style, 1);
    }

    #[test]
    fn test_failing_phase_does_not_skip_later_phases() {
        let temp = conforming_repo();
        std::fs::remove_file(temp.path().join("LICENSE")).unwrap();
        std::fs::remove_file(temp.path().join("README.md")).unwrap();
        std::fs::write(temp.path().join("main.py"), "x = 1 \n").unwrap();

        let mut seen = 0;
        let summary = Runner::new(temp.path())
            .run(&Template::standard(), |_| seen += 1)
            .unwrap();

        assert_eq!(seen, 3);
        assert_eq!(summary.style, 1);
        assert_eq!(summary.structure, 2);
        assert_eq!(summary.readme, 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_checks_do_not_modify_repo() {
        let temp = conforming_repo();
        let before: Vec<_> = walkdir::WalkDir::new(temp.path())
            .sort_by_file_name()
            .into_iter()
            .map(|e| e.unwrap().path().to_path_buf())
            .collect();

        Runner::new(temp.path())
            .run(&Template::standard(), |_| {})
            .unwrap();

        let after: Vec<_> = walkdir::WalkDir::new(temp.path())
            .sort_by_file_name()
            .into_iter()
            .map(|e| e.unwrap().path().to_path_buf())
            .collect();
        assert_eq!(before, after);
    }
}
