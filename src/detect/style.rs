//! Code style audit over Python sources.
//!
//! Runs a pycodestyle-compatible subset of physical-line checks. Logical-line
//! and statement codes (E1xx-E4xx, E7xx, W6xx) are not covered, so a file
//! such as `import os,sys` passes here even though pycodestyle reports E401.
//! - E501: line too long
//! - W191: indentation contains tabs
//! - W291 / W293: trailing whitespace, whitespace on blank line
//! - W292 / W391: missing final newline, blank line at end of file

use anyhow::Context;
use globset::{Glob, GlobMatcher};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{Finding, FindingRule, Phase, PhaseResult};

/// Default maximum line length.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 120;

/// Glob for the files the audit covers.
const SOURCE_GLOB: &str = "**/*.py";

/// A single style violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleViolation {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for StyleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} {}",
            self.file, self.line, self.column, self.code, self.message
        )
    }
}

/// One row of the statistics summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistic {
    pub count: usize,
    pub code: &'static str,
    /// Message of the first violation seen with this code.
    pub message: String,
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<7} {} {}", self.count, self.code, self.message)
    }
}

/// Outcome of auditing a tree.
#[derive(Debug, Clone, Default)]
pub struct StyleReport {
    pub violations: Vec<StyleViolation>,
    pub files_checked: usize,
}

impl StyleReport {
    /// Total number of violations.
    pub fn count(&self) -> usize {
        self.violations.len()
    }

    /// Counts per code, sorted by code.
    pub fn statistics(&self) -> Vec<Statistic> {
        let mut by_code: BTreeMap<&'static str, Statistic> = BTreeMap::new();
        for v in &self.violations {
            by_code
                .entry(v.code)
                .and_modify(|s| s.count += 1)
                .or_insert_with(|| Statistic {
                    count: 1,
                    code: v.code,
                    message: v.message.clone(),
                });
        }
        by_code.into_values().collect()
    }

    /// Convert into a phase result for uniform reporting.
    pub fn into_phase_result(self) -> PhaseResult {
        let mut result = PhaseResult::new(Phase::Style);
        result.statistics = self.statistics();
        result.error_count = self.count();
        result.findings = self
            .violations
            .iter()
            .map(|v| Finding {
                rule: FindingRule::Style,
                message: v.to_string(),
                file: v.file.clone(),
            })
            .collect();
        result
    }
}

/// Line-length and whitespace auditor.
pub struct StyleChecker {
    max_line_length: usize,
    matcher: GlobMatcher,
}

impl StyleChecker {
    pub fn new(max_line_length: usize) -> anyhow::Result<Self> {
        let matcher = Glob::new(SOURCE_GLOB)
            .with_context(|| format!("compiling source glob {:?}", SOURCE_GLOB))?
            .compile_matcher();
        Ok(Self {
            max_line_length,
            matcher,
        })
    }

    /// Audit every source file under `root`.
    pub fn check_tree(&self, root: &Path) -> anyhow::Result<StyleReport> {
        let mut report = StyleReport::default();

        for path in self.collect_files(root)? {
            let display = path
                .strip_prefix(root)
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_else(|_| path.to_string_lossy().to_string());

            let content = std::fs::read(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let content = String::from_utf8_lossy(&content);

            report
                .violations
                .extend(self.check_source(&display, &content));
            report.files_checked += 1;
        }

        tracing::debug!(
            files = report.files_checked,
            violations = report.count(),
            "style audit finished"
        );
        Ok(report)
    }

    /// Find source files, skipping hidden files and directories.
    fn collect_files(&self, root: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if self.matcher.is_match(relative) {
                files.push(entry.path().to_path_buf());
            }
        }

        Ok(files)
    }

    /// Run the physical-line checks on one file's content.
    pub fn check_source(&self, file: &str, content: &str) -> Vec<StyleViolation> {
        let mut violations = Vec::new();
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let total = lines.len();

        let mut push = |line: usize, offset: usize, code: &'static str, message: String| {
            violations.push(StyleViolation {
                file: file.to_string(),
                line,
                column: offset + 1,
                code,
                message,
            });
        };

        for (idx, raw) in lines.iter().enumerate() {
            let line_number = idx + 1;
            let line = raw.trim_end_matches('\n').trim_end_matches('\r');

            let indent_len = line.len() - line.trim_start_matches([' ', '\t']).len();
            if let Some(tab) = line[..indent_len].find('\t') {
                push(line_number, tab, "W191", "indentation contains tabs".to_string());
            }

            let without_ff = line.trim_end_matches('\x0c');
            let stripped = without_ff.trim_end_matches([' ', '\t', '\x0b']);
            if stripped.len() != without_ff.len() {
                if stripped.is_empty() {
                    push(line_number, 0, "W293", "whitespace on blank line".to_string());
                } else {
                    push(
                        line_number,
                        stripped.chars().count(),
                        "W291",
                        "trailing whitespace".to_string(),
                    );
                }
            }

            if let Some(length) = self.overlong(line) {
                push(
                    line_number,
                    self.max_line_length,
                    "E501",
                    format!(
                        "line too long ({} > {} characters)",
                        length, self.max_line_length
                    ),
                );
            }

            if line_number == total {
                if line.len() == raw.len() {
                    push(
                        line_number,
                        line.chars().count(),
                        "W292",
                        "no newline at end of file".to_string(),
                    );
                } else if line.is_empty() {
                    push(line_number, 0, "W391", "blank line at end of file".to_string());
                }
            }
        }

        violations
    }

    /// Length of the line when it is too long and not exempt.
    fn overlong(&self, line: &str) -> Option<usize> {
        let length = line.trim_end().chars().count();
        if length <= self.max_line_length {
            return None;
        }
        if line.to_lowercase().contains("# noqa") {
            return None;
        }

        // Long URLs in a comment of their own are allowed.
        let chunks: Vec<&str> = line.split_whitespace().collect();
        if chunks.len() == 2 && chunks[0] == "#" {
            let prefix = line.chars().count() - chunks[1].chars().count();
            if prefix < self.max_line_length.saturating_sub(7) {
                return None;
            }
        }

        Some(length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn codes(violations: &[StyleViolation]) -> Vec<&'static str> {
        violations.iter().map(|v| v.code).collect()
    }

    #[test]
    fn test_line_too_long() {
        let checker = StyleChecker::new(10).unwrap();
        let violations = checker.check_source("a.py", "x = 1\nvalue = 123456789\n");

        assert_eq!(codes(&violations), vec!["E501"]);
        assert_eq!(violations[0].line, 2);
        assert_eq!(violations[0].column, 11);
        assert_eq!(violations[0].message, "line too long (17 > 10 characters)");
    }

    #[test]
    fn test_exact_length_is_allowed() {
        let checker = StyleChecker::new(5).unwrap();
        assert!(checker.check_source("a.py", "x = 1\n").is_empty());
    }

    #[test]
    fn test_noqa_and_url_comments_are_exempt() {
        let checker = StyleChecker::new(20).unwrap();
        let source = "x = 'aaaaaaaaaaaaaaaaaaaaaa'  # noqa\n# https://example.org/a/very/long/link\n";
        assert!(checker.check_source("a.py", source).is_empty());
    }

    #[test]
    fn test_whitespace_checks() {
        let checker = StyleChecker::new(DEFAULT_MAX_LINE_LENGTH).unwrap();
        let source = "def f():\n\treturn 1 \n   \nx = 2";
        let violations = checker.check_source("a.py", source);

        assert_eq!(codes(&violations), vec!["W191", "W291", "W293", "W292"]);
        assert_eq!(violations[1].column, 10);
        assert_eq!(violations[3].line, 4);
    }

    #[test]
    fn test_blank_line_at_end_of_file() {
        let checker = StyleChecker::new(DEFAULT_MAX_LINE_LENGTH).unwrap();
        let violations = checker.check_source("a.py", "x = 1\n\n");
        assert_eq!(codes(&violations), vec!["W391"]);
        assert_eq!(violations[0].line, 2);
    }

    #[test]
    fn test_empty_file_is_clean() {
        let checker = StyleChecker::new(DEFAULT_MAX_LINE_LENGTH).unwrap();
        assert!(checker.check_source("a.py", "").is_empty());
    }

    #[test]
    fn test_only_physical_line_codes_are_checked() {
        let checker = StyleChecker::new(120).unwrap();
        let source = "import os,sys
x=1;y=2
";
        assert!(checker.check_source("a.py", source).is_empty());
    }

    #[test]
    fn test_statistics_group_by_code() {
        let checker = StyleChecker::new(5).unwrap();
        let report = StyleReport {
            violations: checker.check_source("a.py", "long line one\nlong line two\nok \n"),
            files_checked: 1,
        };

        let stats = report.statistics();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].code, "E501");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].message, "line too long (13 > 5 characters)");
        assert_eq!(stats[1].code, "W291");
        assert_eq!(stats[0].to_string(), "2       E501 line too long (13 > 5 characters)");
    }

    #[test]
    fn test_check_tree_skips_hidden_and_non_python() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("src/pkg")).unwrap();
        std::fs::create_dir_all(root.join(".venv")).unwrap();
        std::fs::write(root.join("main.py"), "x = 1\n").unwrap();
        std::fs::write(root.join("src/pkg/mod.py"), "y = 'a very long line indeed'\n").unwrap();
        std::fs::write(root.join(".venv/lib.py"), "z = 'another very long line'\n").unwrap();
        std::fs::write(root.join("notes.txt"), "this text is far too long to pass\n").unwrap();

        let checker = StyleChecker::new(20).unwrap();
        let report = checker.check_tree(root).unwrap();

        assert_eq!(report.files_checked, 2);
        assert_eq!(report.count(), 1);
        assert_eq!(report.violations[0].file, "src/pkg/mod.py");
        assert_eq!(
            report.violations[0].to_string(),
            "src/pkg/mod.py:1:21: E501 line too long (29 > 20 characters)"
        );
    }

    #[test]
    fn test_into_phase_result() {
        let checker = StyleChecker::new(5).unwrap();
        let report = StyleReport {
            violations: checker.check_source("a.py", "too long\n"),
            files_checked: 1,
        };

        let result = report.into_phase_result();
        assert_eq!(result.phase, Phase::Style);
        assert_eq!(result.error_count, 1);
        assert_eq!(result.findings[0].rule, FindingRule::Style);
        assert_eq!(result.statistics.len(), 1);
    }
}
