//! Detection of required text in repository files.

use anyhow::Context;
use std::path::Path;

use crate::template::{Pattern, RequiredSection};

use super::files::missing_file;
use super::{Finding, FindingRule, Outcome, Phase, PhaseResult};

/// Check whether `file_name` under `base_dir` contains `pattern`.
///
/// With `anchored`, the text must directly follow a line break. A match on
/// the very first line of the file has no preceding line break and is not
/// seen as anchored.
pub fn check_content<P: AsRef<Path>>(
    base_dir: P,
    file_name: &str,
    pattern: &Pattern,
    anchored: bool,
) -> anyhow::Result<Outcome> {
    let path = base_dir.as_ref().join(file_name);
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;

    Ok(match_text(&text, pattern, anchored))
}

/// Match a pattern against already loaded text.
pub fn match_text(text: &str, pattern: &Pattern, anchored: bool) -> Outcome {
    let prefix = if anchored { "\n" } else { "" };

    match pattern {
        Pattern::Single(needle) => {
            if text.contains(&format!("{}{}", prefix, needle)) {
                Outcome::Found
            } else {
                Outcome::Missing
            }
        }
        Pattern::AnyOf(alternatives) => {
            for alternative in alternatives {
                tracing::debug!(alternative = %alternative, "trying alternative");
                if text.contains(&format!("{}{}", prefix, alternative)) {
                    return Outcome::Found;
                }
            }
            Outcome::Missing
        }
    }
}

/// Run every section assertion against the README.
///
/// An absent README is a single finding and the section checks are skipped.
/// Any other read failure is returned as an error.
pub fn detect_missing_sections<P: AsRef<Path>>(
    base_dir: P,
    readme_file: &str,
    sections: &[RequiredSection],
) -> anyhow::Result<PhaseResult> {
    let base = base_dir.as_ref();
    let mut result = PhaseResult::new(Phase::Readme);

    let readme_path = base.join(readme_file);
    if !readme_path.exists() {
        tracing::warn!(path = %readme_path.display(), "README not found, skipping section checks");
        result.record(Outcome::Missing, || missing_file(readme_file));
        return Ok(result);
    }

    for section in sections {
        let outcome = check_content(base, readme_file, &section.pattern, section.anchored)?;
        result.record(outcome, || missing_text(readme_file, &section.pattern));
    }

    Ok(result)
}

fn missing_text(file_name: &str, pattern: &Pattern) -> Finding {
    Finding {
        rule: FindingRule::MissingText,
        message: format!("Missing text in {}: {}", file_name, pattern),
        file: file_name.to_string(),
    }
}
