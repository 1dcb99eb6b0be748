//! Detection module for template conformance issues.

mod content;
mod files;
mod runner;
mod style;
mod types;

pub use content::{check_content, detect_missing_sections, match_text};
pub use files::{check_exists, detect_missing_files};
pub use runner::{CheckSummary, Runner};
pub use style::{Statistic, StyleChecker, StyleReport, StyleViolation, DEFAULT_MAX_LINE_LENGTH};
pub use types::{Finding, FindingRule, Outcome, Phase, PhaseResult};
