//! Core types for check results.

use super::Statistic;

/// Result of a single existence or content assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    Missing,
}

impl Outcome {
    pub fn is_missing(self) -> bool {
        self == Outcome::Missing
    }

    /// Number of errors this outcome contributes to a phase count.
    pub fn error_count(self) -> usize {
        match self {
            Outcome::Found => 0,
            Outcome::Missing => 1,
        }
    }
}

/// The sequential check stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Style,
    Structure,
    Readme,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Style => "style",
            Phase::Structure => "structure",
            Phase::Readme => "readme",
        }
    }

    /// Banner printed before the phase runs.
    pub fn banner(&self) -> &'static str {
        match self {
            Phase::Style => "[Running code style checks]",
            Phase::Structure => "[Checking directory structure]",
            Phase::Readme => "[Checking README]",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rule names for the different finding types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingRule {
    MissingFile,
    MissingText,
    Style,
}

/// A single reported deviation from the template.
#[derive(Debug, Clone)]
pub struct Finding {
    pub rule: FindingRule,
    pub message: String,
    /// Path relative to the checked root, or the entry name for missing files.
    pub file: String,
}

/// Results of one phase.
#[derive(Debug, Clone)]
pub struct PhaseResult {
    pub phase: Phase,
    pub findings: Vec<Finding>,
    /// Failing assertions in this phase.
    pub error_count: usize,
    /// Per-code summary, only filled by the style phase.
    pub statistics: Vec<Statistic>,
}

impl PhaseResult {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            findings: Vec::new(),
            error_count: 0,
            statistics: Vec::new(),
        }
    }

    /// Record an assertion outcome, attaching the finding when it failed.
    pub fn record(&mut self, outcome: Outcome, finding: impl FnOnce() -> Finding) {
        if outcome.is_missing() {
            self.findings.push(finding());
        }
        self.error_count += outcome.error_count();
    }

    pub fn passed(&self) -> bool {
        self.error_count == 0
    }
}
