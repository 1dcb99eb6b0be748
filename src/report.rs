//! Output formatting for raise results.
//!
//! Colored terminal output: blue phase banners, red findings, green success
//! lines. Colors follow `NO_COLOR` and can be forced off with
//! [`disable_colors`].

use colored::*;

use crate::config::ConfigError;
use crate::detect::{CheckSummary, PhaseResult};

/// Turn off colored output for the rest of the process.
pub fn disable_colors() {
    colored::control::set_override(false);
}

/// Print a phase banner, its findings and, when clean, a success line.
pub fn write_phase(result: &PhaseResult) {
    println!("{}", result.phase.banner().blue());
    println!();

    for finding in &result.findings {
        println!("{}", finding.message.red());
    }

    if !result.statistics.is_empty() {
        if !result.findings.is_empty() {
            println!();
        }
        for stat in &result.statistics {
            println!("{}", stat.to_string().red());
        }
    }

    if result.passed() {
        println!("{}", "No issues found.".green());
    }
    println!();
}

/// Print a recoverable problem from the override file.
pub fn write_config_error(error: &ConfigError) {
    println!("{}", format!("[ERR] {}", error).red());
}

/// Print the per-phase totals after all phases ran.
pub fn write_summary(summary: &CheckSummary) {
    let line = format!(
        "style: {}  structure: {}  readme: {}",
        summary.style, summary.structure, summary.readme
    );

    if summary.passed() {
        println!("{}  {}", "✓ PASS".green(), line.dimmed());
    } else {
        let plural = if summary.total() != 1 { "s" } else { "" };
        println!(
            "{}  {} issue{}  {}",
            "✗ FAIL".red(),
            summary.total(),
            plural,
            line.dimmed()
        );
    }
}

/// Print an informational line from the init flow.
pub fn write_info(message: &str) {
    println!("{}", message.blue());
}

/// Print a success line from the init flow.
pub fn write_success(message: &str) {
    println!("{}", message.green());
}
