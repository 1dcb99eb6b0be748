//! raise - RAISE project template checker.
//!
//! raise validates that a repository follows the RAISE project template and
//! bootstraps new repositories from it.
//!
//! # Architecture
//!
//! - `template`: the fixed list of required entries and README sections
//! - `config`: invocation settings and the optional override file
//! - `detect`: style, structure and README checks plus the phase runner
//! - `report`: colored terminal output
//! - `remote`: GitHub fork client and git clone wrapper for `raise init`
//! - `cli`: argument parsing and dispatch

pub mod cli;
pub mod config;
pub mod detect;
pub mod remote;
pub mod report;
pub mod template;

pub use config::{CheckArguments, ConfigOverrides};
pub use detect::{CheckSummary, Outcome, PhaseResult, Runner};
pub use template::Template;
