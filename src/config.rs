//! Invocation settings and the optional override file.
//!
//! Settings are layered: built-in defaults, then flags passed on the command
//! line, then the override file found in the working directory. Values in the
//! file always win. The file is INI (`.raise.conf`):
//!
//! ```ini
//! [init]
//! template = dl4se
//! fork = yes
//!
//! [check]
//! max_line_length = 100
//! ```
//!
//! The same sections are also accepted as YAML in `.raise.yaml` or
//! `.raise.yml`.

use anyhow::Context;
use ini::Ini;
use serde::Deserialize;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::detect::DEFAULT_MAX_LINE_LENGTH;
use crate::template::DEFAULT_TEMPLATE;

/// Override file names to search for, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &[".raise.conf", ".raise.yaml", ".raise.yml"];

/// Settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckArguments {
    /// Root directory to check.
    pub path: Option<PathBuf>,
    pub init_mode: bool,
    pub template: String,
    pub no_fork: bool,
    pub max_line_length: usize,
    /// Access credential for the hosting API.
    pub token: Option<String>,
}

impl Default for CheckArguments {
    fn default() -> Self {
        Self {
            path: None,
            init_mode: false,
            template: DEFAULT_TEMPLATE.to_string(),
            no_fork: false,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            token: None,
        }
    }
}

/// A recoverable problem with a value in the override file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {section}.{key} in config file")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
    },
}

/// Parsed contents of the override file.
///
/// Values are kept untyped so that a malformed value only affects its own
/// key. Unknown sections and keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub init: Option<InitSection>,
    #[serde(default)]
    pub check: Option<CheckSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InitSection {
    #[serde(default)]
    pub template: Option<Value>,
    #[serde(default)]
    pub fork: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckSection {
    #[serde(default)]
    pub max_line_length: Option<Value>,
}

impl ConfigOverrides {
    /// Parse an override file, choosing the syntax from its extension.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let parsed = match path.extension().and_then(|ext| ext.to_str()) {
            Some("conf") | Some("ini") => Self::parse_ini(&content),
            _ => Self::parse_str(&content),
        };
        parsed.with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse INI text. Section names are case-sensitive, keys are not.
    pub fn parse_ini(content: &str) -> anyhow::Result<Self> {
        let ini = Ini::load_from_str(content)?;
        let mut overrides = Self::default();

        for (section, properties) in ini.iter() {
            let Some(section) = section else {
                continue;
            };
            for (key, value) in properties.iter() {
                let value = Some(Value::String(value.to_string()));
                match (section, key.to_lowercase().as_str()) {
                    ("init", "template") => {
                        overrides.init.get_or_insert_with(Default::default).template = value
                    }
                    ("init", "fork") => {
                        overrides.init.get_or_insert_with(Default::default).fork = value
                    }
                    ("check", "max_line_length") => {
                        overrides
                            .check
                            .get_or_insert_with(Default::default)
                            .max_line_length = value
                    }
                    _ => tracing::debug!(section, key, "ignoring unknown override key"),
                }
            }
        }

        Ok(overrides)
    }

    /// Parse YAML text.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to null.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let overrides: ConfigOverrides = serde_yaml::from_str(content)?;
        Ok(overrides)
    }
}

/// Find the override file in `dir`, if any.
pub fn discover<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.as_ref().join(name))
        .find(|path| path.is_file())
}

/// Load the override file from `dir` when one exists.
pub fn load_overrides<P: AsRef<Path>>(dir: P) -> anyhow::Result<Option<ConfigOverrides>> {
    match discover(&dir) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading override file");
            ConfigOverrides::parse_file(&path).map(Some)
        }
        None => Ok(None),
    }
}

/// Result of overlaying an override file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    pub args: CheckArguments,
    /// Values that could not be applied; their fields kept the base value.
    pub errors: Vec<ConfigError>,
}

/// Overlay `overrides` onto `base`, returning a new record.
pub fn merge(base: &CheckArguments, overrides: &ConfigOverrides) -> Merged {
    let mut args = base.clone();
    let mut errors = Vec::new();

    if let Some(init) = &overrides.init {
        if let Some(value) = &init.template {
            match scalar_string(value) {
                Some(template) => args.template = template,
                None => errors.push(ConfigError::InvalidValue {
                    section: "init",
                    key: "template",
                }),
            }
        }

        if let Some(value) = &init.fork {
            match coerce_bool(value) {
                Some(fork) => args.no_fork = !fork,
                None => errors.push(ConfigError::InvalidValue {
                    section: "init",
                    key: "fork",
                }),
            }
        }
    }

    if let Some(check) = &overrides.check {
        if let Some(value) = &check.max_line_length {
            match coerce_length(value) {
                Some(length) => args.max_line_length = length,
                None => errors.push(ConfigError::InvalidValue {
                    section: "check",
                    key: "max_line_length",
                }),
            }
        }
    }

    Merged { args, errors }
}

/// Accepts native booleans, 0/1, and the usual INI spellings.
fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_u64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Some(true),
            "0" | "no" | "false" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Accepts positive integers, natively or as text.
fn coerce_length(value: &Value) -> Option<usize> {
    let length = match value {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    }?;
    (length > 0).then_some(length)
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
