//! Template definitions for raise.
//!
//! A template fixes what a conforming repository must contain: a list of
//! required entries and a list of README section assertions. Both are
//! build-time constants.

/// Default template name used by `raise init`.
pub const DEFAULT_TEMPLATE: &str = "dl4se";

/// GitHub account that owns the upstream template repositories.
pub const TEMPLATE_OWNER: &str = "yrahul3910";

/// Name of the README file the content checks run against.
pub const README_FILE: &str = "README.md";

/// Entries that must exist under the repository root, in report order.
///
/// A trailing `/` marks a directory.
pub const REQUIRED_ENTRIES: &[&str] = &[
    "README.md",
    "src/",
    "data/",
    ".gitignore",
    "LICENSE",
    "requirements.txt",
    "main.py",
    "src/__init__.py",
];

/// A required filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredEntry {
    /// Path relative to the repository root, as written in the template.
    pub path: String,
    pub kind: EntryKind,
}

/// Whether a required entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl RequiredEntry {
    /// Parse a template entry; a trailing slash makes it a directory.
    pub fn parse(raw: &str) -> Self {
        let kind = if raw.ends_with('/') {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        Self {
            path: raw.to_string(),
            kind,
        }
    }

    /// The entry path without the directory marker.
    pub fn relative_path(&self) -> &str {
        self.path.trim_end_matches('/')
    }
}

/// Text to search for in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// The text must be present.
    Single(String),
    /// At least one of the alternatives must be present.
    AnyOf(Vec<String>),
}

impl Pattern {
    pub fn single(text: &str) -> Self {
        Pattern::Single(text.to_string())
    }

    pub fn any_of(alternatives: &[&str]) -> Self {
        Pattern::AnyOf(alternatives.iter().map(|s| s.to_string()).collect())
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Single(text) => write!(f, "{}", text),
            Pattern::AnyOf(alternatives) => write!(f, "one of {}", alternatives.join(", ")),
        }
    }
}

/// A content assertion against a file in the repository.
#[derive(Debug, Clone)]
pub struct RequiredSection {
    pub pattern: Pattern,
    /// Whether the text has to start a line.
    pub anchored: bool,
}

/// The full set of requirements a repository is checked against.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub required_entries: Vec<RequiredEntry>,
    pub readme_file: String,
    pub readme_sections: Vec<RequiredSection>,
}

impl Template {
    /// The built-in template every repository is checked against.
    pub fn standard() -> Self {
        let readme_sections = vec![
            RequiredSection {
                pattern: Pattern::single("## Data"),
                anchored: true,
            },
            RequiredSection {
                pattern: Pattern::single("## Reference"),
                anchored: true,
            },
            RequiredSection {
                pattern: Pattern::any_of(&["## Instructions", "## Setup"]),
                anchored: true,
            },
        ];

        Self {
            name: DEFAULT_TEMPLATE.to_string(),
            required_entries: REQUIRED_ENTRIES
                .iter()
                .map(|raw| RequiredEntry::parse(raw))
                .collect(),
            readme_file: README_FILE.to_string(),
            readme_sections,
        }
    }
}

/// Full `owner/name` of the upstream repository for a template.
pub fn upstream_repo(template: &str) -> String {
    format!("{}/raise-template-{}", TEMPLATE_OWNER, template)
}
