//! Remote collaborators for `raise init`.
//!
//! - `github`: forks the template repository through the GitHub REST API
//! - `git`: clones the resulting repository with the local git client
//! - `prompt`: asks for an access token when none was supplied

mod git;
mod github;
mod prompt;

pub use git::GitCloner;
pub use github::{GitHubHost, GITHUB_API_URL};
pub use prompt::prompt_token;

use std::path::Path;
use thiserror::Error;

/// Errors that can occur while talking to the hosting service or git.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("access token was rejected (HTTP {0})")]
    Unauthorized(u16),
    #[error("template repository {0} not found")]
    NotFound(String),
    #[error("hosting service unavailable: {0}")]
    Unavailable(String),
    #[error("git clone failed: {0}")]
    Clone(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A repository the init flow can clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    /// `owner/name`.
    pub full_name: String,
    pub html_url: String,
    pub clone_url: String,
}

impl RemoteRepo {
    /// A public GitHub repository addressed by `owner/name`.
    pub fn github(full_name: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            html_url: format!("https://github.com/{}", full_name),
            clone_url: format!("https://github.com/{}.git", full_name),
        }
    }
}

/// Hosting service that can fork a repository into the caller's account.
pub trait TemplateHost {
    fn fork(&self, full_name: &str) -> Result<RemoteRepo, RemoteError>;
}

/// Version-control client that can clone a repository.
pub trait RepoCloner {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), RemoteError>;
}
