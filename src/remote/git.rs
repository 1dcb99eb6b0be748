//! Cloning through the local git client.

use std::path::Path;
use std::process::Command;

use super::{RemoteError, RepoCloner};

/// Clones repositories by running `git clone`.
pub struct GitCloner {
    program: String,
}

impl Default for GitCloner {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCloner {
    /// Use a specific git executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl RepoCloner for GitCloner {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), RemoteError> {
        tracing::info!(url = %url, dest = %dest.display(), "cloning repository");

        let output = Command::new(&self.program)
            .arg("clone")
            .arg(url)
            .arg(dest)
            .output()?;

        if !output.status.success() {
            return Err(RemoteError::Clone(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(())
    }
}
