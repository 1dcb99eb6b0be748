//! GitHub REST client.
//!
//! Forks via: POST {api}/repos/{owner}/{repo}/forks

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{RemoteError, RemoteRepo, TemplateHost};

/// Public GitHub API endpoint.
pub const GITHUB_API_URL: &str = "https://api.github.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fork response fields the init flow needs.
#[derive(Debug, Deserialize)]
struct ForkResponse {
    full_name: String,
    html_url: String,
    clone_url: String,
}

/// GitHub client authenticated with a personal access token.
pub struct GitHubHost {
    http: Client,
    runtime: tokio::runtime::Runtime,
    api_url: String,
    token: String,
    timeout: Duration,
}

impl GitHubHost {
    /// Create a client against the public API.
    pub fn new(token: impl Into<String>) -> Result<Self, RemoteError> {
        Self::with_api_url(token, GITHUB_API_URL)
    }

    /// Create a client against a specific API endpoint.
    pub fn with_api_url(
        token: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .user_agent(concat!("raise/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let runtime = tokio::runtime::Runtime::new()?;

        Ok(Self {
            http,
            runtime,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    async fn create_fork(&self, full_name: &str) -> Result<RemoteRepo, RemoteError> {
        let url = format!("{}/repos/{}/forks", self.api_url, full_name);
        tracing::debug!(url = %url, "requesting fork");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RemoteError::Timeout
                } else {
                    RemoteError::Network(e)
                }
            })?;

        match response.status().as_u16() {
            200 | 202 => {
                let fork: ForkResponse = response.json().await?;
                Ok(RemoteRepo {
                    full_name: fork.full_name,
                    html_url: fork.html_url,
                    clone_url: fork.clone_url,
                })
            }
            status @ (401 | 403) => Err(RemoteError::Unauthorized(status)),
            404 => Err(RemoteError::NotFound(full_name.to_string())),
            status => Err(RemoteError::Unavailable(format!("HTTP {}", status))),
        }
    }
}

impl TemplateHost for GitHubHost {
    fn fork(&self, full_name: &str) -> Result<RemoteRepo, RemoteError> {
        self.runtime.block_on(self.create_fork(full_name))
    }
}
