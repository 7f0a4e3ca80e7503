//! GitHub repository metadata client.
//!
//! One GET per "owner/name" identifier against `{base}/repos/{owner}/{name}`,
//! authentication carried per request. No retry, no caching; every failure is
//! typed so the pipeline can skip the offending repository and continue.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("alt-catalog/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The service's view of one repository at fetch time. Transient: consumed by
/// the projection step right after a successful call, never persisted as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoRecord {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub html_url: String,
    pub pushed_at: String,
    #[serde(default)]
    pub license: Option<License>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct License {
    #[serde(default)]
    pub name: String,
}

/// Per-lookup failure. Never fatal to the run; the orchestrator records it
/// and moves on to the next identifier.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request could not be sent or no response was received.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    /// Response received but status does not indicate success.
    #[error("unexpected status {0}")]
    Status(StatusCode),
    /// Response body could not be parsed into the expected shape.
    #[error("response decode error: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Seam between the pipeline and the metadata service, mockable in tests.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait RepoMetadataClient: Send + Sync {
    /// Fetch metadata for one repository identified as "owner/name".
    ///
    /// Identifiers are sent as-is; malformed ones surface as upstream
    /// `Status` failures rather than being validated locally.
    async fn fetch_repo(&self, full_name: &str) -> Result<RepoRecord, FetchError>;
}

/// Production implementor backed by the GitHub REST API.
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl GitHubClient {
    /// Build a client for the given credential and API base URL.
    ///
    /// The transport timeout lives here; a request that exceeds it surfaces
    /// as [`FetchError::Transport`] instead of hanging the run.
    pub fn new(token: &str, api_base: &str) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(GitHubClient {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }
}

#[async_trait]
impl RepoMetadataClient for GitHubClient {
    async fn fetch_repo(&self, full_name: &str) -> Result<RepoRecord, FetchError> {
        let url = format!("{}/repos/{}", self.api_base, full_name);
        debug!(repo = full_name, url = %url, "Fetching repository metadata");

        let response = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .header(header::ACCEPT, ACCEPT_HEADER)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response
            .json::<RepoRecord>()
            .await
            .map_err(FetchError::Decode)
    }
}
