use crate::config::Config;
use crate::error::{FetchError, RepodeckError, Result};
use crate::github::types::CommitEnvelope;
use crate::http::{ensure_success, request_timeout, with_deadline};
use crate::loader::DetailSource;
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// README downloads always target this branch, whatever the repository's
/// default branch is.
pub const README_BRANCH: &str = "master";

#[derive(Serialize)]
struct CommitQuery {
    per_page: u8,
}

/// Commit lookups go through the REST API; README bodies come from the raw
/// content host.
#[derive(Clone)]
pub struct GitHubClient {
    octo: Octocrab,
    http: reqwest::Client,
    api_base: String,
    raw_base: String,
    timeout: Duration,
}

impl GitHubClient {
    pub fn new(config: &Config, http: reqwest::Client) -> Result<Self> {
        let timeout = request_timeout(config);
        let mut builder = Octocrab::builder()
            .base_uri(config.github_api_url.as_str())
            .map_err(|e| RepodeckError::GitHub(e.to_string()))?
            .set_connect_timeout(Some(timeout))
            .set_read_timeout(Some(timeout));

        if let Some(ref token) = config.github_token {
            builder = builder.personal_token(token.to_string());
        }

        let octo = builder
            .build()
            .map_err(|e| RepodeckError::GitHub(e.to_string()))?;

        Ok(Self {
            octo,
            http,
            api_base: config.github_api_url.trim_end_matches('/').to_string(),
            raw_base: config.raw_content_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn readme_url(&self, full_name: &str) -> String {
        readme_url(&self.raw_base, full_name)
    }
}

pub fn commits_route(full_name: &str) -> String {
    format!("/repos/{full_name}/commits")
}

pub fn readme_url(raw_base: &str, full_name: &str) -> String {
    format!("{raw_base}/{full_name}/{README_BRANCH}/README.md")
}

#[async_trait]
impl DetailSource for GitHubClient {
    async fn latest_commits(&self, full_name: &str) -> std::result::Result<Vec<CommitEnvelope>, FetchError> {
        let route = commits_route(full_name);
        debug!(%route, "fetching latest commit");
        let url = format!("{}{route}", self.api_base);
        // bounds the whole lookup, not just each read
        with_deadline(self.timeout, &url, async {
            let commits: Vec<CommitEnvelope> = self
                .octo
                .get(route.as_str(), Some(&CommitQuery { per_page: 1 }))
                .await
                .map_err(|e| FetchError::GitHub(e.to_string()))?;
            Ok(commits)
        })
        .await
    }

    async fn readme(&self, full_name: &str) -> std::result::Result<String, FetchError> {
        let url = self.readme_url(full_name);
        debug!(%url, "fetching readme");
        let response = ensure_success(self.http.get(&url).send().await?)?;
        Ok(response.text().await?)
    }
}
