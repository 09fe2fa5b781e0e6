use crate::backend::types::Repository;
use crate::error::FetchError;
use crate::http::ensure_success;
use crate::loader::RepositorySource;
use async_trait::async_trait;
use tracing::debug;

/// Client for the backend service that owns the repository list.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: Option<String>,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: Option<&str>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
            http,
        }
    }

    pub fn repos_url(&self) -> Result<String, FetchError> {
        let base = self.base_url.as_deref().ok_or(FetchError::MissingBaseUrl)?;
        Ok(format!("{base}/repos"))
    }
}

#[async_trait]
impl RepositorySource for BackendClient {
    async fn fetch_repositories(&self) -> Result<Vec<Repository>, FetchError> {
        let url = self.repos_url()?;
        debug!(%url, "fetching repository list");
        let response = ensure_success(self.http.get(&url).send().await?)?;
        response
            .json::<Vec<Repository>>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
