use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepodeckError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("github client error: {0}")]
    GitHub(String),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, RepodeckError>;

/// Failure of a single outbound request.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} responded with status {status}")]
    Status { status: u16, url: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("github error: {0}")]
    GitHub(String),

    #[error("{url} did not answer within {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("no API base URL configured (set API_BASE_URL)")]
    MissingBaseUrl,
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status: 404, .. })
    }
}
