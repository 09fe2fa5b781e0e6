use crate::config::Config;
use crate::error::{FetchError, Result};
use std::future::Future;
use std::time::Duration;

pub fn request_timeout(config: &Config) -> Duration {
    Duration::from_secs(config.request_timeout_secs.max(1))
}

pub fn build_client(config: &Config) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("repodeck/", env!("CARGO_PKG_VERSION")))
        .timeout(request_timeout(config))
        .build()?;
    Ok(client)
}

/// Fails with [`FetchError::Timeout`] once `limit` passes without `request`
/// finishing.
pub async fn with_deadline<T, F>(
    limit: Duration,
    url: &str,
    request: F,
) -> std::result::Result<T, FetchError>
where
    F: Future<Output = std::result::Result<T, FetchError>>,
{
    tokio::time::timeout(limit, request)
        .await
        .unwrap_or_else(|_| {
            Err(FetchError::Timeout {
                url: url.to_string(),
                secs: limit.as_secs(),
            })
        })
}

pub fn ensure_success(response: reqwest::Response) -> std::result::Result<reqwest::Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deadline_turns_stall_into_timeout() {
        let result: std::result::Result<(), _> = with_deadline(
            Duration::from_millis(50),
            "http://stalled/repos",
            futures::future::pending(),
        )
        .await;
        match result {
            Err(FetchError::Timeout { url, .. }) => assert_eq!(url, "http://stalled/repos"),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn deadline_passes_through_finished_request() {
        let result = with_deadline(Duration::from_secs(2), "http://x", async { Ok::<_, FetchError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn zero_timeout_is_raised_to_one_second() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(request_timeout(&config), Duration::from_secs(1));
    }
}
