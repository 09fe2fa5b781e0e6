use crate::backend::types::Repository;
use crate::error::FetchError;
use crate::github::types::{Commit, CommitEnvelope};
use crate::settle::settle_pair;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn fetch_repositories(&self) -> Result<Vec<Repository>, FetchError>;
}

#[async_trait]
pub trait DetailSource: Send + Sync {
    /// Most recent commit first; at most one element is requested.
    async fn latest_commits(&self, full_name: &str) -> Result<Vec<CommitEnvelope>, FetchError>;
    async fn readme(&self, full_name: &str) -> Result<String, FetchError>;
}

/// Whatever part of a repository's detail could be fetched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RepositoryDetail {
    pub commit: Option<Commit>,
    pub readme: Option<String>,
}

#[derive(Clone)]
pub struct RepositoryListLoader {
    source: Arc<dyn RepositorySource>,
}

impl RepositoryListLoader {
    pub fn new(source: Arc<dyn RepositorySource>) -> Self {
        Self { source }
    }

    pub async fn load(&self) -> Result<Vec<Repository>, FetchError> {
        let mut repos = self.source.fetch_repositories().await?;
        sort_newest_first(&mut repos);
        info!(count = repos.len(), "repository list loaded");
        Ok(repos)
    }
}

/// Descending by `created_at`; equal timestamps keep their response order.
pub fn sort_newest_first(repos: &mut [Repository]) {
    repos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[derive(Clone)]
pub struct RepositoryDetailLoader {
    source: Arc<dyn DetailSource>,
}

impl RepositoryDetailLoader {
    pub fn new(source: Arc<dyn DetailSource>) -> Self {
        Self { source }
    }

    /// Never fails: a sub-request that errors just leaves its field empty.
    pub async fn fetch(&self, full_name: &str) -> RepositoryDetail {
        let (commits, readme) = settle_pair(
            self.source.latest_commits(full_name),
            self.source.readme(full_name),
        )
        .await;

        let commit = match commits {
            Ok(list) => list.into_iter().next().map(|envelope| envelope.commit),
            Err(e) => {
                debug!(repo = full_name, error = %e, "commit lookup failed");
                None
            }
        };

        let readme = match readme {
            Ok(body) if body.is_empty() => None,
            Ok(body) => Some(body),
            Err(e) if e.is_not_found() => {
                debug!(repo = full_name, "no README on master");
                None
            }
            Err(e) => {
                debug!(repo = full_name, error = %e, "readme download failed");
                None
            }
        };

        RepositoryDetail { commit, readme }
    }
}

pub fn is_full_name(name: &str) -> bool {
    match name.split_once('/') {
        Some((owner, repo)) => !owner.is_empty() && !repo.is_empty() && !repo.contains('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn newest_first_is_stable_for_equal_dates() {
        let mut repos = vec![
            make_repo(1, "o/a", Some("TS"), "2020-01-01T00:00:00Z"),
            make_repo(2, "o/b", Some("Go"), "2022-01-01T00:00:00Z"),
            make_repo(3, "o/c", Some("TS"), "2022-01-01T00:00:00Z"),
        ];
        sort_newest_first(&mut repos);
        let names: Vec<_> = repos.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["o/b", "o/c", "o/a"]);
    }

    #[tokio::test]
    async fn list_loader_sorts_response() {
        let source = FakeRepositorySource::ok(vec![
            make_repo(1, "o/old", None, "2019-06-01T00:00:00Z"),
            make_repo(2, "o/new", None, "2024-06-01T00:00:00Z"),
        ]);
        let loader = RepositoryListLoader::new(Arc::new(source.clone()));
        let repos = loader.load().await.unwrap();
        assert_eq!(repos[0].full_name, "o/new");
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn list_loader_propagates_failure() {
        let loader = RepositoryListLoader::new(Arc::new(FakeRepositorySource::failing()));
        assert!(loader.load().await.is_err());
    }

    #[tokio::test]
    async fn detail_with_readme_failure_keeps_commit() {
        let source = FakeDetailSource::new(Ok(vec![make_envelope("Ada", "first")]), Err(http_404()));
        let detail = RepositoryDetailLoader::new(Arc::new(source)).fetch("o/a").await;
        assert_eq!(detail.commit.map(|c| c.author.name), Some("Ada".to_string()));
        assert_eq!(detail.readme, None);
    }

    #[tokio::test]
    async fn detail_with_commit_failure_keeps_readme() {
        let source = FakeDetailSource::new(Err(FetchError::GitHub("rate limited".into())), Ok("# Hi".into()));
        let detail = RepositoryDetailLoader::new(Arc::new(source)).fetch("o/a").await;
        assert_eq!(detail.commit, None);
        assert_eq!(detail.readme.as_deref(), Some("# Hi"));
    }

    #[tokio::test]
    async fn detail_uses_first_commit_only() {
        let source = FakeDetailSource::new(
            Ok(vec![make_envelope("Ada", "newest"), make_envelope("Bob", "older")]),
            Ok(String::new()),
        );
        let detail = RepositoryDetailLoader::new(Arc::new(source)).fetch("o/a").await;
        assert_eq!(detail.commit.map(|c| c.message), Some("newest".to_string()));
        assert_eq!(detail.readme, None);
    }

    #[tokio::test]
    async fn detail_with_empty_commit_list() {
        let source = FakeDetailSource::new(Ok(vec![]), Ok("text".into()));
        let detail = RepositoryDetailLoader::new(Arc::new(source)).fetch("o/a").await;
        assert_eq!(detail.commit, None);
        assert_eq!(detail.readme.as_deref(), Some("text"));
    }

    #[test]
    fn full_name_shape() {
        assert!(is_full_name("rust-lang/rust"));
        assert!(!is_full_name("rust"));
        assert!(!is_full_name("/rust"));
        assert!(!is_full_name("rust-lang/"));
        assert!(!is_full_name("a/b/c"));
        assert!(!is_full_name(""));
    }
}
