#![cfg(test)]

use crate::backend::types::Repository;
use crate::error::FetchError;
use crate::github::types::{Commit, CommitAuthor, CommitEnvelope};
use crate::loader::{DetailSource, RepositorySource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub fn make_repo(id: u64, full_name: &str, language: Option<&str>, created_at: &str) -> Repository {
    let name = full_name.rsplit('/').next().unwrap_or(full_name).to_string();
    Repository {
        id,
        full_name: full_name.to_string(),
        name,
        description: Some(format!("about {full_name}")),
        language: language.map(str::to_string),
        forks_count: id,
        created_at: created_at.parse().expect("valid RFC 3339 timestamp"),
    }
}

pub fn make_envelope(author: &str, message: &str) -> CommitEnvelope {
    CommitEnvelope {
        commit: Commit {
            author: CommitAuthor {
                name: author.to_string(),
                date: "2024-02-03T04:05:06Z".parse().expect("valid timestamp"),
            },
            message: message.to_string(),
        },
    }
}

pub fn http_404() -> FetchError {
    FetchError::Status {
        status: 404,
        url: "https://raw.example/o/a/master/README.md".to_string(),
    }
}

#[derive(Clone)]
pub struct FakeRepositorySource {
    repos: Option<Vec<Repository>>,
    calls: Arc<AtomicUsize>,
}

impl FakeRepositorySource {
    pub fn ok(repos: Vec<Repository>) -> Self {
        Self {
            repos: Some(repos),
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            repos: None,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepositorySource for FakeRepositorySource {
    async fn fetch_repositories(&self) -> Result<Vec<Repository>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.repos.clone().ok_or(FetchError::Status {
            status: 500,
            url: "http://backend/repos".to_string(),
        })
    }
}

type CommitsResult = Result<Vec<CommitEnvelope>, FetchError>;
type ReadmeResult = Result<String, FetchError>;

/// Answers each sub-request once with a canned result.
pub struct FakeDetailSource {
    commits: Mutex<Option<CommitsResult>>,
    readme: Mutex<Option<ReadmeResult>>,
}

impl FakeDetailSource {
    pub fn new(commits: CommitsResult, readme: ReadmeResult) -> Self {
        Self {
            commits: Mutex::new(Some(commits)),
            readme: Mutex::new(Some(readme)),
        }
    }
}

#[async_trait]
impl DetailSource for FakeDetailSource {
    async fn latest_commits(&self, _full_name: &str) -> CommitsResult {
        let canned = self.commits.lock().unwrap().take();
        canned.unwrap_or_else(|| Err(FetchError::Decode("commits already served".into())))
    }

    async fn readme(&self, _full_name: &str) -> ReadmeResult {
        let canned = self.readme.lock().unwrap().take();
        canned.unwrap_or_else(|| Err(FetchError::Decode("readme already served".into())))
    }
}

#[derive(Default)]
struct GatePair {
    commits: Option<oneshot::Receiver<CommitsResult>>,
    readme: Option<oneshot::Receiver<ReadmeResult>>,
}

/// Sub-requests block until the test releases the matching [`Gate`], so
/// completion order is under the test's control.
#[derive(Default)]
pub struct GatedDetailSource {
    gates: Mutex<HashMap<String, GatePair>>,
}

pub struct Gate {
    commits: oneshot::Sender<CommitsResult>,
    readme: oneshot::Sender<ReadmeResult>,
}

impl Gate {
    pub fn release(self, commits: CommitsResult, readme: ReadmeResult) {
        let _ = self.commits.send(commits);
        let _ = self.readme.send(readme);
    }
}

impl GatedDetailSource {
    pub fn gate(&self, full_name: &str) -> Gate {
        let (commits_tx, commits_rx) = oneshot::channel();
        let (readme_tx, readme_rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(
            full_name.to_string(),
            GatePair {
                commits: Some(commits_rx),
                readme: Some(readme_rx),
            },
        );
        Gate {
            commits: commits_tx,
            readme: readme_tx,
        }
    }
}

#[async_trait]
impl DetailSource for GatedDetailSource {
    async fn latest_commits(&self, full_name: &str) -> CommitsResult {
        let rx = self
            .gates
            .lock()
            .unwrap()
            .get_mut(full_name)
            .and_then(|g| g.commits.take());
        match rx {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(FetchError::Decode("gate dropped".into()))),
            None => Err(FetchError::Decode(format!("no gate for {full_name}"))),
        }
    }

    async fn readme(&self, full_name: &str) -> ReadmeResult {
        let rx = self
            .gates
            .lock()
            .unwrap()
            .get_mut(full_name)
            .and_then(|g| g.readme.take());
        match rx {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(FetchError::Decode("gate dropped".into()))),
            None => Err(FetchError::Decode(format!("no gate for {full_name}"))),
        }
    }
}

/// Answers the first connection with `status` and `body`, then closes it.
/// Returns the base URL to point a client at.
pub async fn serve_once(status: &str, content_type: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let response = format!(
        "HTTP/1.1 {status}\r\ncontent-type: {content_type}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}")
}

/// Accepts connections and keeps them open without ever responding.
pub async fn hold_connections() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}
