use crate::backend::types::Repository;
use crate::error::FetchError;
use crate::github::types::Commit;
use crate::loader::RepositoryDetail;
use itertools::Itertools;
use tracing::{debug, warn};

/// Identifies one `open` of the detail modal. Only the newest ticket may
/// write detail results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetailTicket(u64);

#[derive(Debug, Default)]
pub struct ViewState {
    repositories: Vec<Repository>,
    language_options: Vec<String>,
    fetch_errored: bool,
    modal_visible: bool,
    detail_loading: bool,
    detail_target: Option<String>,
    selected_commit: Option<Commit>,
    selected_readme: Option<String>,
    latest_ticket: u64,
}

impl ViewState {
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn language_options(&self) -> &[String] {
        &self.language_options
    }

    pub fn fetch_errored(&self) -> bool {
        self.fetch_errored
    }

    pub fn modal_visible(&self) -> bool {
        self.modal_visible
    }

    pub fn detail_loading(&self) -> bool {
        self.detail_loading
    }

    pub fn detail_target(&self) -> Option<&str> {
        self.detail_target.as_deref()
    }

    pub fn selected_commit(&self) -> Option<&Commit> {
        self.selected_commit.as_ref()
    }

    pub fn selected_readme(&self) -> Option<&str> {
        self.selected_readme.as_deref()
    }

    /// A failed load keeps the previous collection and raises the error flag,
    /// which nothing clears afterwards.
    pub fn apply_list_result(&mut self, result: Result<Vec<Repository>, FetchError>) {
        match result {
            Ok(repos) => {
                self.language_options = derive_language_options(&repos);
                self.repositories = repos;
            }
            Err(e) => {
                warn!(error = %e, "repository list load failed");
                self.fetch_errored = true;
            }
        }
    }

    pub fn begin_detail(&mut self, full_name: &str) -> DetailTicket {
        self.latest_ticket += 1;
        self.modal_visible = true;
        self.detail_loading = true;
        self.detail_target = Some(full_name.to_string());
        self.selected_commit = None;
        self.selected_readme = None;
        DetailTicket(self.latest_ticket)
    }

    /// Returns false when `ticket` was superseded and the detail was dropped.
    pub fn finish_detail(&mut self, ticket: DetailTicket, detail: RepositoryDetail) -> bool {
        if ticket.0 != self.latest_ticket {
            debug!(ticket = ticket.0, latest = self.latest_ticket, "discarding stale detail");
            return false;
        }
        self.selected_commit = detail.commit;
        self.selected_readme = detail.readme;
        self.detail_loading = false;
        true
    }

    /// In-flight requests keep running; the detail fields are left as they are.
    pub fn close_modal(&mut self) {
        self.modal_visible = false;
    }
}

/// Distinct languages in first-appearance order, skipping repositories
/// without one.
pub fn derive_language_options(repos: &[Repository]) -> Vec<String> {
    repos
        .iter()
        .filter_map(|r| r.language.as_deref())
        .unique()
        .map(str::to_string)
        .collect()
}
