use crate::backend::types::Repository;
use crate::error::FetchError;
use crate::loader::RepositoryDetail;
use crate::view_state::DetailTicket;
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    ReposLoaded(Result<Vec<Repository>, FetchError>),
    DetailLoaded {
        ticket: DetailTicket,
        detail: RepositoryDetail,
    },
}
