use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Open,
    CloseModal,
    ReadmeUp,
    ReadmeDown,
    CycleSort,
    FlipSort,
    NextLanguage,
    PrevLanguage,
    Filter,
    FilterChar(char),
    FilterBackspace,
    FilterConfirm,
    FilterCancel,
    Help,
    Quit,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Table,
    Filter,
    Modal,
    Help,
}

pub fn map_key(key: KeyEvent, mode: InputMode) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match mode {
        InputMode::Filter => match key.code {
            KeyCode::Esc => Action::FilterCancel,
            KeyCode::Enter => Action::FilterConfirm,
            KeyCode::Backspace => Action::FilterBackspace,
            KeyCode::Char(c) => Action::FilterChar(c),
            _ => Action::None,
        },
        InputMode::Modal => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Enter | KeyCode::Esc => Action::CloseModal,
            KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Down => Action::ReadmeDown,
            KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Up => Action::ReadmeUp,
            _ => Action::None,
        },
        InputMode::Help => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc | KeyCode::Char('?') => Action::Help,
            _ => Action::None,
        },
        InputMode::Table => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Enter => Action::Open,
            KeyCode::Char('s') => Action::CycleSort,
            KeyCode::Char('S') => Action::FlipSort,
            KeyCode::Char('l') => Action::NextLanguage,
            KeyCode::Char('L') => Action::PrevLanguage,
            KeyCode::Char('/') => Action::Filter,
            KeyCode::Char('?') => Action::Help,
            _ => Action::None,
        },
    }
}
