use crate::backend::types::Repository;
use crate::event::AppEvent;
use crate::loader::{is_full_name, RepositoryDetailLoader, RepositoryListLoader};
use crate::table::TableView;
use crate::ui::{
    detail_modal::DetailModal,
    header_bar::{ErrorBanner, HeaderBar},
    help_panel::HelpPanel,
    input::{self, Action, InputMode},
    repo_table::RepoTable,
    status_bar::StatusBar,
};
use crate::view_state::ViewState;
use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

pub struct App {
    pub state: ViewState,
    pub table: TableView,
    pub selected: usize,
    pub scroll: usize,
    pub readme_scroll: u16,
    pub filter_mode: bool,
    pub show_help: bool,
    pub list_pending: bool,
    pub should_quit: bool,

    source_label: String,
    page_size: usize,
    list_loader: RepositoryListLoader,
    detail_loader: RepositoryDetailLoader,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(
        list_loader: RepositoryListLoader,
        detail_loader: RepositoryDetailLoader,
        source_label: String,
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            state: ViewState::default(),
            table: TableView::default(),
            selected: 0,
            scroll: 0,
            readme_scroll: 0,
            filter_mode: false,
            show_help: false,
            list_pending: false,
            should_quit: false,
            source_label,
            page_size: 10,
            list_loader,
            detail_loader,
            tx,
        }
    }

    /// Kicks off the one automatic list load.
    pub fn start(&mut self) {
        self.list_pending = true;
        let tx = self.tx.clone();
        let loader = self.list_loader.clone();
        tokio::spawn(async move {
            let result = loader.load().await;
            let _ = tx.send(AppEvent::ReposLoaded(result));
        });
    }

    /// Shows the modal immediately; the detail arrives later as
    /// [`AppEvent::DetailLoaded`].
    pub fn open_detail(&mut self, full_name: &str) {
        if !is_full_name(full_name) {
            warn!(name = full_name, "refusing to open detail for malformed repository name");
            return;
        }

        let ticket = self.state.begin_detail(full_name);
        self.readme_scroll = 0;
        info!(repo = full_name, "opening detail");

        let tx = self.tx.clone();
        let loader = self.detail_loader.clone();
        let full_name = full_name.to_string();
        tokio::spawn(async move {
            let detail = loader.fetch(&full_name).await;
            let _ = tx.send(AppEvent::DetailLoaded { ticket, detail });
        });
    }

    pub fn visible_rows(&self) -> Vec<&Repository> {
        self.table.visible_rows(self.state.repositories())
    }

    fn selected_full_name(&self) -> Option<String> {
        self.visible_rows()
            .get(self.selected)
            .map(|r| r.full_name.clone())
    }

    fn input_mode(&self) -> InputMode {
        if self.filter_mode {
            InputMode::Filter
        } else if self.state.modal_visible() {
            InputMode::Modal
        } else if self.show_help {
            InputMode::Help
        } else {
            InputMode::Table
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => {
                let action = input::map_key(key, self.input_mode());
                self.handle_action(action);
            }
            AppEvent::Resize => {}
            AppEvent::ReposLoaded(result) => {
                self.list_pending = false;
                self.state.apply_list_result(result);
                self.clamp_selection();
            }
            AppEvent::DetailLoaded { ticket, detail } => {
                self.state.finish_detail(ticket, detail);
            }
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => {
                if self.selected + 1 < self.visible_rows().len() {
                    self.selected += 1;
                }
            }
            Action::ScrollUp => self.selected = self.selected.saturating_sub(1),
            Action::PageDown => {
                self.selected += self.page_size;
                self.clamp_selection();
            }
            Action::PageUp => self.selected = self.selected.saturating_sub(self.page_size),
            Action::Open => {
                if let Some(name) = self.selected_full_name() {
                    self.open_detail(&name);
                }
            }
            Action::CloseModal => self.state.close_modal(),
            Action::ReadmeDown => {
                let limit = self.readme_scroll_limit();
                self.readme_scroll = self.readme_scroll.saturating_add(1).min(limit);
            }
            Action::ReadmeUp => self.readme_scroll = self.readme_scroll.saturating_sub(1),
            Action::CycleSort => self.table.sort = self.table.sort.next(),
            Action::FlipSort => self.table.direction = self.table.direction.flip(),
            Action::NextLanguage | Action::PrevLanguage => {
                let forward = matches!(action, Action::NextLanguage);
                self.table
                    .cycle_language(self.state.language_options(), forward);
                self.reset_selection();
            }
            Action::Filter => self.filter_mode = true,
            Action::FilterChar(c) => {
                self.table.name_query.push(c);
                self.reset_selection();
            }
            Action::FilterBackspace => {
                self.table.name_query.pop();
                self.reset_selection();
            }
            Action::FilterConfirm => self.filter_mode = false,
            Action::FilterCancel => {
                self.filter_mode = false;
                self.table.name_query.clear();
                self.reset_selection();
            }
            Action::Help => self.show_help = !self.show_help,
            Action::None => {}
        }
    }

    /// Last README line that may sit at the top of the modal.
    fn readme_scroll_limit(&self) -> u16 {
        let lines = self.state.selected_readme().map_or(0, |r| r.lines().count());
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn reset_selection(&mut self) {
        self.selected = 0;
        self.scroll = 0;
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_rows().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    fn ensure_scroll_bounds(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected >= self.scroll + visible_height {
            self.scroll = self.selected - visible_height + 1;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let banner_h = if self.state.fetch_errored() { 1 } else { 0 };

        let [header_area, banner_area, table_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(banner_h),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(size);

        // borders plus the column header row
        let body_rows = (table_area.height as usize).saturating_sub(3);
        self.page_size = body_rows.max(1);
        self.ensure_scroll_bounds(body_rows);

        let rows = self.visible_rows();

        frame.render_widget(
            HeaderBar {
                source: &self.source_label,
                total: self.state.repositories().len(),
                shown: rows.len(),
            },
            header_area,
        );

        if self.state.fetch_errored() {
            frame.render_widget(ErrorBanner, banner_area);
        }

        frame.render_widget(
            RepoTable {
                rows: &rows,
                selected: self.selected,
                scroll: self.scroll,
                loading: self.list_pending,
                sort: self.table.sort,
                direction: self.table.direction,
            },
            table_area,
        );

        frame.render_widget(
            StatusBar {
                sort: self.table.sort,
                direction: self.table.direction,
                language: self.table.language.as_deref(),
                filter_mode: self.filter_mode,
                filter_text: &self.table.name_query,
            },
            status_area,
        );

        if self.show_help {
            frame.render_widget(HelpPanel, size);
        }

        if self.state.modal_visible() {
            frame.render_widget(
                DetailModal {
                    full_name: self.state.detail_target().unwrap_or_default(),
                    loading: self.state.detail_loading(),
                    commit: self.state.selected_commit(),
                    readme: self.state.selected_readme(),
                    readme_scroll: self.readme_scroll,
                },
                size,
            );
        }
    }
}
