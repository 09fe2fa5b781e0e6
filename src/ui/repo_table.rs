use crate::backend::types::Repository;
use crate::table::{SortColumn, SortDirection};
use crate::ui::{fit_width, theme};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

const LANGUAGE_W: usize = 12;
const FORKS_W: usize = 7;
const CREATED_W: usize = 10;
const GAP: &str = "  ";

pub struct RepoTable<'a> {
    pub rows: &'a [&'a Repository],
    pub selected: usize,
    pub scroll: usize,
    pub loading: bool,
    pub sort: SortColumn,
    pub direction: SortDirection,
}

struct ColumnWidths {
    name: usize,
    description: usize,
}

fn column_widths(total: usize) -> ColumnWidths {
    let fixed = LANGUAGE_W + FORKS_W + CREATED_W + GAP.len() * 4;
    let flexible = total.saturating_sub(fixed);
    let name = (flexible * 2 / 5).clamp(8.min(flexible), 36);
    ColumnWidths {
        name,
        description: flexible.saturating_sub(name),
    }
}

impl<'a> RepoTable<'a> {
    fn header_label(&self, column: SortColumn, label: &str) -> String {
        if self.sort == column {
            format!("{label}{}", self.direction.arrow())
        } else {
            label.to_string()
        }
    }

    fn header_line(&self, widths: &ColumnWidths) -> Line<'static> {
        let style = Style::default()
            .fg(theme::COLUMN_HEADER_FG)
            .add_modifier(Modifier::BOLD);
        let text = [
            fit_width(&self.header_label(SortColumn::Name, "Name"), widths.name),
            fit_width("Description", widths.description),
            fit_width(&self.header_label(SortColumn::Language, "Language"), LANGUAGE_W),
            fit_width(&self.header_label(SortColumn::Forks, "Forks"), FORKS_W),
            fit_width(&self.header_label(SortColumn::Created, "Created"), CREATED_W),
        ]
        .join(GAP);
        Line::from(Span::styled(text, style))
    }
}

fn row_line(repo: &Repository, widths: &ColumnWidths) -> Line<'static> {
    let language = repo.language.as_deref().unwrap_or("");
    let language_style = if language.is_empty() {
        Style::default()
    } else {
        Style::default().fg(theme::language_color(language))
    };
    let dim = Style::default().fg(theme::DIM_TEXT);

    Line::from(vec![
        Span::styled(
            fit_width(&repo.full_name, widths.name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(GAP),
        Span::styled(
            fit_width(repo.description.as_deref().unwrap_or(""), widths.description),
            dim,
        ),
        Span::raw(GAP),
        Span::styled(fit_width(language, LANGUAGE_W), language_style),
        Span::raw(GAP),
        Span::raw(format!("{:>width$}", repo.forks_count, width = FORKS_W)),
        Span::raw(GAP),
        Span::styled(
            fit_width(&repo.created_at.format("%Y-%m-%d").to_string(), CREATED_W),
            dim,
        ),
    ])
}

impl<'a> Widget for RepoTable<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let block = Block::default()
            .title(" Repositories ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER_COLOR));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let widths = column_widths(inner.width as usize);
        buf.set_line(inner.x, inner.y, &self.header_line(&widths), inner.width);

        if self.rows.is_empty() {
            let message = if self.loading {
                "Loading repositories\u{2026}"
            } else {
                "No repositories"
            };
            if inner.height > 1 {
                buf.set_line(
                    inner.x,
                    inner.y + 1,
                    &Line::from(Span::styled(message, Style::default().fg(theme::DIM_TEXT))),
                    inner.width,
                );
            }
            return;
        }

        let visible = (inner.height as usize).saturating_sub(1);
        for (i, repo) in self.rows.iter().skip(self.scroll).take(visible).enumerate() {
            let y = inner.y + 1 + i as u16;
            buf.set_line(inner.x, y, &row_line(repo, &widths), inner.width);

            if self.scroll + i == self.selected {
                for x in inner.x..inner.right() {
                    buf[(x, y)].set_style(Style::default().bg(theme::SELECTED_BG));
                }
            }
        }
    }
}
