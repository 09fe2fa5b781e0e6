use crate::github::types::Commit;
use crate::ui::{centered_rect, theme};
use ratatui::{
    buffer::Buffer as Buf,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

const COMMIT_LINES: u16 = 5;

pub struct DetailModal<'a> {
    pub full_name: &'a str,
    pub loading: bool,
    pub commit: Option<&'a Commit>,
    pub readme: Option<&'a str>,
    pub readme_scroll: u16,
}

impl<'a> DetailModal<'a> {
    fn commit_text(&self) -> Text<'a> {
        let label = Style::default().fg(theme::ACCENT);
        let Some(commit) = self.commit else {
            return Text::default();
        };
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Author  ", label),
                Span::raw(commit.author.name.as_str()),
            ]),
            Line::from(vec![
                Span::styled("Date    ", label),
                Span::raw(commit.author.date.format("%Y-%m-%d %H:%M UTC").to_string()),
            ]),
        ];
        lines.extend(
            commit
                .message
                .lines()
                .map(|l| Line::from(Span::raw(l.to_string()))),
        );
        Text::from(lines)
    }
}

impl<'a> Widget for DetailModal<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let popup = centered_rect(80, 80, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(format!(" {} ", self.full_name))
            .title_bottom(Line::from(" Enter/Esc close \u{00b7} j/k scroll ").right_aligned())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));
        let inner = block.inner(popup);
        block.render(popup, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.loading {
            buf.set_line(
                inner.x + 1,
                inner.y,
                &Line::from(Span::styled(
                    "Loading\u{2026}",
                    Style::default().fg(theme::DIM_TEXT),
                )),
                inner.width.saturating_sub(1),
            );
            return;
        }

        let commit_h = if self.commit.is_some() { COMMIT_LINES } else { 0 };
        let [commit_area, separator_area, readme_area] = Layout::vertical([
            Constraint::Length(commit_h),
            Constraint::Length(if commit_h > 0 { 1 } else { 0 }),
            Constraint::Min(0),
        ])
        .areas(inner);

        if commit_h > 0 {
            Paragraph::new(self.commit_text())
                .wrap(Wrap { trim: false })
                .render(commit_area, buf);
            let rule = "\u{2500}".repeat(separator_area.width as usize);
            buf.set_line(
                separator_area.x,
                separator_area.y,
                &Line::from(Span::styled(rule, Style::default().fg(theme::SEPARATOR))),
                separator_area.width,
            );
        }

        if let Some(readme) = self.readme {
            Paragraph::new(readme)
                .wrap(Wrap { trim: false })
                .scroll((self.readme_scroll, 0))
                .render(readme_area, buf);
        } else if self.commit.is_none() && readme_area.height > 0 {
            buf.set_line(
                readme_area.x + 1,
                readme_area.y,
                &Line::from(Span::styled(
                    "Nothing to show",
                    Style::default()
                        .fg(theme::DIM_TEXT)
                        .add_modifier(Modifier::ITALIC),
                )),
                readme_area.width.saturating_sub(1),
            );
        }
    }
}
