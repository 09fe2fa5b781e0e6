use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub const LIST_ERROR_MESSAGE: &str = "Could not load repositories from the backend.";

pub struct HeaderBar<'a> {
    pub source: &'a str,
    pub total: usize,
    pub shown: usize,
}

impl<'a> Widget for HeaderBar<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let bg = Style::default().bg(theme::HEADER_BG);
        for x in area.x..area.right() {
            buf[(x, area.y)].set_style(bg);
        }

        let mut spans = vec![
            Span::styled(
                " repodeck",
                Style::default()
                    .fg(theme::ACCENT)
                    .bg(theme::HEADER_BG)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " \u{2503} ",
                Style::default().fg(theme::SEPARATOR).bg(theme::HEADER_BG),
            ),
            Span::styled(self.source.to_string(), Style::default().bg(theme::HEADER_BG)),
        ];

        let count = if self.shown == self.total {
            format!("  {} repositories", self.total)
        } else {
            format!("  {} of {} repositories", self.shown, self.total)
        };
        spans.push(Span::styled(
            count,
            Style::default().fg(theme::DIM_TEXT).bg(theme::HEADER_BG),
        ));

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

/// Persistent notice for a failed list load.
pub struct ErrorBanner;

impl Widget for ErrorBanner {
    fn render(self, area: Rect, buf: &mut Buf) {
        let style = Style::default()
            .fg(theme::ERROR_FG)
            .bg(theme::ERROR_BG)
            .add_modifier(Modifier::BOLD);
        for x in area.x..area.right() {
            buf[(x, area.y)].set_style(style);
        }
        let line = Line::from(Span::styled(format!(" \u{26a0} {LIST_ERROR_MESSAGE}"), style));
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(buf: &Buf) -> String {
        (0..buf.area.width).map(|x| buf[(x, 0)].symbol()).collect()
    }

    #[test]
    fn header_reports_filtered_count() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buf::empty(area);
        HeaderBar {
            source: "http://localhost:4000",
            total: 10,
            shown: 3,
        }
        .render(area, &mut buf);
        let text = line_text(&buf);
        assert!(text.contains("http://localhost:4000"));
        assert!(text.contains("3 of 10 repositories"));
    }

    #[test]
    fn banner_uses_error_colors() {
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buf::empty(area);
        ErrorBanner.render(area, &mut buf);
        assert!(line_text(&buf).contains("Could not load repositories"));
        assert_eq!(buf[(59, 0)].bg, theme::ERROR_BG);
    }
}
