use crate::table::{SortColumn, SortDirection};
use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBar<'a> {
    pub sort: SortColumn,
    pub direction: SortDirection,
    pub language: Option<&'a str>,
    pub filter_mode: bool,
    pub filter_text: &'a str,
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let bg = Style::default().bg(theme::STATUS_BG);
        for x in area.x..area.right() {
            buf[(x, area.y)].set_style(bg);
        }

        if self.filter_mode {
            let line = Line::from(vec![
                Span::styled(
                    " /",
                    Style::default()
                        .fg(theme::FILTER_COLOR)
                        .bg(theme::STATUS_BG)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(self.filter_text.to_string(), bg),
                Span::styled(
                    "\u{258c}",
                    Style::default().fg(theme::FILTER_COLOR).bg(theme::STATUS_BG),
                ),
            ]);
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let sep = Span::styled(
            "\u{2502}",
            Style::default().fg(theme::BORDER_COLOR).bg(theme::STATUS_BG),
        );
        let mut spans = vec![
            Span::styled(
                format!(" sort: {}{} ", self.sort.label(), self.direction.arrow()),
                bg,
            ),
            sep.clone(),
            Span::styled(
                format!(" language: {} ", self.language.unwrap_or("all")),
                bg,
            ),
        ];

        if !self.filter_text.is_empty() {
            spans.push(sep.clone());
            spans.push(Span::styled(
                format!(" name: {} ", self.filter_text),
                Style::default().fg(theme::FILTER_COLOR).bg(theme::STATUS_BG),
            ));
        }

        spans.push(sep);
        spans.push(Span::styled(
            " ? help ",
            Style::default().fg(theme::DIM_TEXT).bg(theme::STATUS_BG),
        ));

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(buf: &Buf) -> String {
        (0..buf.area.width).map(|x| buf[(x, 0)].symbol()).collect()
    }

    #[test]
    fn shows_sort_and_filters() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buf::empty(area);
        StatusBar {
            sort: SortColumn::Forks,
            direction: SortDirection::Ascending,
            language: Some("Go"),
            filter_mode: false,
            filter_text: "cli",
        }
        .render(area, &mut buf);
        let text = line_text(&buf);
        assert!(text.contains("sort: forks\u{2191}"));
        assert!(text.contains("language: Go"));
        assert!(text.contains("name: cli"));
    }

    #[test]
    fn filter_prompt_replaces_summary() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buf::empty(area);
        StatusBar {
            sort: SortColumn::Created,
            direction: SortDirection::Descending,
            language: None,
            filter_mode: true,
            filter_text: "rep",
        }
        .render(area, &mut buf);
        let text = line_text(&buf);
        assert!(text.starts_with(" /rep"));
        assert!(!text.contains("sort:"));
    }
}
