use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(140, 115, 200);
pub const HEADER_BG: Color = Color::Rgb(25, 25, 38);
pub const STATUS_BG: Color = Color::Rgb(30, 30, 40);
pub const SELECTED_BG: Color = Color::Rgb(50, 50, 80);
pub const SEPARATOR: Color = Color::Rgb(55, 55, 75);
pub const BORDER_COLOR: Color = Color::Rgb(80, 80, 110);
pub const COLUMN_HEADER_FG: Color = Color::Rgb(100, 95, 130);
pub const FILTER_COLOR: Color = Color::Cyan;
pub const DIM_TEXT: Color = Color::Rgb(100, 100, 120);
pub const ERROR_FG: Color = Color::LightRed;
pub const ERROR_BG: Color = Color::Rgb(60, 20, 25);

const LANGUAGE_COLORS: &[Color] = &[
    Color::Green,
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Blue,
    Color::Red,
];

/// Stable color per language name so a language keeps its color across
/// reloads and filters.
pub fn language_color(language: &str) -> Color {
    let hash = language
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    LANGUAGE_COLORS[hash % LANGUAGE_COLORS.len()]
}
