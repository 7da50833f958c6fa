//! Terminal styles for rich-text runs and editor chrome.

use ratatui::style::{Color, Modifier, Style};

use crate::document::{InlineStyle, TextColor};

/// Get the style for an inline run, merged with a base style.
///
/// Black is the document's default ink and maps to the terminal's own
/// foreground so text stays readable on dark themes.
pub fn style_for_inline(base: Style, inline: &InlineStyle) -> Style {
    let mut style = base;

    if let Some(color) = inline.color.filter(|c| *c != TextColor::BLACK) {
        style = style
            .fg(fg_color_for_terminal(color))
            .remove_modifier(Modifier::DIM);
    }
    if inline.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Swatch color used by the toolbar, even for black.
pub fn swatch_color(color: TextColor) -> Color {
    fg_color_for_terminal(color)
}

fn fg_color_for_terminal(fg: TextColor) -> Color {
    if supports_truecolor() {
        Color::Rgb(fg.r, fg.g, fg.b)
    } else {
        Color::Indexed(rgb_to_xterm_256(fg.r, fg.g, fg.b))
    }
}

fn supports_truecolor() -> bool {
    if let Ok(force) = std::env::var("FOLIO_TRUECOLOR") {
        let value = force.to_ascii_lowercase();
        return matches!(value.as_str(), "1" | "true" | "yes" | "on");
    }
    supports_truecolor_from_env(
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn supports_truecolor_from_env(colorterm: Option<&str>, term: Option<&str>) -> bool {
    if let Some(ct) = colorterm {
        let lower = ct.to_ascii_lowercase();
        if lower.contains("truecolor") || lower.contains("24bit") {
            return true;
        }
    }
    if let Some(t) = term {
        let lower = t.to_ascii_lowercase();
        if lower.contains("direct") || lower.contains("truecolor") {
            return true;
        }
    }
    false
}

fn rgb_to_xterm_256(r: u8, g: u8, b: u8) -> u8 {
    // Result is always 0-5, fits in u8
    #[allow(clippy::cast_possible_truncation)]
    let to_cube = |v: u8| ((u16::from(v) * 5) / 255) as u8;
    let ri = to_cube(r);
    let gi = to_cube(g);
    let bi = to_cube(b);
    16 + (36 * ri) + (6 * gi) + bi
}

/// Colors for everything around the page text.
#[derive(Debug, Clone)]
pub struct Theme {
    pub page_border: Style,
    pub focused_border: Style,
    pub overflow: Style,
    pub list_marker: Style,
    pub toolbar: Style,
    pub toolbar_active: Style,
    pub status: Style,
    pub prompt: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            page_border: Style::default().fg(Color::Indexed(240)),
            focused_border: Style::default().fg(Color::Yellow),
            overflow: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            list_marker: Style::default().fg(Color::Yellow),
            toolbar: Style::default().bg(Color::Indexed(236)).fg(Color::Indexed(252)),
            toolbar_active: Style::default()
                .bg(Color::Indexed(252))
                .fg(Color::Indexed(235))
                .add_modifier(Modifier::BOLD),
            status: Style::default().bg(Color::DarkGray).fg(Color::White),
            prompt: Style::default().bg(Color::Blue).fg(Color::White),
        }
    }
}
