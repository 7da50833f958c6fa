use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};
use crate::document::{Align, ListKind};

use super::style::{Theme, style_for_inline, swatch_color};

/// Formatting state at the cursor plus the picker values.
pub fn render_toolbar(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let fragment = model.focused();
    let (block_idx, _) = fragment.locate(model.cursor.offset);
    let block = fragment.blocks().get(block_idx);
    let align = block.map_or(Align::Left, |b| b.align);
    let list = block.and_then(|b| b.list);

    let toggle = |label: &'static str, on: bool, modifier: Modifier| {
        let style = if on {
            theme.toolbar_active
        } else {
            theme.toolbar
        };
        Span::styled(label, style.add_modifier(modifier))
    };
    let pick = |label: &'static str, on: bool| {
        Span::styled(label, if on { theme.toolbar_active } else { theme.toolbar })
    };
    let sep = || Span::styled(" \u{2502} ", theme.toolbar);

    let toolbar = model.toolbar;
    let spans = vec![
        Span::styled(" ", theme.toolbar),
        toggle(" B ", model.typing.bold, Modifier::BOLD),
        toggle(" I ", model.typing.italic, Modifier::ITALIC),
        toggle(" U ", model.typing.underline, Modifier::UNDERLINED),
        sep(),
        pick(" Left ", align == Align::Left),
        pick(" Center ", align == Align::Center),
        pick(" Right ", align == Align::Right),
        sep(),
        pick(" 1. ", list == Some(ListKind::Ordered)),
        pick(" \u{2022} ", list == Some(ListKind::Unordered)),
        sep(),
        Span::styled("\u{25a0}", theme.toolbar.fg(swatch_color(toolbar.color))),
        Span::styled(format!(" {} ", toolbar.color), theme.toolbar),
        sep(),
        Span::styled(
            format!("{} {}px", toolbar.font.name(), toolbar.size.px()),
            style_for_inline(theme.toolbar, &model.typing),
        ),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.toolbar), area);
}

pub fn render_color_prompt(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let input = model.color_prompt.as_deref().unwrap_or_default();
    let label = "Color: ";
    let text = format!("{label}{input}  Enter: apply  Esc: cancel");
    frame.render_widget(Paragraph::new(text).style(theme.prompt), area);

    let col = u16::try_from(label.len() + input.chars().count()).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(col).min(area.right().saturating_sub(1));
    frame.set_cursor_position(Position::new(x, area.y));
}

pub fn render_status_bar(model: &Model, theme: &Theme, frame: &mut Frame, area: Rect) {
    let index = model.cursor.page.min(model.document.len() - 1);
    let page_id = model.document.get(index).map_or(0, |page| page.id);
    let overflow = if model.page_overflows(index) {
        " [overflow]"
    } else {
        ""
    };
    let dirty = if model.dirty { " [modified]" } else { "" };

    let status = format!(
        " folio  Page {}/{} (#{page_id})  {}/{} px{overflow}{dirty}  F1:help",
        index + 1,
        model.document.len(),
        model.page_height(index),
        model.paginator.max_height(),
    );
    frame.render_widget(Paragraph::new(status).style(theme.status), area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
