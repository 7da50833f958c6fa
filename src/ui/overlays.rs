use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

fn key_line(keys: &str, action: &str) -> Line<'static> {
    Line::raw(format!("  {keys:<20}{action}"))
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let show_path = |path: Option<&std::path::PathBuf>, missing: &str| {
        path.map_or_else(|| missing.to_string(), |p| p.display().to_string())
    };
    let global_cfg = show_path(model.config_global_path.as_ref(), "<unknown>");
    let local_cfg = show_path(model.config_local_path.as_ref(), "<none>");
    let data_dir = show_path(model.data_dir.as_ref(), "<unknown>");

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("Editing", section_style));
    all_lines.push(key_line("Arrows, Home/End", "Move (Shift extends selection)"));
    all_lines.push(key_line("Ctrl-a", "Select page"));
    all_lines.push(key_line("Enter / Backspace", "New paragraph / delete"));
    all_lines.push(key_line("Paste", "Append to last page and paginate"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Format", section_style));
    all_lines.push(key_line("Alt-b / Alt-i / Alt-u", "Bold, italic, underline"));
    all_lines.push(key_line("Alt-l / Alt-e / Alt-r", "Align left, center, right"));
    all_lines.push(key_line("Alt-7 / Alt-8", "Numbered / bulleted list"));
    all_lines.push(key_line("Alt-f", "Next font"));
    all_lines.push(key_line("Alt-s / Alt-S", "Larger / smaller text"));
    all_lines.push(key_line("Alt-c", "Text color"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Pages", section_style));
    all_lines.push(key_line("PageUp / PageDown", "Previous / next page"));
    all_lines.push(key_line("Ctrl-n", "Add page"));
    all_lines.push(key_line("Ctrl-d", "Delete page"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Other", section_style));
    all_lines.push(key_line("Ctrl-s", "Save"));
    all_lines.push(key_line("Ctrl-l", "Clear everything"));
    all_lines.push(key_line("Ctrl-q / Ctrl-c", "Quit"));
    all_lines.push(key_line("F1", "Toggle help"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Files", section_style));
    all_lines.push(Line::raw(format!("  Pages: {data_dir}")));
    all_lines.push(Line::raw(format!("  Global: {global_cfg}")));
    all_lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    // Reserve 1 row at bottom for footer hint
    let content_height = inner.height.saturating_sub(1);
    let visible: Vec<Line> = all_lines
        .into_iter()
        .take(usize::from(content_height))
        .collect();
    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);
    frame.render_widget(Paragraph::new(visible), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    let footer = Line::styled("any key closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
