use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

use super::page::layout_fragment;
use super::style::Theme;
use super::{PAGE_CHROME_WIDTH, overlays, status};

/// Columns available for page text in a terminal `total_width` wide.
pub const fn page_text_width(total_width: u16) -> u16 {
    let width = total_width.saturating_sub(PAGE_CHROME_WIDTH);
    if width == 0 { 1 } else { width }
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let theme = Theme::default();

    let prompt_active = model.color_prompt.is_some();
    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(prompt_active) + u16::from(toast_active);

    let toolbar_area = Rect {
        height: area.height.min(1),
        ..area
    };
    let body_area = Rect {
        y: area.y + toolbar_area.height,
        height: area
            .height
            .saturating_sub(toolbar_area.height + footer_rows),
        ..area
    };
    let prompt_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(prompt_active)),
        height: 1,
        ..area
    };
    let toast_area = Rect {
        y: area.y
            + area
                .height
                .saturating_sub(1 + u16::from(prompt_active) + u16::from(toast_active)),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    status::render_toolbar(model, &theme, frame, toolbar_area);
    let cursor = render_pages(model, &theme, frame, body_area);
    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    if prompt_active {
        status::render_color_prompt(model, &theme, frame, prompt_area);
    }
    status::render_status_bar(model, &theme, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    } else if let Some(position) = cursor.filter(|_| !prompt_active) {
        frame.set_cursor_position(position);
    }
}

/// Draw pages from the focused one downward. Returns the screen cursor.
fn render_pages(
    model: &Model,
    theme: &Theme,
    frame: &mut Frame,
    area: Rect,
) -> Option<Position> {
    frame.render_widget(Clear, area);
    if area.height == 0 {
        return None;
    }

    let focused = model.cursor.page.min(model.document.len() - 1);
    let text_width = page_text_width(area.width);
    let mut y = area.y;
    let mut screen_cursor = None;

    if focused > 0 {
        let hint = format!("\u{25b2} {focused} page(s) above  PageUp");
        frame.render_widget(
            Paragraph::new(Line::styled(hint, theme.page_border)),
            Rect { y, height: 1, ..area },
        );
        y += 1;
    }

    for (index, page) in model.document.pages().iter().enumerate().skip(focused) {
        let remaining = area.bottom().saturating_sub(y);
        if remaining < 3 {
            break;
        }
        let is_focused = index == focused;
        let (cursor, selection) = if is_focused {
            (Some(model.cursor.offset), model.cursor.selection())
        } else {
            (None, 0..0)
        };
        let view = layout_fragment(&page.content, text_width, cursor, selection);

        let rows = u16::try_from(view.lines.len()).unwrap_or(u16::MAX);
        let height = rows.saturating_add(2).min(remaining);
        let inner_height = height - 2;
        let scroll = match view.cursor {
            Some((_, row)) if row >= usize::from(inner_height) => {
                u16::try_from(row + 1 - usize::from(inner_height)).unwrap_or(u16::MAX)
            }
            _ => 0,
        };

        let px = model.page_height(index);
        let overflow = model.page_overflows(index);
        let mut gauge = vec![Span::raw(format!(" {px}/{} px ", model.paginator.max_height()))];
        if overflow {
            gauge.push(Span::styled("overflow ", theme.overflow));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1))
            .title(format!(" Page {} ", page.id))
            .title_bottom(Line::from(gauge).right_aligned())
            .border_style(if is_focused {
                theme.focused_border
            } else {
                theme.page_border
            });

        let rect = Rect { y, height, ..area };
        frame.render_widget(Paragraph::new(view.lines).block(block).scroll((scroll, 0)), rect);

        if let Some((col, row)) = view.cursor.filter(|_| is_focused) {
            let row = u16::try_from(row).unwrap_or(u16::MAX).saturating_sub(scroll);
            screen_cursor = Some(Position::new(rect.x + 2 + col, rect.y + 1 + row));
        }
        y += height;
    }
    screen_cursor
}
