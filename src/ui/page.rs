//! Terminal layout of a page fragment.
//!
//! Wraps each block to the page's inner width, applies alignment and list
//! markers, and reports where the cursor lands.

use std::ops::Range;

use ratatui::prelude::*;
use unicode_width::UnicodeWidthChar;

use crate::document::{Align, Fragment, ListKind};

use super::style::{Theme, style_for_inline};

/// A fragment laid out into terminal rows.
#[derive(Debug, Default)]
pub struct PageLines {
    pub lines: Vec<Line<'static>>,
    /// Cursor position as (column, row) within the laid out rows.
    pub cursor: Option<(u16, usize)>,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    width: u16,
    style: Style,
    offset: usize,
}

fn cell_width(ch: char) -> u16 {
    u16::try_from(ch.width().unwrap_or(0)).unwrap_or(0)
}

fn row_width(row: &[Cell]) -> u16 {
    row.iter().fold(0, |used, c| used.saturating_add(c.width))
}

/// Greedy wrap at spaces, falling back to a hard break inside long words.
fn wrap_cells(cells: Vec<Cell>, avail: u16) -> Vec<Vec<Cell>> {
    let mut rows = Vec::new();
    let mut row: Vec<Cell> = Vec::new();
    let mut used: u16 = 0;
    for cell in cells {
        // Spaces hang past the edge so the next row starts with a word.
        if used.saturating_add(cell.width) > avail && !row.is_empty() && cell.ch != ' ' {
            let carry = match row.iter().rposition(|c| c.ch == ' ') {
                Some(pos) if pos + 1 < row.len() => row.split_off(pos + 1),
                _ => Vec::new(),
            };
            used = row_width(&carry);
            rows.push(std::mem::replace(&mut row, carry));
        }
        used = used.saturating_add(cell.width);
        row.push(cell);
    }
    rows.push(row);
    rows
}

fn list_marker(list: Option<ListKind>, number: usize) -> String {
    match list {
        Some(ListKind::Ordered) => format!("{number}. "),
        Some(ListKind::Unordered) => "\u{2022} ".to_string(),
        None => String::new(),
    }
}

/// Lay out `fragment` into rows of at most `width` columns.
///
/// `cursor` is a character offset into the fragment; characters inside
/// `selection` are drawn reversed.
pub fn layout_fragment(
    fragment: &Fragment,
    width: u16,
    cursor: Option<usize>,
    selection: Range<usize>,
) -> PageLines {
    let mut out = PageLines::default();
    let mut block_start = 0;
    let mut ordinal = 0;
    let theme = Theme::default();

    for block in fragment.blocks() {
        ordinal = if block.list == Some(ListKind::Ordered) {
            ordinal + 1
        } else {
            0
        };
        let marker = list_marker(block.list, ordinal);
        let marker_width = u16::try_from(marker.chars().count()).unwrap_or(0);
        let avail = width.saturating_sub(marker_width).max(1);

        let mut cells = Vec::with_capacity(block.char_len());
        let mut offset = block_start;
        for run in block.runs() {
            for ch in run.text.chars() {
                let shown = if ch == '\t' { ' ' } else { ch };
                let mut style = style_for_inline(Style::default(), &run.style);
                if selection.contains(&offset) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                cells.push(Cell {
                    ch: shown,
                    width: cell_width(shown),
                    style,
                    offset,
                });
                offset += 1;
            }
        }
        let block_end = offset;
        let rows = wrap_cells(cells, avail);

        let last_row = rows.len() - 1;
        for (row_idx, row) in rows.iter().enumerate() {
            let used = row_width(row);
            let pad = match block.align {
                Align::Left => 0,
                Align::Center => avail.saturating_sub(used) / 2,
                Align::Right => avail.saturating_sub(used),
            };

            if let Some(at) = cursor {
                let hit = row.iter().position(|c| c.offset == at);
                let col = match hit {
                    Some(idx) => Some(row_width(&row[..idx])),
                    None if row_idx == last_row && at == block_end => Some(used),
                    None => None,
                };
                if let Some(col) = col {
                    let col = marker_width
                        .saturating_add(pad)
                        .saturating_add(col)
                        .min(width.saturating_sub(1));
                    out.cursor = Some((col, out.lines.len()));
                }
            }

            let mut spans = Vec::new();
            if row_idx == 0 {
                if !marker.is_empty() {
                    spans.push(Span::styled(marker.clone(), theme.list_marker));
                }
            } else if marker_width > 0 {
                spans.push(Span::raw(" ".repeat(usize::from(marker_width))));
            }
            if pad > 0 {
                spans.push(Span::raw(" ".repeat(usize::from(pad))));
            }
            spans.extend(group_spans(row));
            out.lines.push(Line::from(spans));
        }
        block_start = block_end + 1;
    }
    out
}

/// Merge neighbouring cells with equal styles into spans.
fn group_spans(row: &[Cell]) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut text = String::new();
    let mut current: Option<Style> = None;
    for cell in row {
        if current.is_some_and(|style| style != cell.style) {
            spans.push(Span::styled(std::mem::take(&mut text), current.unwrap_or_default()));
        }
        current = Some(cell.style);
        text.push(cell.ch);
    }
    if let Some(style) = current {
        spans.push(Span::styled(text, style));
    }
    spans
}
