use std::ops::Range;

use crate::document::{Fragment, InlineStyle};

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Cursor and selection within the focused page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Index of the focused page in the document.
    pub page: usize,
    /// Character offset in the page fragment, block boundaries counted.
    pub offset: usize,
    /// Other end of the selection, if one is active.
    anchor: Option<usize>,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at the start of the first page.
    pub const fn new() -> Self {
        Self {
            page: 0,
            offset: 0,
            anchor: None,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(page: usize, offset: usize) -> Self {
        Self {
            page,
            offset,
            anchor: None,
            col_memory: 0,
        }
    }

    /// Selected range, collapsed to the cursor when nothing is selected.
    pub fn selection(&self) -> Range<usize> {
        match self.anchor {
            Some(anchor) if anchor < self.offset => anchor..self.offset,
            Some(anchor) => self.offset..anchor,
            None => self.offset..self.offset,
        }
    }

    pub fn has_selection(&self) -> bool {
        !self.selection().is_empty()
    }

    pub const fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Select the whole fragment.
    pub fn select_all(&mut self, fragment: &Fragment) {
        self.anchor = Some(0);
        self.offset = fragment.char_len();
    }

    /// Focus another page, placing the cursor at its end.
    pub fn focus_page(&mut self, page: usize, fragment: &Fragment) {
        self.page = page;
        self.anchor = None;
        self.set_offset(fragment, fragment.char_len());
    }

    /// Keep the offset inside `fragment` after external edits.
    pub fn clamp(&mut self, fragment: &Fragment) {
        let len = fragment.char_len();
        self.offset = self.offset.min(len);
        self.anchor = self.anchor.map(|a| a.min(len));
    }

    fn set_offset(&mut self, fragment: &Fragment, offset: usize) {
        self.offset = offset.min(fragment.char_len());
        self.col_memory = fragment.locate(self.offset).1;
    }

    /// Start or drop the selection before a move.
    fn prepare_move(&mut self, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.offset);
        } else {
            self.anchor = None;
        }
    }

    /// Move the cursor, extending the selection when `extend` is set.
    pub fn move_cursor(&mut self, fragment: &Fragment, direction: Direction, extend: bool) {
        let collapsing = !extend && self.has_selection();
        let selection = self.selection();
        self.prepare_move(extend);
        match direction {
            // Collapsing a selection lands on its edge instead of moving past it.
            Direction::Left if collapsing => self.set_offset(fragment, selection.start),
            Direction::Right if collapsing => self.set_offset(fragment, selection.end),
            Direction::Left => self.set_offset(fragment, self.offset.saturating_sub(1)),
            Direction::Right => self.set_offset(fragment, self.offset + 1),
            Direction::Up => self.move_vertical(fragment, false),
            Direction::Down => self.move_vertical(fragment, true),
        }
    }

    fn move_vertical(&mut self, fragment: &Fragment, down: bool) {
        let (block, _) = fragment.locate(self.offset);
        let target = if down {
            block + 1
        } else if let Some(prev) = block.checked_sub(1) {
            prev
        } else {
            return;
        };
        let Some(len) = fragment.blocks().get(target).map(|b| b.char_len()) else {
            return;
        };
        self.offset = fragment.block_start(target) + self.col_memory.min(len);
    }

    /// Move to the start of the current block (Home).
    pub fn move_home(&mut self, fragment: &Fragment, extend: bool) {
        self.prepare_move(extend);
        let (block, _) = fragment.locate(self.offset);
        self.set_offset(fragment, fragment.block_start(block));
    }

    /// Move to the end of the current block (End).
    pub fn move_end(&mut self, fragment: &Fragment, extend: bool) {
        self.prepare_move(extend);
        let (block, _) = fragment.locate(self.offset);
        let end = fragment.block_start(block) + fragment.blocks()[block].char_len();
        self.set_offset(fragment, end);
    }

    /// Remove the selected text. Returns `true` if anything was removed.
    pub fn delete_selection(&mut self, fragment: &mut Fragment) -> bool {
        let selection = self.selection();
        self.anchor = None;
        if selection.is_empty() {
            return false;
        }
        fragment.delete_range(selection.clone());
        self.set_offset(fragment, selection.start);
        true
    }

    /// Type `text` at the cursor, replacing any selection.
    pub fn insert(&mut self, fragment: &mut Fragment, text: &str, style: &InlineStyle) {
        self.delete_selection(fragment);
        let end = fragment.insert_text(self.offset, text, style);
        self.set_offset(fragment, end);
    }

    /// Split the current block at the cursor (Enter key).
    pub fn newline(&mut self, fragment: &mut Fragment, style: &InlineStyle) {
        self.insert(fragment, "\n", style);
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// At the start of a block this joins it with the previous one. Returns
    /// `true` if anything was deleted.
    pub fn delete_back(&mut self, fragment: &mut Fragment) -> bool {
        if self.delete_selection(fragment) {
            return true;
        }
        if self.offset == 0 {
            return false;
        }
        fragment.delete_range(self.offset - 1..self.offset);
        self.set_offset(fragment, self.offset - 1);
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self, fragment: &mut Fragment) -> bool {
        if self.delete_selection(fragment) {
            return true;
        }
        if self.offset >= fragment.char_len() {
            return false;
        }
        fragment.delete_range(self.offset..self.offset + 1);
        true
    }
}
