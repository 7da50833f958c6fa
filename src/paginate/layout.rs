//! Rendered-height approximation.
//!
//! Typesets a fragment the way a proportional-font page would: characters
//! advance by a per-family width ratio of their pixel size, lines wrap greedily
//! at whitespace, overlong words break mid-word, and each line is as tall as
//! its largest glyph.

use unicode_width::UnicodeWidthChar;

use crate::document::{Block, FontFamily, FontSize, Fragment, InlineStyle};

use super::Measure;

/// Indentation applied to list items, in pixels.
pub const LIST_INDENT_PX: u32 = 40;

/// Default content width of a page, in pixels.
pub const DEFAULT_PAGE_WIDTH_PX: u32 = 600;

/// Widest page the layout accepts, in pixels.
pub const MAX_PAGE_WIDTH_PX: u32 = 100_000;

/// Average glyph advance as a fraction (per mille) of the font size.
const fn advance_ratio(font: FontFamily) -> u32 {
    match font {
        FontFamily::Arial => 550,
        FontFamily::Verdana => 620,
        FontFamily::TimesNewRoman => 500,
        FontFamily::CourierNew => 600,
        FontFamily::Georgia => 560,
    }
}

/// Line box height for a glyph of `px` pixels.
pub const fn line_height(px: u32) -> u32 {
    (px * 5).div_ceil(4)
}

/// Pixel typesetter over a fixed content width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    width: u32,
}

impl Default for PixelLayout {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_WIDTH_PX)
    }
}

impl PixelLayout {
    pub fn new(width: u32) -> Self {
        Self {
            width: width.clamp(1, MAX_PAGE_WIDTH_PX),
        }
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Horizontal advance of `ch`, in thousandths of a pixel.
    fn advance(ch: char, style: &InlineStyle) -> u32 {
        let cols = if ch == '\t' {
            4
        } else {
            u32::try_from(ch.width().unwrap_or(0)).unwrap_or(0)
        };
        let mut ratio = advance_ratio(style.effective_font());
        if style.bold {
            ratio += 50;
        }
        style.effective_size().px() * ratio * cols
    }

    fn wrap(&self, block: &Block) -> Wrapper {
        let indent = if block.list.is_some() { LIST_INDENT_PX } else { 0 };
        let avail = self.width.saturating_sub(indent).max(1).saturating_mul(1000);
        let mut wrap = Wrapper::new(avail);
        for run in block.runs() {
            let px = run.style.effective_size().px();
            for ch in run.text.chars() {
                let adv = Self::advance(ch, &run.style);
                if ch.is_whitespace() {
                    wrap.space(adv, px);
                } else {
                    wrap.glyph(adv, px);
                }
            }
        }
        wrap.close();
        wrap
    }

    pub fn block_height(&self, block: &Block) -> u32 {
        self.wrap(block).height
    }

    /// Number of wrapped lines in `block`.
    pub fn block_lines(&self, block: &Block) -> u32 {
        self.wrap(block).lines
    }
}

impl Measure for PixelLayout {
    fn height(&self, fragment: &Fragment) -> u32 {
        fragment
            .blocks()
            .iter()
            .map(|block| self.block_height(block))
            .sum()
    }
}

/// Greedy line breaker accumulating line heights.
struct Wrapper {
    avail: u32,
    height: u32,
    lines: u32,
    line_w: u32,
    line_px: u32,
    word_w: u32,
    word_px: u32,
}

impl Wrapper {
    const fn new(avail: u32) -> Self {
        Self {
            avail,
            height: 0,
            lines: 0,
            line_w: 0,
            line_px: 0,
            word_w: 0,
            word_px: 0,
        }
    }

    fn break_line(&mut self) {
        let px = if self.line_px == 0 {
            FontSize::DEFAULT.px()
        } else {
            self.line_px
        };
        self.height += line_height(px);
        self.lines += 1;
        self.line_w = 0;
        self.line_px = 0;
    }

    fn commit_word(&mut self) {
        if self.word_w == 0 {
            return;
        }
        if self.line_w > 0 && self.line_w.saturating_add(self.word_w) > self.avail {
            self.break_line();
        }
        self.line_w = self.line_w.saturating_add(self.word_w);
        self.line_px = self.line_px.max(self.word_px);
        self.word_w = 0;
        self.word_px = 0;
    }

    fn glyph(&mut self, adv: u32, px: u32) {
        if self.word_w > 0 && self.word_w.saturating_add(adv) > self.avail {
            // The word alone no longer fits a line: give it lines of its own.
            if self.line_w > 0 {
                self.break_line();
            }
            self.line_w = self.word_w;
            self.line_px = self.word_px;
            self.word_w = 0;
            self.word_px = 0;
            self.break_line();
        }
        self.word_w = self.word_w.saturating_add(adv);
        self.word_px = self.word_px.max(px);
    }

    fn space(&mut self, adv: u32, px: u32) {
        self.commit_word();
        // Trailing spaces hang past the edge, but never count for more than a line.
        self.line_w = self.line_w.saturating_add(adv).min(self.avail);
        self.line_px = self.line_px.max(px);
    }

    fn close(&mut self) {
        self.commit_word();
        if self.line_w > 0 || self.lines == 0 {
            self.break_line();
        }
    }
}
