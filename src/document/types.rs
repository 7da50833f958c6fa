//! Core document types.
//!
//! A page's content is a [`Fragment`]: an ordered list of [`Block`]s, each
//! holding styled [`Run`]s. Character offsets into a fragment count every
//! block boundary as one character, so the plain text of a fragment is its
//! blocks joined with `'\n'`.

use std::fmt;
use std::ops::Range;

/// Horizontal alignment of a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// CSS `text-align` keyword.
    pub const fn css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    pub fn from_css(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" | "justify" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            _ => None,
        }
    }
}

/// List kind of a block that is a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Ordered => "ol",
            Self::Unordered => "ul",
        }
    }
}

/// An RGB text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TextColor {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `#rgb`, `rgb(r, g, b)` or a handful of color names.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(inner) = value
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>());
            let r = parts.next()?.ok()?;
            let g = parts.next()?.ok()?;
            let b = parts.next()?.ok()?;
            if parts.next().is_some() {
                return None;
            }
            return Some(Self::new(r, g, b));
        }
        match value.as_str() {
            "black" => Some(Self::BLACK),
            "white" => Some(Self::new(255, 255, 255)),
            "red" => Some(Self::new(255, 0, 0)),
            "green" => Some(Self::new(0, 128, 0)),
            "blue" => Some(Self::new(0, 0, 255)),
            "gray" | "grey" => Some(Self::new(128, 128, 128)),
            _ => None,
        }
    }
}

impl Default for TextColor {
    fn default() -> Self {
        Self::BLACK
    }
}

fn parse_hex(hex: &str) -> Option<TextColor> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(TextColor::new(
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
            Some(TextColor::new(digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The fixed set of font families offered by the toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontFamily {
    #[default]
    Arial,
    Verdana,
    TimesNewRoman,
    CourierNew,
    Georgia,
}

impl FontFamily {
    pub const ALL: [Self; 5] = [
        Self::Arial,
        Self::Verdana,
        Self::TimesNewRoman,
        Self::CourierNew,
        Self::Georgia,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Arial => "Arial",
            Self::Verdana => "Verdana",
            Self::TimesNewRoman => "Times New Roman",
            Self::CourierNew => "Courier New",
            Self::Georgia => "Georgia",
        }
    }

    /// Match a family name, ignoring case and surrounding quotes.
    ///
    /// A CSS family list resolves to its first known entry.
    pub fn from_name(value: &str) -> Option<Self> {
        value.split(',').find_map(|candidate| {
            let candidate = candidate.trim().trim_matches(|c| c == '"' || c == '\'');
            Self::ALL
                .into_iter()
                .find(|family| family.name().eq_ignore_ascii_case(candidate))
        })
    }

    /// The next family in toolbar order, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// One of the seven named font sizes (1..=7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontSize(u8);

impl FontSize {
    const PIXELS: [u32; 7] = [8, 10, 12, 14, 18, 24, 36];

    pub const DEFAULT: Self = Self(3);

    pub const fn new(level: u8) -> Option<Self> {
        if level >= 1 && level <= 7 {
            Some(Self(level))
        } else {
            None
        }
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    pub const fn px(self) -> u32 {
        Self::PIXELS[(self.0 - 1) as usize]
    }

    /// Exact pixel match only; other sizes are not representable.
    pub fn from_px(px: u32) -> Option<Self> {
        Self::PIXELS
            .iter()
            .position(|p| *p == px)
            .and_then(|idx| u8::try_from(idx + 1).ok())
            .map(Self)
    }

    /// Parse either a level (`"3"`) or a CSS pixel size (`"12px"`).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(px) = value.strip_suffix("px") {
            let px: f32 = px.trim().parse().ok()?;
            if !px.is_finite() || px < 0.0 {
                return None;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            return Self::from_px(px.round() as u32);
        }
        value.parse::<u8>().ok().and_then(Self::new)
    }

    pub fn larger(self) -> Self {
        Self(self.0.saturating_add(1).min(7))
    }

    pub fn smaller(self) -> Self {
        Self(self.0.saturating_sub(1).max(1))
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Inline formatting carried by a run of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<TextColor>,
    pub font: Option<FontFamily>,
    pub size: Option<FontSize>,
}

impl InlineStyle {
    pub fn is_plain(&self) -> bool {
        self == &Self::default()
    }

    pub fn effective_size(&self) -> FontSize {
        self.size.unwrap_or_default()
    }

    pub fn effective_font(&self) -> FontFamily {
        self.font.unwrap_or_default()
    }
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: InlineStyle,
}

impl Run {
    pub fn new(text: impl Into<String>, style: InlineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, InlineStyle::default())
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A paragraph or list item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub align: Align,
    pub list: Option<ListKind>,
    runs: Vec<Run>,
}

impl Block {
    pub fn new(align: Align, list: Option<ListKind>) -> Self {
        Self {
            align,
            list,
            runs: Vec::new(),
        }
    }

    pub fn with_runs(align: Align, list: Option<ListKind>, runs: Vec<Run>) -> Self {
        let mut block = Self { align, list, runs };
        block.normalize();
        block
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn char_len(&self) -> usize {
        self.runs.iter().map(Run::char_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Same alignment and list kind, no text.
    fn empty_like(&self) -> Self {
        Self::new(self.align, self.list)
    }

    pub fn push_text(&mut self, text: &str, style: &InlineStyle) {
        if text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if &last.style == style => last.text.push_str(text),
            _ => self.runs.push(Run::new(text, style.clone())),
        }
    }

    fn append_runs(&mut self, runs: Vec<Run>) {
        self.runs.extend(runs);
        self.normalize();
    }

    /// Merge adjacent runs with equal styles and drop empty runs.
    fn normalize(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.text.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.style == run.style => last.text.push_str(&run.text),
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }

    /// Split at a character index. Both halves keep alignment and list kind.
    fn split_at(&self, at: usize) -> (Self, Self) {
        let mut head = self.empty_like();
        let mut tail = self.empty_like();
        let mut seen = 0;
        for run in &self.runs {
            let len = run.char_len();
            if seen + len <= at {
                head.runs.push(run.clone());
            } else if seen >= at {
                tail.runs.push(run.clone());
            } else {
                let byte = byte_offset(&run.text, at - seen);
                head.runs.push(Run::new(&run.text[..byte], run.style.clone()));
                tail.runs.push(Run::new(&run.text[byte..], run.style.clone()));
            }
            seen += len;
        }
        head.normalize();
        tail.normalize();
        (head, tail)
    }

    /// Apply `f` to the style of characters in `range` (block-local offsets).
    fn restyle(&mut self, range: Range<usize>, f: &dyn Fn(&mut InlineStyle)) {
        if range.is_empty() {
            return;
        }
        let (head, rest) = self.split_at(range.start);
        let (mut middle, tail) = rest.split_at(range.end - range.start);
        for run in &mut middle.runs {
            f(&mut run.style);
        }
        let mut runs = head.runs;
        runs.extend(middle.runs);
        runs.extend(tail.runs);
        self.runs = runs;
        self.normalize();
    }

    fn style_at(&self, at: usize) -> Option<&InlineStyle> {
        let mut seen = 0;
        for run in &self.runs {
            seen += run.char_len();
            if at < seen {
                return Some(&run.style);
            }
        }
        None
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i)
}

/// The parsed content of one page.
///
/// Always holds at least one block; an empty fragment is a single empty block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    blocks: Vec<Block>,
}

impl Default for Fragment {
    fn default() -> Self {
        Self::empty()
    }
}

impl Fragment {
    pub fn empty() -> Self {
        Self {
            blocks: vec![Block::default()],
        }
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            Self::empty()
        } else {
            Self { blocks }
        }
    }

    /// Unstyled text; every `'\n'` starts a new block.
    pub fn from_plain_text(text: &str) -> Self {
        let mut fragment = Self::empty();
        fragment.insert_text(0, text, &InlineStyle::default());
        fragment
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.len() == 1 && self.blocks[0].is_empty()
    }

    /// Length in characters, counting each block boundary as one.
    pub fn char_len(&self) -> usize {
        self.blocks.iter().map(Block::char_len).sum::<usize>() + self.blocks.len() - 1
    }

    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Visible characters with their styles, block boundaries excluded.
    pub fn styled_chars(&self) -> impl Iterator<Item = (char, &InlineStyle)> {
        self.blocks
            .iter()
            .flat_map(|b| b.runs.iter())
            .flat_map(|r| r.text.chars().map(move |c| (c, &r.style)))
    }

    /// Map an offset to `(block index, offset within block)`.
    ///
    /// Offsets past the end clamp to the end of the last block.
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        let mut remaining = offset;
        for (idx, block) in self.blocks.iter().enumerate() {
            let len = block.char_len();
            if remaining <= len {
                return (idx, remaining);
            }
            remaining -= len + 1;
        }
        let last = self.blocks.len() - 1;
        (last, self.blocks[last].char_len())
    }

    /// Offset of the first character of block `idx`.
    pub fn block_start(&self, idx: usize) -> usize {
        self.blocks
            .iter()
            .take(idx)
            .map(|b| b.char_len() + 1)
            .sum()
    }

    /// Exact split: `left.plain_text() + right.plain_text()` equals the original.
    fn split_exact(&self, at: usize) -> (Vec<Block>, Vec<Block>) {
        let (idx, inner) = self.locate(at);
        let (head, tail) = self.blocks[idx].split_at(inner);
        let mut left = self.blocks[..idx].to_vec();
        left.push(head);
        let mut right = vec![tail];
        right.extend_from_slice(&self.blocks[idx + 1..]);
        (left, right)
    }

    /// Rejoin halves produced by [`Self::split_exact`], merging the seam blocks.
    fn join_exact(mut left: Vec<Block>, right: Vec<Block>) -> Self {
        let mut right = right.into_iter();
        if let (Some(seam), Some(first)) = (left.last_mut(), right.next()) {
            seam.append_runs(first.runs);
        }
        left.extend(right);
        Self::from_blocks(left)
    }

    /// Split into two well-formed fragments at a page boundary.
    ///
    /// A split landing on a block boundary consumes the boundary instead of
    /// leaving an empty block behind on either side. The split never yields an
    /// empty left half when `at > 0`.
    pub fn split_for_page(&self, at: usize) -> (Self, Self) {
        let (idx, inner) = self.locate(at);
        let (mut left, mut right) = self.split_exact(at);
        if inner == 0 && idx > 0 && left.last().is_some_and(Block::is_empty) {
            left.pop();
        } else if idx + 1 < self.blocks.len()
            && inner == self.blocks[idx].char_len()
            && right.first().is_some_and(Block::is_empty)
        {
            right.remove(0);
        }
        (Self::from_blocks(left), Self::from_blocks(right))
    }

    /// The fragment truncated to `len` characters, as page splitting would keep it.
    pub fn prefix(&self, len: usize) -> Self {
        self.split_for_page(len).0
    }

    /// Insert text at `offset`, returning the offset just past the insertion.
    pub fn insert_text(&mut self, offset: usize, text: &str, style: &InlineStyle) -> usize {
        let offset = offset.min(self.char_len());
        if text.is_empty() {
            return offset;
        }
        let (mut left, right) = self.split_exact(offset);
        let mut segments = text.split('\n');
        if let (Some(first), Some(seam)) = (segments.next(), left.last_mut()) {
            seam.push_text(first, style);
        }
        for segment in segments {
            let mut block = left.last().map_or_else(Block::default, Block::empty_like);
            block.push_text(segment, style);
            left.push(block);
        }
        *self = Self::join_exact(left, right);
        offset + text.chars().count()
    }

    /// Append unstyled text at the end.
    pub fn append_plain_text(&mut self, text: &str) {
        let end = self.char_len();
        self.insert_text(end, text, &InlineStyle::default());
    }

    /// Remove the characters in `range`; removing a boundary joins two blocks.
    pub fn delete_range(&mut self, range: Range<usize>) {
        let end = range.end.min(self.char_len());
        if range.start >= end {
            return;
        }
        let (left, _) = self.split_exact(range.start);
        let (_, right) = self.split_exact(end);
        *self = Self::join_exact(left, right);
    }

    /// Apply `f` to every character style within `range`.
    pub fn restyle(&mut self, range: Range<usize>, f: impl Fn(&mut InlineStyle)) {
        let mut start = 0;
        for block in &mut self.blocks {
            let len = block.char_len();
            let lo = range.start.max(start);
            let hi = range.end.min(start + len);
            if lo < hi {
                block.restyle(lo - start..hi - start, &f);
            }
            start += len + 1;
        }
    }

    /// Whether every visible character in `range` satisfies `pred`.
    ///
    /// Ranges containing no visible characters yield `false`.
    pub fn all_styled(&self, range: Range<usize>, pred: impl Fn(&InlineStyle) -> bool) -> bool {
        let mut any = false;
        let mut start = 0;
        for block in &self.blocks {
            let len = block.char_len();
            let lo = range.start.max(start);
            let hi = range.end.min(start + len);
            for at in lo..hi {
                if let Some(style) = block.style_at(at - start) {
                    if !pred(style) {
                        return false;
                    }
                    any = true;
                }
            }
            start += len + 1;
        }
        any
    }

    /// Indices of blocks touched by `range`; a collapsed range touches its block.
    pub fn blocks_in(&self, range: Range<usize>) -> Range<usize> {
        let (first, _) = self.locate(range.start);
        let (mut last, inner) = self.locate(range.end);
        if range.end > range.start && inner == 0 && last > first {
            last -= 1;
        }
        first..last + 1
    }

    pub fn block_mut(&mut self, idx: usize) -> Option<&mut Block> {
        self.blocks.get_mut(idx)
    }

    /// Style a character typed at `offset` inherits: the preceding character
    /// in the same block, else the following one.
    pub fn style_at(&self, offset: usize) -> InlineStyle {
        let (idx, inner) = self.locate(offset);
        let block = &self.blocks[idx];
        inner
            .checked_sub(1)
            .and_then(|prev| block.style_at(prev))
            .or_else(|| block.style_at(inner))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> InlineStyle {
        InlineStyle {
            bold: true,
            ..InlineStyle::default()
        }
    }

    #[test]
    fn test_empty_fragment_has_one_block() {
        let fragment = Fragment::empty();
        assert_eq!(fragment.blocks().len(), 1);
        assert!(fragment.is_empty());
        assert_eq!(fragment.char_len(), 0);
    }

    #[test]
    fn test_plain_text_newlines_start_blocks() {
        let fragment = Fragment::from_plain_text("one\ntwo\n\nfour");
        assert_eq!(fragment.blocks().len(), 4);
        assert_eq!(fragment.plain_text(), "one\ntwo\n\nfour");
        assert_eq!(fragment.char_len(), 13);
    }

    #[test]
    fn test_locate_counts_boundaries() {
        let fragment = Fragment::from_plain_text("ab\ncd");
        assert_eq!(fragment.locate(0), (0, 0));
        assert_eq!(fragment.locate(2), (0, 2));
        assert_eq!(fragment.locate(3), (1, 0));
        assert_eq!(fragment.locate(5), (1, 2));
        assert_eq!(fragment.locate(99), (1, 2));
        assert_eq!(fragment.block_start(1), 3);
    }

    #[test]
    fn test_insert_text_in_middle_keeps_style_of_neighbours() {
        let mut fragment = Fragment::empty();
        fragment.insert_text(0, "held", &InlineStyle::default());
        let end = fragment.insert_text(2, "XY", &bold());
        assert_eq!(end, 4);
        assert_eq!(fragment.plain_text(), "heXYld");
        let runs = fragment.blocks()[0].runs();
        assert_eq!(runs.len(), 3);
        assert!(runs[1].style.bold);
    }

    #[test]
    fn test_insert_newline_splits_block_and_keeps_alignment() {
        let mut fragment = Fragment::from_plain_text("hello");
        fragment.block_mut(0).unwrap().align = Align::Center;
        fragment.insert_text(2, "\n", &InlineStyle::default());
        assert_eq!(fragment.plain_text(), "he\nllo");
        assert_eq!(fragment.blocks()[1].align, Align::Center);
    }

    #[test]
    fn test_delete_range_joins_blocks() {
        let mut fragment = Fragment::from_plain_text("ab\ncd");
        fragment.delete_range(1..4);
        assert_eq!(fragment.plain_text(), "ad");
        assert_eq!(fragment.blocks().len(), 1);
    }

    #[test]
    fn test_delete_range_past_end_is_clamped() {
        let mut fragment = Fragment::from_plain_text("abc");
        fragment.delete_range(2..10);
        assert_eq!(fragment.plain_text(), "ab");
        fragment.delete_range(5..9);
        assert_eq!(fragment.plain_text(), "ab");
    }

    #[test]
    fn test_restyle_splits_runs_at_range_edges() {
        let mut fragment = Fragment::from_plain_text("abcdef");
        fragment.restyle(2..4, |s| s.bold = true);
        let runs = fragment.blocks()[0].runs();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1].text, "cd");
        assert!(runs[1].style.bold);
        assert!(fragment.all_styled(2..4, |s| s.bold));
        assert!(!fragment.all_styled(1..4, |s| s.bold));
    }

    #[test]
    fn test_restyle_merges_back_into_single_run() {
        let mut fragment = Fragment::from_plain_text("abcdef");
        fragment.restyle(2..4, |s| s.bold = true);
        fragment.restyle(0..6, |s| s.bold = false);
        assert_eq!(fragment.blocks()[0].runs().len(), 1);
    }

    #[test]
    fn test_all_styled_on_empty_range_is_false() {
        let fragment = Fragment::from_plain_text("abc");
        assert!(!fragment.all_styled(1..1, |_| true));
    }

    #[test]
    fn test_blocks_in_excludes_block_starting_at_range_end() {
        let fragment = Fragment::from_plain_text("ab\ncd\nef");
        assert_eq!(fragment.blocks_in(0..3), 0..1);
        assert_eq!(fragment.blocks_in(0..4), 0..2);
        assert_eq!(fragment.blocks_in(4..4), 1..2);
    }

    #[test]
    fn test_split_for_page_mid_block_continues_formatting() {
        let mut fragment = Fragment::from_plain_text("hello world");
        fragment.block_mut(0).unwrap().list = Some(ListKind::Ordered);
        let (left, right) = fragment.split_for_page(5);
        assert_eq!(left.plain_text(), "hello");
        assert_eq!(right.plain_text(), " world");
        assert_eq!(right.blocks()[0].list, Some(ListKind::Ordered));
    }

    #[test]
    fn test_split_for_page_consumes_block_boundary() {
        let fragment = Fragment::from_plain_text("ab\ncd");
        let (left, right) = fragment.split_for_page(2);
        assert_eq!(left.plain_text(), "ab");
        assert_eq!(right.plain_text(), "cd");
        let (left, right) = fragment.split_for_page(3);
        assert_eq!(left.plain_text(), "ab");
        assert_eq!(right.plain_text(), "cd");
    }

    #[test]
    fn test_split_for_page_keeps_genuine_empty_paragraph() {
        let fragment = Fragment::from_plain_text("ab\n\ncd");
        let (left, right) = fragment.split_for_page(3);
        assert_eq!(left.plain_text(), "ab");
        assert_eq!(right.plain_text(), "\ncd");
    }

    #[test]
    fn test_style_at_prefers_preceding_character() {
        let mut fragment = Fragment::from_plain_text("ab");
        fragment.restyle(0..1, |s| s.italic = true);
        assert!(fragment.style_at(1).italic);
        assert!(!fragment.style_at(2).italic);
        assert!(fragment.style_at(0).italic);
    }

    #[test]
    fn test_color_parsing_variants() {
        assert_eq!(TextColor::parse("#ff0000"), Some(TextColor::new(255, 0, 0)));
        assert_eq!(TextColor::parse("#0f0"), Some(TextColor::new(0, 255, 0)));
        assert_eq!(
            TextColor::parse("rgb(1, 2, 3)"),
            Some(TextColor::new(1, 2, 3))
        );
        assert_eq!(TextColor::parse("#12345"), None);
        assert_eq!(TextColor::parse("nope"), None);
        assert_eq!(TextColor::new(0, 171, 255).to_string(), "#00abff");
    }

    #[test]
    fn test_font_size_mapping() {
        let sizes: Vec<u32> = (1..=7)
            .filter_map(FontSize::new)
            .map(FontSize::px)
            .collect();
        assert_eq!(sizes, vec![8, 10, 12, 14, 18, 24, 36]);
        assert_eq!(FontSize::parse("18px"), FontSize::new(5));
        assert_eq!(FontSize::parse("4"), FontSize::new(4));
        assert_eq!(FontSize::parse("13px"), None);
        assert_eq!(FontSize::parse("9"), None);
        assert_eq!(FontSize::DEFAULT.px(), 12);
    }

    #[test]
    fn test_font_family_lookup_and_cycle() {
        assert_eq!(
            FontFamily::from_name("'Times New Roman', serif"),
            Some(FontFamily::TimesNewRoman)
        );
        assert_eq!(FontFamily::from_name("comic sans"), None);
        assert_eq!(FontFamily::Georgia.next(), FontFamily::Arial);
    }
}
