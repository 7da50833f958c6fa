//! Paste-triggered pagination.
//!
//! Pasted text lands on the last page. While that page renders taller than the
//! budget, the largest prefix that still fits stays put and the remainder moves
//! to a freshly appended page.

mod layout;

pub use layout::{
    DEFAULT_PAGE_WIDTH_PX, LIST_INDENT_PX, MAX_PAGE_WIDTH_PX, PixelLayout, line_height,
};

use tracing::{debug, warn};

use crate::document::{Document, Fragment, PageId};
use crate::perf;

/// Default page height budget, in pixels.
pub const DEFAULT_MAX_HEIGHT_PX: u32 = 750;

/// Upper bound on splits performed for one paste.
const MAX_SPLITS: usize = 10_000;

/// Rendered height of a fragment.
///
/// Implementations must be monotonic over prefixes: a longer prefix of the
/// same fragment never measures shorter.
pub trait Measure {
    fn height(&self, fragment: &Fragment) -> u32;
}

impl<M: Measure + ?Sized> Measure for &M {
    fn height(&self, fragment: &Fragment) -> u32 {
        (**self).height(fragment)
    }
}

/// What a paste did to the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteOutcome {
    /// Pages appended by overflow, in order.
    pub created: Vec<PageId>,
    /// Characters appended to the document.
    pub pasted_chars: usize,
    /// The split cap stopped pagination early.
    pub capped: bool,
}

impl PasteOutcome {
    pub fn overflowed(&self) -> bool {
        !self.created.is_empty()
    }
}

/// Normalize pasted text: line endings become `'\n'`.
pub fn normalize_paste(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Splits overflowing content across pages against a height budget.
#[derive(Debug, Clone)]
pub struct Paginator<M> {
    measure: M,
    max_height: u32,
}

impl Default for Paginator<PixelLayout> {
    fn default() -> Self {
        Self::new(PixelLayout::default(), DEFAULT_MAX_HEIGHT_PX)
    }
}

impl<M: Measure> Paginator<M> {
    pub fn new(measure: M, max_height: u32) -> Self {
        Self {
            measure,
            max_height,
        }
    }

    pub const fn max_height(&self) -> u32 {
        self.max_height
    }

    pub const fn measure(&self) -> &M {
        &self.measure
    }

    pub fn height(&self, fragment: &Fragment) -> u32 {
        self.measure.height(fragment)
    }

    pub fn fits(&self, fragment: &Fragment) -> bool {
        self.height(fragment) <= self.max_height
    }

    /// Append pasted text to the last page and paginate the overflow.
    pub fn paste(&self, doc: &mut Document, text: &str) -> PasteOutcome {
        let _scope = perf::scope("paginate.paste");
        let text = normalize_paste(text);
        let pasted_chars = text.chars().count();
        doc.last_mut().content.append_plain_text(&text);
        perf::log_event(
            "paginate.paste",
            format!("chars={pasted_chars} pages={}", doc.len()),
        );
        let mut outcome = self.paginate_last(doc);
        outcome.pasted_chars = pasted_chars;
        outcome
    }

    /// Split the last page until it fits, appending a page per split.
    pub fn paginate_last(&self, doc: &mut Document) -> PasteOutcome {
        let mut outcome = PasteOutcome::default();
        while !self.fits(&doc.last().content) {
            if outcome.created.len() >= MAX_SPLITS {
                warn!(splits = MAX_SPLITS, "pagination stopped at split cap");
                outcome.capped = true;
                break;
            }
            let content = &doc.last().content;
            let at = self.fit_prefix(content);
            if at >= content.char_len() {
                // Nothing left to move: a lone character or an empty page.
                break;
            }
            let (keep, rest) = content.split_for_page(at);
            debug!(
                page = doc.last().id,
                at,
                kept_height = self.height(&keep),
                "splitting overflowing page"
            );
            doc.last_mut().content = keep;
            let id = doc.push_page(rest);
            outcome.created.push(id);
        }
        outcome
    }

    /// Length of the longest prefix of `fragment` that fits the budget.
    ///
    /// Never less than one character, so each split makes progress even when
    /// a single character is taller than the budget.
    pub fn fit_prefix(&self, fragment: &Fragment) -> usize {
        let total = fragment.char_len();
        if total <= 1 || self.fits(fragment) {
            return total;
        }
        // `lo` fits (or is the forced minimum); `hi` does not.
        let mut lo = 1;
        let mut hi = total;
        if !self.fits(&fragment.prefix(lo)) {
            return lo;
        }
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.fits(&fragment.prefix(mid)) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Align, Block, InlineStyle, Run};
    use proptest::prelude::*;

    /// Ten pixels per character, boundaries included.
    struct PerChar;

    impl Measure for PerChar {
        fn height(&self, fragment: &Fragment) -> u32 {
            u32::try_from(fragment.char_len()).unwrap() * 10
        }
    }

    fn visible(doc: &Document) -> Vec<(char, InlineStyle)> {
        doc.pages()
            .iter()
            .flat_map(|p| p.content.styled_chars().map(|(c, s)| (c, s.clone())))
            .collect()
    }

    #[test]
    fn test_fitting_paste_appends_without_new_pages() {
        let paginator = Paginator::new(PerChar, 750);
        let mut doc = Document::new();
        doc.last_mut().content = Fragment::from_plain_text("hello");
        let outcome = paginator.paste(&mut doc, " world");
        assert!(!outcome.overflowed());
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.last().content.plain_text(), "hello world");
    }

    #[test]
    fn test_overflow_from_700_to_900_splits_once() {
        let paginator = Paginator::new(PerChar, 750);
        let mut doc = Document::new();
        doc.last_mut().content = Fragment::from_plain_text(&"a".repeat(70));
        let outcome = paginator.paste(&mut doc, &"b".repeat(20));

        assert_eq!(outcome.created, vec![2]);
        assert_eq!(doc.len(), 2);
        for page in doc.pages() {
            assert!(paginator.height(&page.content) <= 750);
        }
        assert_eq!(doc.pages()[0].content.char_len(), 75);
        let joined: String = doc.pages().iter().map(|p| p.content.plain_text()).collect();
        assert_eq!(joined, format!("{}{}", "a".repeat(70), "b".repeat(20)));
    }

    #[test]
    fn test_only_last_page_is_split() {
        let paginator = Paginator::new(PerChar, 50);
        let mut doc = Document::new();
        doc.last_mut().content = Fragment::from_plain_text(&"x".repeat(20));
        doc.add_page();
        let outcome = paginator.paste(&mut doc, "0123456789");
        assert_eq!(doc.pages()[0].content.char_len(), 20);
        assert_eq!(outcome.created.len(), 1);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_character_taller_than_budget_still_terminates() {
        let paginator = Paginator::new(PerChar, 5);
        let mut doc = Document::new();
        let outcome = paginator.paste(&mut doc, "abc");
        assert!(!outcome.capped);
        assert_eq!(doc.len(), 3);
        for page in doc.pages() {
            assert_eq!(page.content.char_len(), 1);
        }
    }

    #[test]
    fn test_split_on_block_boundary_consumes_newline() {
        let paginator = Paginator::new(PerChar, 30);
        let mut doc = Document::new();
        paginator.paste(&mut doc, "abc\ndef");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.pages()[0].content.plain_text(), "abc");
        assert_eq!(doc.pages()[1].content.plain_text(), "def");
    }

    #[test]
    fn test_mid_block_split_keeps_alignment() {
        let paginator = Paginator::new(PerChar, 40);
        let mut doc = Document::new();
        doc.last_mut().content = Fragment::from_blocks(vec![Block::with_runs(
            Align::Center,
            None,
            vec![Run::plain("centered")],
        )]);
        paginator.paginate_last(&mut doc);
        assert!(doc.len() > 1);
        for page in doc.pages() {
            assert_eq!(page.content.blocks()[0].align, Align::Center);
        }
    }

    #[test]
    fn test_paste_normalizes_line_endings() {
        assert_eq!(normalize_paste("a\r\nb\rc"), "a\nb\nc");
        let paginator = Paginator::default();
        let mut doc = Document::new();
        paginator.paste(&mut doc, "one\r\ntwo");
        assert_eq!(doc.last().content.blocks().len(), 2);
    }

    #[test]
    fn test_pixel_layout_paste_respects_budget() {
        let paginator = Paginator::new(PixelLayout::new(300), 200);
        let mut doc = Document::new();
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(40);
        let outcome = paginator.paste(&mut doc, &text);
        assert!(outcome.overflowed());
        for page in doc.pages() {
            assert!(paginator.height(&page.content) <= 200);
        }
    }

    #[test]
    fn test_paste_survives_huge_width_and_whitespace() {
        let paginator = Paginator::new(PixelLayout::new(5_000_000), 750);
        let mut doc = Document::new();
        paginator.paste(&mut doc, "hello");
        assert_eq!(doc.len(), 1);

        let paginator = Paginator::<PixelLayout>::default();
        let mut doc = Document::new();
        let outcome = paginator.paste(&mut doc, &"\t".repeat(200_000));
        assert!(!outcome.overflowed());
        assert_eq!(doc.last().content.char_len(), 200_000);
    }

    proptest! {
        #[test]
        fn prop_paste_preserves_content_and_budget(
            existing in "[a-z ]{0,80}",
            pasted in "[a-zA-Z .\n]{0,300}",
            gap in prop_oneof![Just(String::new()), "[ \t]{1,2000}"],
            budget in 40u32..300,
        ) {
            let paginator = Paginator::new(PixelLayout::new(160), budget);
            let mut doc = Document::new();
            doc.last_mut().content = Fragment::from_plain_text(&existing);
            paginator.paginate_last(&mut doc);
            let before = visible(&doc);

            let pasted = format!("{pasted}{gap}{pasted}");
            paginator.paste(&mut doc, &pasted);

            let mut expected = before;
            expected.extend(
                pasted
                    .chars()
                    .filter(|c| *c != '\n')
                    .map(|c| (c, InlineStyle::default())),
            );
            prop_assert_eq!(visible(&doc), expected);
            for page in doc.pages() {
                prop_assert!(paginator.height(&page.content) <= budget);
            }
        }
    }
}
