//! The page sequence.

use super::types::Fragment;

/// Page identifier. Unique within a document, never renumbered.
pub type PageId = u32;

/// One page of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: PageId,
    pub content: Fragment,
}

impl Page {
    pub fn new(id: PageId, content: Fragment) -> Self {
        Self { id, content }
    }

    pub fn empty(id: PageId) -> Self {
        Self::new(id, Fragment::empty())
    }
}

/// The ordered sequence of pages.
///
/// Holds at least one page at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pages: Vec<Page>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document with a single empty page.
    pub fn new() -> Self {
        Self {
            pages: vec![Page::empty(1)],
        }
    }

    /// Build from existing pages. Rejects an empty list and duplicate ids.
    pub fn from_pages(pages: Vec<Page>) -> Option<Self> {
        if pages.is_empty() {
            return None;
        }
        let mut ids: Vec<PageId> = pages.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|w| w[0] == w[1]) {
            return None;
        }
        Some(Self { pages })
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn pages_mut(&mut self) -> &mut [Page] {
        &mut self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn position(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn last(&self) -> &Page {
        &self.pages[self.pages.len() - 1]
    }

    pub fn last_mut(&mut self) -> &mut Page {
        let idx = self.pages.len() - 1;
        &mut self.pages[idx]
    }

    /// The identifier the next appended page receives.
    pub fn next_id(&self) -> PageId {
        self.pages.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    /// Append a page holding `content`, returning its id.
    pub fn push_page(&mut self, content: Fragment) -> PageId {
        let id = self.next_id();
        self.pages.push(Page::new(id, content));
        id
    }

    /// Append an empty page, returning its id.
    pub fn add_page(&mut self) -> PageId {
        self.push_page(Fragment::empty())
    }

    /// Remove the page with `id`. Returns whether a page was removed.
    ///
    /// Removing the only page replaces it with a fresh empty page.
    pub fn delete_page(&mut self, id: PageId) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        if self.pages.len() == 1 {
            let fresh = self.next_id();
            self.pages[0] = Page::empty(fresh);
        } else {
            self.pages.remove(idx);
        }
        true
    }

    /// Back to a single empty page with id 1.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
