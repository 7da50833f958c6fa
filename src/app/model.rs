use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::document::{Document, Fragment, InlineStyle};
use crate::editor::Cursor;
use crate::format::Toolbar;
use crate::paginate::{Paginator, PixelLayout};

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The page sequence being edited
    pub document: Document,
    /// Focused page, cursor offset and selection
    pub cursor: Cursor,
    /// Style applied to the next typed text
    pub typing: InlineStyle,
    /// Picker values shown in the toolbar
    pub toolbar: Toolbar,
    /// Splits pasted overflow into new pages
    pub paginator: Paginator<PixelLayout>,
    /// Terminal size (columns, rows)
    pub size: (u16, u16),
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Text typed into the color prompt, when it is open
    pub color_prompt: Option<String>,
    /// Data directory shown in help
    pub data_dir: Option<PathBuf>,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether the document changed since the last save or load
    pub dirty: bool,
    /// Set after first quit attempt with unsaved changes; allows second quit to proceed
    pub quit_confirmed: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    toast: Option<Toast>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("pages", &self.document.len())
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .field("help_visible", &self.help_visible)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model editing `document`, focused on its last page.
    pub fn new(
        document: Document,
        paginator: Paginator<PixelLayout>,
        terminal_size: (u16, u16),
    ) -> Self {
        let mut model = Self {
            document,
            cursor: Cursor::new(),
            typing: InlineStyle::default(),
            toolbar: Toolbar::default(),
            paginator,
            size: terminal_size,
            help_visible: false,
            color_prompt: None,
            data_dir: None,
            config_global_path: None,
            config_local_path: None,
            dirty: false,
            quit_confirmed: false,
            should_quit: false,
            toast: None,
        };
        model.focus_last_page();
        model
    }

    /// The focused page's content.
    pub fn focused(&self) -> &Fragment {
        let idx = self.cursor.page.min(self.document.len() - 1);
        &self.document.pages()[idx].content
    }

    /// Rendered height of a page, in pixels.
    pub fn page_height(&self, index: usize) -> u32 {
        self.document
            .get(index)
            .map_or(0, |page| self.paginator.height(&page.content))
    }

    /// Whether a page renders taller than the budget.
    pub fn page_overflows(&self, index: usize) -> bool {
        self.page_height(index) > self.paginator.max_height()
    }

    pub(super) fn focus_page(&mut self, index: usize) {
        let index = index.min(self.document.len() - 1);
        self.cursor
            .focus_page(index, &self.document.pages()[index].content);
        self.sync_typing_style();
    }

    pub(super) fn focus_last_page(&mut self) {
        self.focus_page(self.document.len() - 1);
    }

    /// Pick up the style of the text around the cursor for further typing.
    pub(super) fn sync_typing_style(&mut self) {
        let offset = self.cursor.offset;
        self.typing = self.focused().style_at(offset);
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(Document::new(), Paginator::default(), (80, 24))
    }
}
