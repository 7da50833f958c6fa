// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. format::FormatCommand)
    clippy::module_name_repetitions
)]

//! # Folio
//!
//! A paginated rich-text editor for the terminal.
//!
//! Folio edits a sequence of fixed-height pages:
//! - Inline bold, italic, underline, color, font and size
//! - Paragraph alignment and lists
//! - Pasted text overflows into new pages automatically
//! - Pages persist to a local JSON record
//!
//! ## Architecture
//!
//! Folio uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: Styled page content and its markup
//! - [`editor`]: Cursor movement and text edits
//! - [`format`]: Formatting commands
//! - [`paginate`]: Height measurement and page splitting
//! - [`storage`]: Local persistence
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod format;
pub mod paginate;
pub mod perf;
pub mod storage;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{Document, Fragment, Page, PageId};
    pub use crate::paginate::{Paginator, PixelLayout};
    pub use crate::storage::LocalStore;
}
