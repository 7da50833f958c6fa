//! Terminal UI components.
//!
//! - [`page`]: wraps page fragments into terminal rows
//! - [`style`]: text styles and chrome colors

pub mod page;
pub mod style;

mod overlays;
mod render;
mod status;

pub use render::{page_text_width, render};

/// Columns taken by a page's border and horizontal padding.
pub const PAGE_CHROME_WIDTH: u16 = 4;
