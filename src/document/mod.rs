//! The document model.
//!
//! This module handles:
//! - The page sequence and its identifiers
//! - The styled fragment held by each page
//! - Reading and writing the marked-up form of a fragment

mod markup;
mod pages;
mod types;

pub use markup::{parse_markup, to_markup};
pub use pages::{Document, Page, PageId};
pub use types::{
    Align, Block, FontFamily, FontSize, Fragment, InlineStyle, ListKind, Run, TextColor,
};
