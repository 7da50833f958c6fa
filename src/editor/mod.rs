//! Cursor and selection handling over page fragments.
//!
//! The cursor is a plain value held by the model; every edit takes the
//! fragment it applies to explicitly, fitting the TEA architecture.

mod cursor;

pub use cursor::{Cursor, Direction};
