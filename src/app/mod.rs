//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, TOAST_TTL, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::paginate::{DEFAULT_MAX_HEIGHT_PX, DEFAULT_PAGE_WIDTH_PX};
use crate::storage::LocalStore;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    store: LocalStore,
    page_height: u32,
    page_width: u32,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application persisting into `data_dir`.
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            store: LocalStore::new(data_dir),
            page_height: DEFAULT_MAX_HEIGHT_PX,
            page_width: DEFAULT_PAGE_WIDTH_PX,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Set the page height budget, in pixels.
    pub fn with_page_height(mut self, px: Option<u32>) -> Self {
        if let Some(px) = px.filter(|px| *px > 0) {
            self.page_height = px;
        }
        self
    }

    /// Set the page content width, in pixels.
    pub fn with_page_width(mut self, px: Option<u32>) -> Self {
        if let Some(px) = px.filter(|px| *px > 0) {
            self.page_width = px;
        }
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}

#[cfg(test)]
mod tests;
