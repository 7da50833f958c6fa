//! Local persistence of the page sequence.
//!
//! A small key-value store keeps one JSON file per key in a data directory.
//! The document lives under [`PAGES_KEY`] as an array of `{id, content}`
//! records, where `content` is the page's markup.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::document::{Document, Page, PageId, parse_markup, to_markup};

/// Key the page sequence is stored under.
pub const PAGES_KEY: &str = "editorPages";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Persisted form of one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: PageId,
    pub content: String,
}

impl From<&Page> for PageRecord {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id,
            content: to_markup(&page.content),
        }
    }
}

impl From<PageRecord> for Page {
    fn from(record: PageRecord) -> Self {
        Self::new(record.id, parse_markup(&record.content))
    }
}

/// Default data directory, next to the platform config directory.
pub fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("folio").join("data");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("folio");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("folio");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".local").join("share").join("folio");
        }
    }

    PathBuf::from(".folio")
}

/// File-backed key-value store.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    /// Overwrite `key` atomically: write a temp file, then rename over.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.{}.tmp", std::process::id()));
        fs::write(&tmp, value).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Io { path, source })
    }

    /// Remove `key`. A missing key is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    /// Load the persisted document.
    ///
    /// Missing, unreadable or malformed records all yield `None`; the latter
    /// two are logged.
    pub fn load(&self) -> Option<Document> {
        let raw = match self.get(PAGES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "could not read saved pages");
                return None;
            }
        };
        let records: Vec<PageRecord> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "ignoring malformed saved pages");
                return None;
            }
        };
        let count = records.len();
        let doc = Document::from_pages(records.into_iter().map(Page::from).collect());
        if doc.is_none() {
            warn!(count, "ignoring saved pages: empty or duplicate ids");
        } else {
            debug!(count, "loaded saved pages");
        }
        doc
    }

    /// Serialize every page and overwrite the stored record.
    pub fn save(&self, doc: &Document) -> Result<()> {
        let records: Vec<PageRecord> = doc.pages().iter().map(PageRecord::from).collect();
        let json = serde_json::to_string(&records)?;
        self.set(PAGES_KEY, &json)?;
        debug!(pages = records.len(), bytes = json.len(), "saved pages");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.remove(PAGES_KEY)
    }
}
