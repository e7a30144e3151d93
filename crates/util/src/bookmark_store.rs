//! Bookmark persistence.
//!
//! This module exposes the repository seam the UI layers depend on, along
//! with a JSON-backed implementation (tilde expansion, config directory
//! fallback) and an in-memory fake for tests.
//!
//! On disk the store is a plain JSON array of `{"name", "url"}` objects. A
//! missing file is an empty list, never an error; an unparsable file is
//! logged and treated as empty so a corrupt store never blocks startup.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dirs_next::{config_dir, home_dir};
use huemark_types::Bookmark;
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable controlling the bookmarks file location.
pub const BOOKMARKS_PATH_ENV: &str = "HUEMARK_BOOKMARKS_PATH";

/// Default filename for the persisted bookmark list.
pub const BOOKMARKS_FILE_NAME: &str = "bookmarks.json";

/// Errors surfaced by bookmark store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O failure while reading or writing the bookmarks file.
    #[error("bookmarks I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("bookmarks serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Shared trait implemented by bookmark persistence backends.
///
/// The TUI and CLI only see this trait, so tests can substitute
/// [`InMemoryBookmarkStore`] for the durable backend.
pub trait BookmarkStore: Send + Sync {
    /// All bookmarks in insertion order.
    fn list(&self) -> Result<Vec<Bookmark>, StoreError>;

    /// Append a bookmark to the end of the list and persist.
    fn append(&self, bookmark: Bookmark) -> Result<(), StoreError>;

    /// Remove every entry matching exactly on both fields and persist.
    /// Returns the number of entries removed.
    fn remove_matching(&self, name: &str, url: &str) -> Result<usize, StoreError>;
}

fn remove_from(entries: &mut Vec<Bookmark>, name: &str, url: &str) -> usize {
    let before = entries.len();
    entries.retain(|b| !b.matches(name, url));
    before - entries.len()
}

/// JSON-backed bookmark store persisted on disk.
pub struct JsonBookmarkStore {
    path: PathBuf,
    entries: Mutex<Vec<Bookmark>>,
}

impl JsonBookmarkStore {
    /// Create a new store at the provided path (or the default path when
    /// omitted), loading whatever is already persisted there.
    pub fn new<P: Into<Option<PathBuf>>>(path: P) -> Result<Self, StoreError> {
        let resolved_path = match path.into() {
            Some(path) => expand_tilde_path(path),
            None => default_bookmarks_path(),
        };

        let entries = load_bookmarks_file(&resolved_path)?;
        Ok(Self {
            path: resolved_path,
            entries: Mutex::new(entries),
        })
    }

    /// Initialize a store at the default location.
    pub fn with_defaults() -> Result<Self, StoreError> {
        Self::new(None::<PathBuf>)
    }

    /// Access the underlying bookmarks path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_locked(&self, entries: &[Bookmark]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)?;
        debug!("saved {} bookmarks to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl BookmarkStore for JsonBookmarkStore {
    fn list(&self) -> Result<Vec<Bookmark>, StoreError> {
        let entries = self.entries.lock().expect("bookmarks lock poisoned");
        Ok(entries.clone())
    }

    fn append(&self, bookmark: Bookmark) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("bookmarks lock poisoned");
        entries.push(bookmark);
        self.save_locked(&entries)
    }

    fn remove_matching(&self, name: &str, url: &str) -> Result<usize, StoreError> {
        let mut entries = self.entries.lock().expect("bookmarks lock poisoned");
        let removed = remove_from(&mut entries, name, url);
        if removed > 0 {
            self.save_locked(&entries)?;
        }
        Ok(removed)
    }
}

/// In-memory bookmark store primarily used for unit testing.
#[derive(Default)]
pub struct InMemoryBookmarkStore {
    entries: Mutex<Vec<Bookmark>>,
}

impl InMemoryBookmarkStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookmarkStore for InMemoryBookmarkStore {
    fn list(&self) -> Result<Vec<Bookmark>, StoreError> {
        let entries = self.entries.lock().expect("bookmarks lock poisoned");
        Ok(entries.clone())
    }

    fn append(&self, bookmark: Bookmark) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("bookmarks lock poisoned");
        entries.push(bookmark);
        Ok(())
    }

    fn remove_matching(&self, name: &str, url: &str) -> Result<usize, StoreError> {
        let mut entries = self.entries.lock().expect("bookmarks lock poisoned");
        Ok(remove_from(&mut entries, name, url))
    }
}

fn expand_tilde_path(path: PathBuf) -> PathBuf {
    if let Some(first) = path.components().next()
        && first.as_os_str() != "~"
    {
        return path;
    }

    let input = path.to_string_lossy();
    let trimmed = input.trim();

    if trimmed == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }

    if let Some(rest) = trimmed.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }

    if let Some(rest) = trimmed.strip_prefix("~\\") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }

    PathBuf::from(trimmed)
}

fn default_bookmarks_path() -> PathBuf {
    if let Ok(path) = env::var(BOOKMARKS_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde_path(PathBuf::from(path));
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("huemark")
        .join(BOOKMARKS_FILE_NAME)
}

fn load_bookmarks_file(path: &Path) -> Result<Vec<Bookmark>, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<Vec<Bookmark>>(&content) {
            Ok(entries) => Ok(entries),
            Err(error) => {
                warn!("Failed to parse bookmarks file at {}: {}", path.display(), error);
                Ok(Vec::new())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(error) => Err(StoreError::Io(error)),
    }
}
