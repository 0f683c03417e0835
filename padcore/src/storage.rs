//! Storage plumbing for plainpad.
//!
//! The preference store and file access are capability traits so the
//! editor session can run against fakes in tests. The disk-backed
//! implementations live here, alongside recent-files tracking and
//! config-path discovery.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

// -------------------------------------------------------------------
// Preference store
// -------------------------------------------------------------------

/// String key-value persistence, synchronous and process-local.
pub trait PrefStore {
    /// Fetch a stored value; `None` when the key was never set.
    fn get(&self, key: &str) -> Option<String>;
    /// Store a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str);
    /// Drop a key entirely.
    fn remove(&mut self, key: &str);
}

/// Disk-backed store: one JSON object, flushed on every change.
/// A failed flush is reported to stderr and the in-memory value kept,
/// so a read-only config directory degrades to session-only prefs.
#[derive(Debug)]
pub struct JsonPrefStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonPrefStore {
    /// Open the store at `path`, loading any existing contents.
    /// A missing or unreadable file starts empty.
    pub fn open(path: PathBuf) -> Self {
        let values = std::fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default();
        Self { path, values }
    }

    /// Open the store at its default location for `app_name`.
    pub fn open_default(app_name: &str) -> Self {
        Self::open(config_dir(app_name).join("prefs.json"))
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    fn flush_or_report(&self) {
        if let Err(e) = self.flush() {
            eprintln!("failed to write {}: {}", self.path.display(), e);
        }
    }
}

impl PrefStore for JsonPrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.flush_or_report();
    }

    fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.flush_or_report();
        }
    }
}

/// In-memory store for tests and sessions without a config directory.
#[derive(Debug, Clone, Default)]
pub struct MemPrefStore {
    values: BTreeMap<String, String>,
}

impl MemPrefStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemPrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

// -------------------------------------------------------------------
// File access
// -------------------------------------------------------------------

/// Text file reading and writing as a swappable capability.
pub trait FileAccess {
    fn read_text(&self, path: &Path) -> io::Result<String>;
    fn write_text(&mut self, path: &Path, text: &str) -> io::Result<()>;
}

/// The real thing: plain std::fs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

impl FileAccess for LocalFiles {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write_text(&mut self, path: &Path, text: &str) -> io::Result<()> {
        std::fs::write(path, text)
    }
}

// -------------------------------------------------------------------
// Recent files
// -------------------------------------------------------------------

/// How many paths the recent list keeps.
const RECENT_CAP: usize = 8;

/// Store key for the recent list.
const RECENT_KEY: &str = "recentFiles";

/// Most-recently-used paths, newest first, deduplicated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentFiles {
    pub paths: Vec<PathBuf>,
}

impl RecentFiles {
    pub fn remember(&mut self, path: PathBuf) {
        self.paths.retain(|p| p != &path);
        self.paths.insert(0, path);
        self.paths.truncate(RECENT_CAP);
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Load from the preference store; a missing or garbled entry
    /// starts an empty list.
    pub fn load(store: &impl PrefStore) -> Self {
        store
            .get(RECENT_KEY)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    /// Persist into the preference store.
    pub fn save(&self, store: &mut impl PrefStore) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set(RECENT_KEY, &json);
        }
    }
}

// -------------------------------------------------------------------
// Well-known directories
// -------------------------------------------------------------------

/// Per-user config directory for plainpad data files.
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("io", "plainpad", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// The user's documents directory, falling back to the working directory.
pub fn documents_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
