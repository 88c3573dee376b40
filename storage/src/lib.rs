//! VotePlatform Storage Layer - Keyed JSON Snapshots
//!
//! Designed for the whole-snapshot persistence model the stores rely on:
//! - State stays in memory
//! - The full collection is rewritten under its key on every mutation
//! - Quick load on startup
//!
//! The substrate is injected behind [`SnapshotStore`] so tests can swap
//! the file-backed store for an in-memory fake. Snapshots are plain JSON;
//! date fields round-trip as ISO-8601 strings.

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Durable substrate for whole-collection snapshots keyed by name.
///
/// There is exactly one writer per key, so no record-level locking is
/// needed; implementations only have to make `save_raw` replace the
/// previous snapshot in full.
pub trait SnapshotStore: Send + Sync {
    /// Overwrite the snapshot stored under `key`.
    fn save_raw(&self, key: &str, json: &str) -> Result<(), StorageError>;

    /// Read the snapshot stored under `key`, `None` if absent.
    fn load_raw(&self, key: &str) -> Result<Option<String>, StorageError>;
}

/// Serialize `data` and write it under `key`.
pub fn save_snapshot<T: Serialize>(
    store: &dyn SnapshotStore,
    key: &str,
    data: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;
    store.save_raw(key, &json)
}

/// Load and deserialize the snapshot under `key`, `None` if absent.
pub fn load_snapshot<T: DeserializeOwned>(
    store: &dyn SnapshotStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.load_raw(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StorageError::SerializationError(e.to_string())),
        None => Ok(None),
    }
}

/// File-based substrate: one `<key>.json` file per snapshot under a data
/// directory.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Open the storage directory, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let data_dir = path.as_ref().to_path_buf();

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)?;
        }

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl SnapshotStore for FileStore {
    fn save_raw(&self, key: &str, json: &str) -> Result<(), StorageError> {
        fs::write(self.key_path(key), json)?;
        Ok(())
    }

    fn load_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }
}

/// In-memory substrate for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn save_raw(&self, key: &str, json: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .insert(key.to_string(), json.to_string());
        Ok(())
    }

    fn load_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }
}
