//! Durable key-value storage for the scoreboard snapshot

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Blob storage with synchronous reads and whole-value writes
pub trait DurableStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, blob: &str) -> Result<(), StoreError>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        // Write aside and rename so a crash never leaves half a document
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, blob).map_err(|source| StoreError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        debug!("Wrote {} bytes to {}", blob.len(), path.display());
        Ok(())
    }
}

/// Process-local store, used for `--ephemeral` runs and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without going through `set`
    pub fn with_entry(key: &str, blob: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), blob.to_string());
        }
        store
    }

    /// Make every subsequent write fail, as a full disk would
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Failed to lock memory store: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Failed to lock memory store: {}", e)))?;
        entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

fn sanitize_key(key: &str) -> String {
    let cleaned: String = key
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'))
        .collect();
    if cleaned.is_empty() {
        "state".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_store_round_trip() -> Result<(), StoreError> {
        let dir = tempdir().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get("board")?, None);
        store.set("board", r#"{"quarter":2}"#)?;
        assert_eq!(store.get("board")?.as_deref(), Some(r#"{"quarter":2}"#));

        store.set("board", r#"{"quarter":3}"#)?;
        assert_eq!(store.get("board")?.as_deref(), Some(r#"{"quarter":3}"#));
        assert!(!store.path_for("board").with_extension("json.tmp").exists());
        Ok(())
    }

    #[test]
    fn file_store_keys_are_sanitized() {
        let store = FileStore::new("/data");
        assert_eq!(store.path_for("../etc/passwd"), PathBuf::from("/data/etcpasswd.json"));
        assert_eq!(store.path_for("///"), PathBuf::from("/data/state.json"));
    }

    #[test]
    fn memory_store_can_go_offline() {
        let store = MemoryStore::with_entry("board", "old");
        store.set_offline(true);
        assert!(matches!(store.set("board", "new"), Err(StoreError::Unavailable(_))));
        assert_eq!(store.get("board").unwrap().as_deref(), Some("old"));

        store.set_offline(false);
        store.set("board", "new").unwrap();
        assert_eq!(store.get("board").unwrap().as_deref(), Some("new"));
    }
}
