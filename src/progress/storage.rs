//! Narrow key-value storage used to persist progress

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to acquire storage lock for key \"{0}\"")]
    Lock(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable string blob store with independent keys.
///
/// A read after a successful write must observe the written value. Removing an
/// absent key succeeds.
pub trait Storage: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    reject_writes: bool,
}

/// In-process storage.
///
/// Clones share the same entries, so a test can keep a handle while a
/// `ProgressStore` owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes and removals fail, like a full or disabled store
    pub fn set_reject_writes(&self, reject: bool) {
        self.lock().reject_writes = reject;
    }

    /// Store a raw value, bypassing write rejection
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.lock()
            .entries
            .insert(key.to_string(), value.to_string());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().entries.contains_key(key)
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        // Entries stay consistent even if a holder panicked
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.lock();
        if inner.reject_writes {
            return Err(StorageError::Unavailable(format!("write to \"{key}\" rejected")));
        }
        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut inner = self.lock();
        if inner.reject_writes {
            return Err(StorageError::Unavailable(format!("removal of \"{key}\" rejected")));
        }
        inner.entries.remove(key);
        Ok(())
    }
}
