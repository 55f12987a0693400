//! File-backed storage: one file per key under a directory

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::storage::{Storage, StorageError};

/// Persists each key as `<dir>/<key>.json`.
///
/// Writes go through an exclusive lock file and a temp file that is renamed over
/// the target, so a crash mid-write leaves either the old or the new value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn value_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn lock(&self, key: &str) -> Result<File, StorageError> {
        std::fs::create_dir_all(&self.dir)?;

        let lock_path = self.dir.join(format!("{key}.lock"));
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)?;

        // Blocks until available
        lock_file
            .lock_exclusive()
            .map_err(|_| StorageError::Lock(key.to_string()))?;

        Ok(lock_file)
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::Unavailable(format!("invalid key \"{key}\"")))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.value_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.value_path(key)?;
        let _lock = self.lock(key)?;

        let temp_path = path.with_extension("json.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.sync_all()?;

        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.value_path(key)?;
        let _lock = self.lock(key)?;

        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_get_remove() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get("ril-completed").unwrap(), None);

        storage.set("ril-completed", "[1,2]").unwrap();
        assert_eq!(
            storage.get("ril-completed").unwrap().as_deref(),
            Some("[1,2]")
        );
        assert!(dir.path().join("nested/ril-completed.json").exists());
        assert!(!dir.path().join("nested/ril-completed.json.tmp").exists());

        storage.set("ril-completed", "[3]").unwrap();
        assert_eq!(storage.get("ril-completed").unwrap().as_deref(), Some("[3]"));

        storage.remove("ril-completed").unwrap();
        assert_eq!(storage.get("ril-completed").unwrap(), None);
        storage.remove("ril-completed").unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        assert!(storage.set("../escape", "x").is_err());
        assert!(storage.get("").is_err());
        assert!(storage.remove(".hidden").is_err());
    }
}
