//! Progress tracking
//!
//! Tracks completed challenges and their practice times, persisted as two
//! independent keys of a [`Storage`]:
//!
//! ```text
//! ril-completed  ->  [1,5,10]
//! ril-times      ->  {"1":45,"5":180}
//! ```
//!
//! Persistence is best-effort. Malformed values load as empty, and failed writes
//! are logged while the in-memory record still updates. The two keys share no
//! transaction: a crash between the writes of `mark_complete` can leave an id
//! completed without a recorded time.
//!
//! # Usage
//!
//! ```ignore
//! let mut store = ProgressStore::load(FileStorage::new(dir));
//! store.mark_complete(3, Some(95));
//! assert_eq!(store.progress(collection.len()), 25);
//! ```

mod file_storage;
mod record;
mod storage;

pub use file_storage::FileStorage;
pub use record::ProgressRecord;
pub use storage::{MemoryStorage, Storage, StorageError};

use crate::domain::{Category, ChallengeCollection, ChallengeId};

/// Storage key of the completed-id list
pub const COMPLETED_KEY: &str = "ril-completed";

/// Storage key of the id to seconds mapping
pub const TIMES_KEY: &str = "ril-times";

/// Completion counts for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryProgress {
    pub category: Category,
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

/// Owns the progress record and keeps storage in sync with it
pub struct ProgressStore {
    storage: Box<dyn Storage>,
    record: ProgressRecord,
}

impl std::fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressStore")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

impl ProgressStore {
    /// Rehydrate progress from storage.
    ///
    /// Each key is read independently; a missing, unreadable or malformed key
    /// yields an empty half without affecting the other.
    pub fn load(storage: impl Storage + 'static) -> Self {
        Self::load_boxed(Box::new(storage))
    }

    pub fn load_boxed(storage: Box<dyn Storage>) -> Self {
        let completed_ids = read_key(&*storage, COMPLETED_KEY, record::decode_completed);
        let completion_times = read_key(&*storage, TIMES_KEY, record::decode_times);

        let record = ProgressRecord {
            completed_ids,
            completion_times,
        };

        tracing::debug!(
            "Loaded progress: {} completed, {} timed",
            record.completed_ids.len(),
            record.completion_times.len()
        );
        Self { storage, record }
    }

    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    pub fn is_completed(&self, id: ChallengeId) -> bool {
        self.record.is_completed(id)
    }

    pub fn completion_time(&self, id: ChallengeId) -> Option<u64> {
        self.record.completion_time(id)
    }

    pub fn completed_count(&self) -> usize {
        self.record.completed_ids.len()
    }

    /// Sum of all recorded practice times
    pub fn total_recorded_seconds(&self) -> u64 {
        self.record.completion_times.values().sum()
    }

    /// Mark a challenge as completed, optionally with the seconds it took.
    ///
    /// Re-marking is a no-op for membership; a supplied time always replaces the
    /// previous one. The completed list is written first, then the times when a
    /// time was supplied. Returns `true` when the id was not completed before.
    pub fn mark_complete(&mut self, id: ChallengeId, elapsed_seconds: Option<u64>) -> bool {
        let newly_completed = self.record.completed_ids.insert(id);
        self.persist_completed();

        if let Some(seconds) = elapsed_seconds {
            self.record.completion_times.insert(id, seconds);
            self.persist_times();
        }

        tracing::debug!(
            "Challenge {} marked complete (new: {}, seconds: {:?})",
            id,
            newly_completed,
            elapsed_seconds
        );
        newly_completed
    }

    /// Forget all progress, removing both storage entries
    pub fn reset_progress(&mut self) {
        self.record = ProgressRecord::default();

        for key in [COMPLETED_KEY, TIMES_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!("Failed to remove progress key {}: {}", key, e);
            }
        }
        tracing::debug!("Progress reset");
    }

    /// Overall completion percentage against a collection of `total` challenges
    pub fn progress(&self, total: usize) -> u32 {
        self.record.percent_of(total)
    }

    /// Completion per category, in `Category::ALL` order
    pub fn progress_by_category(&self, collection: &ChallengeCollection) -> Vec<CategoryProgress> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let (total, completed) = collection
                    .iter()
                    .filter(|c| c.category == category)
                    .fold((0, 0), |(total, done), c| {
                        (total + 1, done + usize::from(self.is_completed(c.id)))
                    });
                CategoryProgress {
                    category,
                    completed,
                    total,
                    percent: record::percent(completed, total),
                }
            })
            .collect()
    }

    fn persist_completed(&mut self) {
        let encoded = record::encode_completed(&self.record.completed_ids);
        self.write_key(COMPLETED_KEY, encoded);
    }

    fn persist_times(&mut self) {
        let encoded = record::encode_times(&self.record.completion_times);
        self.write_key(TIMES_KEY, encoded);
    }

    fn write_key(&mut self, key: &str, encoded: Result<String, serde_json::Error>) {
        let result = match encoded {
            Ok(value) => self.storage.set(key, &value).map_err(anyhow::Error::from),
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            tracing::warn!("Failed to persist {}: {}", key, e);
        }
    }
}

fn read_key<T: Default>(
    storage: &dyn Storage,
    key: &str,
    decode: impl FnOnce(&str) -> Result<T, serde_json::Error>,
) -> T {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", key, e);
            return T::default();
        }
    };

    decode(&raw).unwrap_or_else(|e| {
        tracing::warn!("Ignoring malformed {} value: {}", key, e);
        T::default()
    })
}
