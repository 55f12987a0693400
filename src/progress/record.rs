use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::ChallengeId;

/// Which challenges are done and how long the timed ones took
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub completed_ids: BTreeSet<ChallengeId>,
    /// Seconds on the practice timer at completion.
    ///
    /// Normally a subset of `completed_ids`. After the completed list failed to
    /// load, times for ids missing from it are kept so they are never rewritten away.
    pub completion_times: BTreeMap<ChallengeId, u64>,
}

impl ProgressRecord {
    pub fn is_empty(&self) -> bool {
        self.completed_ids.is_empty() && self.completion_times.is_empty()
    }

    pub fn is_completed(&self, id: ChallengeId) -> bool {
        self.completed_ids.contains(&id)
    }

    pub fn completion_time(&self, id: ChallengeId) -> Option<u64> {
        self.completion_times.get(&id).copied()
    }

    /// Percentage of `total` completed, rounded half up. Zero when `total` is zero.
    pub fn percent_of(&self, total: usize) -> u32 {
        percent(self.completed_ids.len(), total)
    }
}

pub(crate) fn percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (done as f64 / total as f64 * 100.0).round() as u32
}

/// Decode the `ril-completed` value (JSON array of ids)
pub(crate) fn decode_completed(raw: &str) -> Result<BTreeSet<ChallengeId>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Decode the `ril-times` value (JSON object, string-encoded id to seconds)
pub(crate) fn decode_times(raw: &str) -> Result<BTreeMap<ChallengeId, u64>, serde_json::Error> {
    serde_json::from_str(raw)
}

pub(crate) fn encode_completed(ids: &BTreeSet<ChallengeId>) -> Result<String, serde_json::Error> {
    serde_json::to_string(ids)
}

pub(crate) fn encode_times(times: &BTreeMap<ChallengeId, u64>) -> Result<String, serde_json::Error> {
    serde_json::to_string(times)
}
