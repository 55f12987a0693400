//! The ordered, immutable set of challenges the catalog works on

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use super::challenge::{Challenge, ChallengeId};

#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("Duplicate challenge id: {0}")]
    DuplicateId(ChallengeId),

    #[error("Challenge ids must be positive (found 0 for \"{0}\")")]
    ZeroId(String),

    #[error("Failed to parse challenge collection: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Challenges in insertion order, uniquely keyed by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeCollection {
    challenges: Vec<Challenge>,
}

impl ChallengeCollection {
    /// Build a collection, rejecting zero or repeated ids
    pub fn new(challenges: Vec<Challenge>) -> Result<Self, CollectionError> {
        let mut seen = HashSet::with_capacity(challenges.len());
        for challenge in &challenges {
            if challenge.id == 0 {
                return Err(CollectionError::ZeroId(challenge.title.clone()));
            }
            if !seen.insert(challenge.id) {
                return Err(CollectionError::DuplicateId(challenge.id));
            }
        }
        Ok(Self { challenges })
    }

    /// Parse a JSON array of challenges
    pub fn from_json_str(json: &str) -> Result<Self, CollectionError> {
        let challenges: Vec<Challenge> = serde_json::from_str(json)?;
        Self::new(challenges)
    }

    /// Load a JSON challenge file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read challenge file: {}", path.display()))?;

        let collection = Self::from_json_str(&content)
            .with_context(|| format!("Invalid challenge file: {}", path.display()))?;

        tracing::debug!(
            "Loaded {} challenges from {}",
            collection.len(),
            path.display()
        );
        Ok(collection)
    }

    /// Look up a challenge by id. Unknown ids yield `None`.
    pub fn get(&self, id: ChallengeId) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    /// Index of a challenge in collection order
    pub fn position(&self, id: ChallengeId) -> Option<usize> {
        self.challenges.iter().position(|c| c.id == id)
    }

    pub fn contains(&self, id: ChallengeId) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Challenge> {
        self.challenges.iter()
    }

    pub fn as_slice(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChallengeCollection {
    type Item = &'a Challenge;
    type IntoIter = std::slice::Iter<'a, Challenge>;

    fn into_iter(self) -> Self::IntoIter {
        self.challenges.iter()
    }
}
