//! Core domain types for the challenge catalog

mod challenge;
mod collection;

pub use challenge::{Category, Challenge, ChallengeId, Difficulty};
pub use collection::{ChallengeCollection, CollectionError};
