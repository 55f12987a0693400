//! Filter/search over the challenge collection
//!
//! All predicates are combined with logical AND. Filtering is a pure linear scan
//! and never reorders the collection.

mod criteria;

pub use criteria::{ALL, FilterCriteria, Selection};

use crate::domain::Challenge;

/// Case-insensitive substring match against title or description.
///
/// `needle` must already be lower-cased.
fn matches_query(challenge: &Challenge, needle: &str) -> bool {
    needle.is_empty()
        || challenge.title.to_lowercase().contains(needle)
        || challenge.description.to_lowercase().contains(needle)
}

/// Check a single challenge against all active predicates
pub fn matches(challenge: &Challenge, criteria: &FilterCriteria) -> bool {
    passes(challenge, criteria, &criteria.query.to_lowercase())
}

/// Positions of the challenges passing `criteria`, ascending
pub fn filter_indices(challenges: &[Challenge], criteria: &FilterCriteria) -> Vec<usize> {
    let needle = criteria.query.to_lowercase();
    challenges
        .iter()
        .enumerate()
        .filter(|(_, c)| passes(c, criteria, &needle))
        .map(|(i, _)| i)
        .collect()
}

fn passes(challenge: &Challenge, criteria: &FilterCriteria, needle: &str) -> bool {
    criteria.category.matches(&challenge.category)
        && criteria.difficulty.matches(&challenge.difficulty)
        && matches_query(challenge, needle)
}

/// Compute the visible subset, preserving collection order
pub fn filter<'a, I>(challenges: I, criteria: &FilterCriteria) -> Vec<&'a Challenge>
where
    I: IntoIterator<Item = &'a Challenge>,
{
    let needle = criteria.query.to_lowercase();
    challenges
        .into_iter()
        .filter(|c| passes(c, criteria, &needle))
        .collect()
}
