//! Shared test utilities for catalog integration tests

#![allow(dead_code)]

use ril_catalog::{Category, Challenge, ChallengeCollection, Difficulty};

/// Install a fmt subscriber once; honours RUST_LOG, defaults to warnings
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Four challenges over three categories, Performance appearing twice
pub fn sample_collection() -> ChallengeCollection {
    let mut debounce = Challenge::new(
        2,
        Category::Performance,
        Difficulty::Hard,
        "Debounced search",
        "Keep typing responsive while filtering a large list",
    );
    debounce.starter_code = "export function Search() {}".to_string();
    debounce.solution_code = "export function Search() { /* useDeferredValue */ }".to_string();
    debounce.test_code = Some("test('renders', () => {})".to_string());
    debounce.time_estimate = "30 min".to_string();

    ChallengeCollection::new(vec![
        Challenge::new(
            1,
            Category::HooksAndState,
            Difficulty::Medium,
            "Undo stack",
            "Implement undo/redo with useReducer",
        ),
        debounce,
        Challenge::new(
            3,
            Category::Architecture,
            Difficulty::Expert,
            "Feature slices",
            "Organize a growing app into independent slices",
        ),
        Challenge::new(
            4,
            Category::Performance,
            Difficulty::Medium,
            "Context splitting",
            "Avoid re-rendering every consumer on each update",
        ),
    ])
    .expect("sample ids are unique")
}

/// The sample collection as a JSON document
pub fn sample_collection_json() -> String {
    let collection = sample_collection();
    serde_json::to_string_pretty(collection.as_slice()).expect("Failed to serialize sample collection")
}
