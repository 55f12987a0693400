//! ril-catalog - state engine for a catalog of practice challenges
//!
//! Filters and searches an immutable challenge collection, tracks which
//! challenges are completed (and how long they took) in durable key-value
//! storage, and runs the per-challenge practice timer.
//!
//! ## Modules
//!
//! - `domain/` - challenges and the ordered collection
//! - `filter/` - category/difficulty/text predicates
//! - `progress/` - completion record and its storage backends
//! - `timer/` - practice timer state machine and tick sources
//! - `catalog` - composition root used by the UI and navigation layers
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = Config::load()?;
//! let mut catalog = Catalog::from_config(&config)?;
//!
//! catalog.set_category("Performance");
//! let first = catalog.visible()[0].id;
//! catalog.select(first);
//! // ... later
//! catalog.complete_selected();
//! ```

pub mod catalog;
pub mod config;
pub mod domain;
pub mod filter;
pub mod progress;
pub mod sandbox;
pub mod timer;

pub use catalog::Catalog;
pub use config::Config;
pub use domain::*;
pub use filter::FilterCriteria;
pub use progress::{ProgressRecord, ProgressStore};
pub use timer::{PracticeTimer, Stopwatch, TimerDriver, TimerState, format_time};
