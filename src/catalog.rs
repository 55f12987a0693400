//! Catalog controller
//!
//! Composition root tying the collection, the filter engine, the progress store
//! and a practice timer together. Filter setters recompute the visible subset
//! immediately; completion goes straight through to the progress store.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::domain::{Category, Challenge, ChallengeCollection, ChallengeId, Difficulty};
use crate::filter::{self, FilterCriteria, Selection};
use crate::progress::ProgressStore;
use crate::sandbox::{self, CodeRunner, CodeVariant};
use crate::timer::{PracticeTimer, Stopwatch, TimerDriver, TimerState, format_time};

pub struct Catalog<T: Stopwatch = PracticeTimer> {
    collection: ChallengeCollection,
    criteria: FilterCriteria,
    /// Indices into `collection` passing `criteria`
    visible: Vec<usize>,
    progress: ProgressStore,
    timer: T,
    selected: Option<ChallengeId>,
}

impl Catalog<PracticeTimer> {
    /// Catalog with a manually ticked timer
    pub fn new(collection: ChallengeCollection, progress: ProgressStore) -> Self {
        Self::with_timer(collection, progress, PracticeTimer::new())
    }
}

impl Catalog<TimerDriver> {
    /// Build a catalog from configuration: challenge file, file storage and a
    /// runtime-driven timer. Must be called inside a tokio runtime.
    pub fn from_config(config: &Config) -> Result<Self> {
        let path = config
            .collection_path
            .as_deref()
            .context("No collection_path configured")?;
        let collection = ChallengeCollection::from_file(path)?;

        let progress = ProgressStore::load(config.open_storage());
        let timer = TimerDriver::new(config.timer.tick_interval())
            .context("Failed to create practice timer")?;

        Ok(Self::with_timer(collection, progress, timer))
    }
}

impl<T: Stopwatch> Catalog<T> {
    pub fn with_timer(collection: ChallengeCollection, progress: ProgressStore, timer: T) -> Self {
        let mut catalog = Self {
            collection,
            criteria: FilterCriteria::default(),
            visible: Vec::new(),
            progress,
            timer,
            selected: None,
        };
        catalog.refresh();
        catalog
    }

    pub fn collection(&self) -> &ChallengeCollection {
        &self.collection
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn progress_store(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    // --- Filtering ---

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refresh();
    }

    /// Select a category by name or label, or "All"
    pub fn set_category(&mut self, category: &str) {
        self.criteria.category = Selection::<Category>::parse(category);
        self.refresh();
    }

    /// Select a difficulty by name, or "All"
    pub fn set_difficulty(&mut self, difficulty: &str) {
        self.criteria.difficulty = Selection::<Difficulty>::parse(difficulty);
        self.refresh();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    /// Challenges passing the current criteria, in collection order
    pub fn visible(&self) -> Vec<&Challenge> {
        let all = self.collection.as_slice();
        self.visible.iter().map(|&i| &all[i]).collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    fn refresh(&mut self) {
        self.visible = filter::filter_indices(self.collection.as_slice(), &self.criteria);
        tracing::debug!(
            "Filter {:?} -> {} of {} challenges",
            self.criteria,
            self.visible.len(),
            self.collection.len()
        );
    }

    // --- Selection ---

    /// Look up a challenge by id
    pub fn challenge(&self, id: ChallengeId) -> Option<&Challenge> {
        self.collection.get(id)
    }

    /// Open a challenge: restarts the practice timer from zero.
    /// Unknown ids leave the current selection and timer untouched.
    pub fn select(&mut self, id: ChallengeId) -> Option<&Challenge> {
        if !self.collection.contains(id) {
            tracing::debug!("Challenge {} not found", id);
            return None;
        }
        self.selected = Some(id);
        self.timer.reset();
        self.timer.start();
        self.collection.get(id)
    }

    pub fn selected(&self) -> Option<&Challenge> {
        self.selected.and_then(|id| self.collection.get(id))
    }

    /// Leave the current challenge, discarding its timer
    pub fn close(&mut self) {
        self.selected = None;
        self.timer.reset();
    }

    /// First challenge in collection order that is not completed yet
    pub fn next_incomplete(&self) -> Option<&Challenge> {
        self.collection
            .iter()
            .find(|c| !self.progress.is_completed(c.id))
    }

    pub fn run_code(&self, runner: &mut dyn CodeRunner, variant: CodeVariant) -> bool {
        match self.selected() {
            Some(challenge) => {
                sandbox::run_challenge(runner, challenge, variant);
                true
            }
            None => false,
        }
    }

    // --- Progress ---

    pub fn is_completed(&self, id: ChallengeId) -> bool {
        self.progress.is_completed(id)
    }

    pub fn mark_complete(&mut self, id: ChallengeId, elapsed_seconds: Option<u64>) -> bool {
        self.progress.mark_complete(id, elapsed_seconds)
    }

    /// Complete the open challenge with the timer's elapsed seconds.
    /// The timer is paused so the recorded value stays on screen.
    pub fn complete_selected(&mut self) -> Option<ChallengeId> {
        let id = self.selected?;
        self.timer.pause();
        let seconds = self.timer.state().seconds;
        self.progress.mark_complete(id, Some(seconds));
        Some(id)
    }

    pub fn reset_progress(&mut self) {
        self.progress.reset_progress();
    }

    /// Overall completion percentage of the whole collection
    pub fn progress(&self) -> u32 {
        self.progress.progress(self.collection.len())
    }

    // --- Timer ---

    pub fn start_timer(&mut self) {
        self.timer.start();
    }

    pub fn pause_timer(&mut self) {
        self.timer.pause();
    }

    pub fn toggle_timer(&mut self) {
        self.timer.toggle();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    /// Elapsed practice time as `m:ss`
    pub fn formatted_time(&self) -> String {
        format_time(self.timer.state().seconds)
    }
}

impl Catalog<PracticeTimer> {
    /// Feed one elapsed second to the manual timer
    pub fn tick(&mut self) {
        self.timer.tick();
    }
}
