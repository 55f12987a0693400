//! Practice timer
//!
//! [`PracticeTimer`] is the pure idle/running/paused state machine; it only moves
//! when [`PracticeTimer::tick`] is called. [`TimerDriver`] feeds it real ticks from
//! the tokio runtime. Both implement [`Stopwatch`], which is what the catalog
//! controller drives.

mod driver;

pub use driver::{TimerDriver, TimerError};

use serde::{Deserialize, Serialize};

/// Phase of the practice timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// Not started since the last reset
    #[default]
    Idle,
    Running,
    /// Stopped, resumable
    Paused,
}

/// Snapshot exposed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerState {
    pub seconds: u64,
    pub is_active: bool,
}

/// Control surface shared by every tick source
pub trait Stopwatch {
    fn start(&mut self);
    fn pause(&mut self);
    fn toggle(&mut self);
    fn reset(&mut self);
    fn state(&self) -> TimerState;

    fn seconds(&self) -> u64 {
        self.state().seconds
    }

    fn is_active(&self) -> bool {
        self.state().is_active
    }
}

/// Idle/running/paused state machine counting whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PracticeTimer {
    seconds: u64,
    phase: TimerPhase,
}

impl PracticeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            seconds: self.seconds,
            is_active: self.is_running(),
        }
    }

    /// Idle or paused -> running. Returns whether the phase changed.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.phase = TimerPhase::Running;
        true
    }

    /// Running -> paused. Returns whether the phase changed.
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.phase = TimerPhase::Paused;
        true
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Any phase -> idle at zero seconds
    pub fn reset(&mut self) {
        self.seconds = 0;
        self.phase = TimerPhase::Idle;
    }

    /// One elapsed second. Ignored unless running.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.seconds = self.seconds.saturating_add(1);
        true
    }

    /// Apply `n` elapsed seconds
    pub fn advance(&mut self, n: u64) {
        for _ in 0..n {
            if !self.tick() {
                break;
            }
        }
    }
}

impl Stopwatch for PracticeTimer {
    fn start(&mut self) {
        PracticeTimer::start(self);
    }

    fn pause(&mut self) {
        PracticeTimer::pause(self);
    }

    fn toggle(&mut self) {
        PracticeTimer::toggle(self);
    }

    fn reset(&mut self) {
        PracticeTimer::reset(self);
    }

    fn state(&self) -> TimerState {
        PracticeTimer::state(self)
    }
}

/// Render seconds as `m:ss`. Minutes are neither padded nor wrapped at 60.
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
