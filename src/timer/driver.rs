//! Real-time tick source backed by the tokio runtime

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::{PracticeTimer, Stopwatch, TimerPhase, TimerState};

#[derive(Debug, thiserror::Error)]
pub enum TimerError {
    #[error("No tokio runtime available to schedule timer ticks")]
    NoRuntime,

    #[error("Tick interval must be greater than zero")]
    ZeroInterval,
}

#[derive(Debug, Default)]
struct Shared {
    timer: PracticeTimer,
    /// Bumped on every transition out of running. A ticker only applies ticks
    /// while the generation it was spawned with is current.
    generation: u64,
}

/// Drives a [`PracticeTimer`] with a periodic tokio task.
///
/// The ticker is spawned on `start` and aborted on `pause`, `reset` and drop.
/// Aborting alone cannot stop a tick that is already executing, so each tick
/// also checks the generation under the lock.
#[derive(Debug)]
pub struct TimerDriver {
    shared: Arc<Mutex<Shared>>,
    period: Duration,
    runtime: Handle,
    ticker: Option<JoinHandle<()>>,
}

impl TimerDriver {
    /// Create a driver on the current tokio runtime
    pub fn new(period: Duration) -> Result<Self, TimerError> {
        let runtime = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;
        Self::with_handle(runtime, period)
    }

    pub fn with_handle(runtime: Handle, period: Duration) -> Result<Self, TimerError> {
        if period.is_zero() {
            return Err(TimerError::ZeroInterval);
        }
        Ok(Self {
            shared: Arc::new(Mutex::new(Shared::default())),
            period,
            runtime,
            ticker: None,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn phase(&self) -> TimerPhase {
        self.lock().timer.phase()
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        lock_shared(&self.shared)
    }

    fn spawn_ticker(&mut self, generation: u64) {
        let shared = Arc::clone(&self.shared);
        let period = self.period;
        let first_tick = Instant::now() + period;

        let handle = self.runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let mut state = lock_shared(&shared);
                if state.generation != generation {
                    break;
                }
                state.timer.tick();
            }
        });
        self.ticker = Some(handle);
    }

    /// Invalidate the running ticker. Must be called with the transition applied.
    fn stop_ticker(&mut self, state: &mut Shared) {
        state.generation = state.generation.wrapping_add(1);
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

fn lock_shared(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|e| e.into_inner())
}

impl Stopwatch for TimerDriver {
    fn start(&mut self) {
        let shared = Arc::clone(&self.shared);
        let mut state = lock_shared(&shared);
        if !state.timer.start() {
            return;
        }
        let generation = state.generation;
        drop(state);

        self.spawn_ticker(generation);
        tracing::debug!("Practice timer started");
    }

    fn pause(&mut self) {
        let shared = Arc::clone(&self.shared);
        let mut state = lock_shared(&shared);
        if state.timer.pause() {
            self.stop_ticker(&mut state);
            tracing::debug!("Practice timer paused at {}s", state.timer.seconds());
        }
    }

    fn toggle(&mut self) {
        if self.phase() == TimerPhase::Running {
            self.pause();
        } else {
            self.start();
        }
    }

    fn reset(&mut self) {
        let shared = Arc::clone(&self.shared);
        let mut state = lock_shared(&shared);
        state.timer.reset();
        self.stop_ticker(&mut state);
    }

    fn state(&self) -> TimerState {
        self.lock().timer.state()
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        let shared = Arc::clone(&self.shared);
        let mut state = lock_shared(&shared);
        self.stop_ticker(&mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_requires_runtime() {
        assert!(matches!(
            TimerDriver::new(SECOND),
            Err(TimerError::NoRuntime)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejects_zero_interval() {
        assert!(matches!(
            TimerDriver::new(Duration::ZERO),
            Err(TimerError::ZeroInterval)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_seconds_while_running() {
        let mut driver = TimerDriver::new(SECOND).unwrap();
        driver.start();

        tokio::time::sleep(Duration::from_millis(5_500)).await;
        assert_eq!(driver.state(), TimerState { seconds: 5, is_active: true });

        driver.pause();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(driver.state(), TimerState { seconds: 5, is_active: false });

        driver.toggle();
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert_eq!(driver.seconds(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_does_not_double_tick() {
        let mut driver = TimerDriver::new(SECOND).unwrap();
        driver.start();
        driver.start();
        tokio::time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(driver.seconds(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_stops_ticking() {
        let mut driver = TimerDriver::new(SECOND).unwrap();
        driver.start();
        tokio::time::sleep(Duration::from_millis(4_500)).await;

        driver.reset();
        assert_eq!(driver.state(), TimerState::default());
        assert_eq!(driver.phase(), TimerPhase::Idle);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(driver.state(), TimerState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_ticks() {
        let mut driver = TimerDriver::new(SECOND).unwrap();
        let shared = Arc::clone(&driver.shared);
        driver.start();

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(lock_shared(&shared).timer.seconds(), 3);

        drop(driver);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(lock_shared(&shared).timer.seconds(), 3);
        // Only our handle remains once the ticker task is gone
        assert_eq!(Arc::strong_count(&shared), 1);
    }
}
