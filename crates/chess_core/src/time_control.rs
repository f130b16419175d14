//! Time control and search limits for chess engines.
//!
//! A caller describes what it wants with [`SearchLimits`]; the engine turns
//! that into a [`TimeControl`] at the moment the search starts, so each call
//! gets a fresh deadline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Search limits that control when an engine should stop searching.
///
/// Engines respect both depth and time limits, stopping when either is
/// reached. When time runs out the engine returns the best move from its last
/// completed iteration.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies (half-moves)
    pub depth: u8,
    /// Maximum time allowed for this move (None = infinite)
    pub move_time: Option<Duration>,
    stop: StopSignal,
}

impl SearchLimits {
    /// Create limits with only depth constraint (no time limit).
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            stop: StopSignal::default(),
        }
    }

    /// Create limits with both depth and time constraints.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            stop: StopSignal::default(),
        }
    }

    /// Create limits with only time constraint (depth capped by the engine).
    pub fn time(move_time: Duration) -> Self {
        Self {
            depth: u8::MAX,
            move_time: Some(move_time),
            stop: StopSignal::default(),
        }
    }

    /// Handle a caller can keep to cancel the search from another thread.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Start the clock. Call this when search begins.
    pub fn start(&self) -> TimeControl {
        TimeControl::start(self.move_time, self.stop.clone())
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Shared flag used to cancel a running search.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Deadline of one running search.
///
/// [`TimeControl::check_time`] compares against the clock and latches the
/// stop flag, so once it reports expiry every later check is a plain atomic
/// load.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stop: StopSignal,
    started: Instant,
    deadline: Option<Instant>,
}

impl TimeControl {
    /// Start a clock now. `None` means no time limit.
    pub fn start(time_limit: Option<Duration>, stop: StopSignal) -> Self {
        let started = Instant::now();
        Self {
            stop,
            started,
            deadline: time_limit.map(|limit| started + limit),
        }
    }

    pub fn new(time_limit: Option<Duration>) -> Self {
        Self::start(time_limit, StopSignal::default())
    }

    pub fn infinite() -> Self {
        Self::new(None)
    }

    /// Force stop the search immediately.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Fast check of the stop flag only.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// Check the clock and latch the stop flag if the deadline has passed.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.stop();
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Get elapsed time since search started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Get remaining time (None if no limit).
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
