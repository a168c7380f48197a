//! Search limits: a ply budget plus an optional wall-clock budget.
//!
//! Clones share the stop flag and start time, so stopping any clone stops
//! the search holding the others. Searches raise the flag themselves once
//! the move-time budget runs out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Limits handed to [`crate::Engine::search`].
///
/// Engines stop at whichever of depth or time runs out first, and must
/// still answer with the best move found so far.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies
    pub depth: u8,
    /// Wall-clock budget for this move (None = unbounded)
    pub move_time: Option<Duration>,
    pub time_control: TimeControl,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }

    /// Start the clock. Call this when the search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(2)
    }
}

/// Cloneable stop flag with an optional deadline.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    started: Arc<Mutex<Option<Instant>>>,
    limit: Option<Duration>,
    /// Nodes between clock reads
    check_interval: u64,
}

impl TimeControl {
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            started: Arc::new(Mutex::new(None)),
            limit,
            check_interval: 1024,
        }
    }

    pub fn start(&self) {
        *self.started.lock().unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
        self.stopped.store(false, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Read the clock and raise the stop flag once the limit has passed.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        if let Some(limit) = self.limit
            && self.elapsed() >= limit
        {
            self.stop();
            return true;
        }
        false
    }

    /// True every `check_interval` nodes.
    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes.is_multiple_of(self.check_interval)
    }

    /// Time since `start`, zero if the clock was never started.
    pub fn elapsed(&self) -> Duration {
        self.started
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
