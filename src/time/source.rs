//! Time source abstraction for real and simulated time.
//!
//! The render loop never reads the system clock directly. It asks a
//! [`TimeSource`] for the current time and sleeps through it, which lets the
//! `simulate` command fast-forward through a whole night in a few seconds and
//! lets tests drive the loop deterministically.

use chrono::{DateTime, Duration as ChronoDuration, Local};
use std::sync::{Mutex, PoisonError};
use std::time::Duration as StdDuration;

/// Trait for abstracting time operations.
pub trait TimeSource: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Local>;

    /// Sleep for the specified duration (or simulate it).
    fn sleep(&self, duration: StdDuration);

    /// Check if this is a simulated time source.
    fn is_simulated(&self) -> bool {
        false
    }

    /// Check if simulation has ended (always false for real time).
    fn is_ended(&self) -> bool {
        false
    }
}

/// Real-time implementation that uses actual system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn sleep(&self, duration: StdDuration) {
        std::thread::sleep(duration);
    }
}

/// Fast-forward simulated clock.
///
/// Sleeping advances the simulated time instantly by exactly the requested
/// duration, capped at the end time. The simulation has ended once the end
/// time is reached.
#[derive(Debug)]
pub struct SimulatedTimeSource {
    end_time: DateTime<Local>,
    current: Mutex<DateTime<Local>>,
}

impl SimulatedTimeSource {
    pub fn new(start_time: DateTime<Local>, end_time: DateTime<Local>) -> Self {
        Self {
            end_time,
            current: Mutex::new(start_time.min(end_time)),
        }
    }

    fn current_time(&self) -> DateTime<Local> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now(&self) -> DateTime<Local> {
        self.current_time()
    }

    fn sleep(&self, duration: StdDuration) {
        let mut guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        let step = ChronoDuration::from_std(duration).unwrap_or(ChronoDuration::MAX);
        let next = guard.checked_add_signed(step).unwrap_or(self.end_time);
        *guard = next.min(self.end_time);
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn is_ended(&self) -> bool {
        self.current_time() >= self.end_time
    }
}
