#![forbid(unsafe_code)]

//! Monotonic time sources.
//!
//! Widgets that own timers take a [`Clock`] instead of calling
//! `Instant::now()` directly, so tests can drive time deterministically
//! with [`ManualClock`].

use std::sync::{Arc, Mutex};

use web_time::{Duration, Instant};

/// A source of monotonic instants.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Wall-clock time from the platform's monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same timeline, so a test can hand one clone to the
/// widget under test and advance time through another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Move time forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
        *elapsed += delta;
    }

    /// Move time forward by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Total time advanced since creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}
