#![forbid(unsafe_code)]

//! Cancellable timer slots.
//!
//! A [`TimerSlot`] holds at most one pending deadline for a single timer
//! role (for example "autoplay" or "resume"). Arming a slot replaces any
//! deadline already held, so duplicate timers for the same role cannot
//! accumulate. Slots are polled by the owner's tick loop; nothing runs in
//! the background.
//!
//! # Example
//!
//! ```rust
//! use folio_core::timer::TimerSlot;
//! use folio_core::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut resume = TimerSlot::new("resume");
//! resume.arm_once(start, Duration::from_millis(3000));
//! assert!(!resume.poll(start + Duration::from_millis(2999)));
//! assert!(resume.poll(start + Duration::from_millis(3000)));
//! assert!(!resume.is_armed());
//! ```

use web_time::{Duration, Instant};

/// How a slot reschedules after firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Schedule {
    Once,
    Every(Duration),
}

/// A single-role timer with at most one pending deadline.
#[derive(Debug, Clone)]
pub struct TimerSlot {
    role: &'static str,
    deadline: Option<Instant>,
    schedule: Schedule,
}

impl TimerSlot {
    /// Create an idle slot for the named role.
    #[must_use]
    pub const fn new(role: &'static str) -> Self {
        Self {
            role,
            deadline: None,
            schedule: Schedule::Once,
        }
    }

    /// The role name, used in log fields.
    #[must_use]
    pub const fn role(&self) -> &'static str {
        self.role
    }

    /// Arm a one-shot deadline `delay` after `now`, replacing any pending one.
    pub fn arm_once(&mut self, now: Instant, delay: Duration) {
        let replaced = self.deadline.is_some();
        self.deadline = Some(now + delay);
        self.schedule = Schedule::Once;
        tracing::trace!(
            role = self.role,
            delay_ms = delay.as_millis() as u64,
            replaced,
            "timer armed"
        );
    }

    /// Arm a repeating deadline firing every `period`, replacing any pending one.
    pub fn arm_every(&mut self, now: Instant, period: Duration) {
        let replaced = self.deadline.is_some();
        self.deadline = Some(now + period);
        self.schedule = Schedule::Every(period);
        tracing::trace!(
            role = self.role,
            period_ms = period.as_millis() as u64,
            replaced,
            "repeating timer armed"
        );
    }

    /// Clear the pending deadline. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.deadline.take().is_some();
        if was_armed {
            tracing::trace!(role = self.role, "timer cancelled");
        }
        was_armed
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline, saturating at zero.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Fire the slot if its deadline has passed.
    ///
    /// One-shot slots disarm after firing. Repeating slots move to the next
    /// period boundary; periods missed entirely (a stalled loop) are
    /// coalesced into this single fire rather than replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }

        match self.schedule {
            Schedule::Once => {
                self.deadline = None;
            }
            Schedule::Every(period) => {
                let mut next = deadline + period;
                if next <= now {
                    next = now + period;
                }
                self.deadline = Some(next);
            }
        }
        tracing::trace!(role = self.role, "timer fired");
        true
    }
}
