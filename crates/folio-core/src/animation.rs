#![forbid(unsafe_code)]

//! Easing curves and the scroll tween.
//!
//! Hosts without a native smooth-scroll primitive (a terminal, a headless
//! test) drive scrolling through a [`ScrollTween`]: set a target, then
//! sample it on every frame. Sampling is a pure function of the instant, so
//! a stalled frame loop never drifts.

use web_time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f64) -> f64;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

// ---------------------------------------------------------------------------
// ScrollTween
// ---------------------------------------------------------------------------

/// One sample of a running tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample {
    /// Interpolated offset.
    pub value: f64,
    /// `true` once the tween has reached its target.
    pub done: bool,
}

/// A time-based interpolation from one scroll offset to another.
#[derive(Debug, Clone, Copy)]
pub struct ScrollTween {
    from: f64,
    to: f64,
    started_at: Instant,
    duration: Duration,
    easing: EasingFn,
}

impl ScrollTween {
    /// Start a tween at `now` with the default ease-out curve.
    #[must_use]
    pub fn new(from: f64, to: f64, now: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at: now,
            duration,
            easing: ease_out,
        }
    }

    /// Replace the easing curve.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Starting offset.
    #[must_use]
    pub const fn from(&self) -> f64 {
        self.from
    }

    /// Target offset.
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.to
    }

    /// Shift both endpoints by `delta`. Used when the underlying strip
    /// jumps by a whole copy width mid-flight.
    pub fn translate(&mut self, delta: f64) {
        self.from += delta;
        self.to += delta;
    }

    /// Sample the tween at `now`.
    #[must_use]
    pub fn sample(&self, now: Instant) -> TweenSample {
        let elapsed = now.saturating_duration_since(self.started_at);
        if self.duration.is_zero() || elapsed >= self.duration {
            return TweenSample {
                value: self.to,
                done: true,
            };
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = (self.easing)(t);
        TweenSample {
            value: self.from + (self.to - self.from) * eased,
            done: false,
        }
    }
}
