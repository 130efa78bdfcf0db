#![forbid(unsafe_code)]

//! Auto-dismissing status banner shown after a submission.
//!
//! A banner is fully visible for [`VISIBLE_FOR`], fades for [`FADE_FOR`],
//! then disappears. Showing a new banner replaces the current one and
//! restarts the clock.

use folio_core::timer::TimerSlot;
use folio_core::{Duration, Instant};

/// How long a banner stays fully visible.
pub const VISIBLE_FOR: Duration = Duration::from_millis(5000);
/// How long the fade-out lasts.
pub const FADE_FOR: Duration = Duration::from_millis(300);

/// Outcome the banner reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    /// The message was delivered.
    Success,
    /// Configuration was missing or the send failed.
    Error,
}

impl BannerKind {
    /// Text shown to the visitor.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            BannerKind::Success => "Message sent successfully! We'll get back to you soon.",
            BannerKind::Error => "Something went wrong. Please try again or contact me directly.",
        }
    }
}

/// Display stage of a live banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerStage {
    /// Shown at full strength for [`VISIBLE_FOR`].
    Visible,
    /// Fading out for [`FADE_FOR`] before it clears.
    Fading,
}

/// The banner slot under the form.
#[derive(Debug, Clone)]
pub struct StatusBanner {
    current: Option<(BannerKind, BannerStage)>,
    timer: TimerSlot,
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBanner {
    /// An empty banner slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: None,
            timer: TimerSlot::new("banner"),
        }
    }

    /// Show `kind`, replacing whatever was there.
    pub fn show(&mut self, kind: BannerKind, now: Instant) {
        self.current = Some((kind, BannerStage::Visible));
        self.timer.arm_once(now, VISIBLE_FOR);
    }

    /// Remove the banner immediately.
    pub fn dismiss(&mut self) {
        self.current = None;
        self.timer.cancel();
    }

    /// Advance the fade. Returns `true` if the stage changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        match self.current {
            Some((kind, BannerStage::Visible)) => {
                self.current = Some((kind, BannerStage::Fading));
                self.timer.arm_once(now, FADE_FOR);
            }
            Some((_, BannerStage::Fading)) | None => {
                self.current = None;
            }
        }
        true
    }

    /// Current banner, if any.
    #[must_use]
    pub fn current(&self) -> Option<(BannerKind, BannerStage)> {
        self.current
    }

    /// When the banner next changes stage.
    #[must_use]
    pub fn next_change(&self) -> Option<Instant> {
        self.timer.deadline()
    }
}
