#![forbid(unsafe_code)]

//! Carousel tuning parameters.
//!
//! Geometry is in abstract pixels; a terminal host scales it to columns.
//! Pixel thresholds here are tuning values, not behavioral contracts.

use folio_core::Duration;

use crate::error::ConfigError;
use crate::sequence::MIN_COPIES;

/// Default card width in pixels.
pub const DEFAULT_CARD_WIDTH: f64 = 320.0;
/// Default gap between cards in pixels.
pub const DEFAULT_GAP: f64 = 16.0;
/// Default copy count of the render sequence.
pub const DEFAULT_COPIES: usize = 7;

/// Configuration for a [`CarouselController`](crate::controller::CarouselController).
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    /// Width of one card.
    pub card_width: f64,
    /// Horizontal gap between neighbouring cards.
    pub gap: f64,
    /// Visible width of the scroll viewport.
    pub viewport_width: f64,
    /// How many times the item list is repeated to fake an endless strip.
    pub copies: usize,
    /// Period between automatic advances.
    pub autoplay_interval: Duration,
    /// Quiet period after user input before autoplay resumes.
    pub resume_delay: Duration,
    /// Pointer travel multiplier while dragging (> 1 moves faster than the finger).
    pub drag_sensitivity: f64,
    /// Wheel delta multiplier.
    pub wheel_sensitivity: f64,
    /// Length of the smooth-scroll animation.
    pub scroll_duration: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            card_width: DEFAULT_CARD_WIDTH,
            gap: DEFAULT_GAP,
            viewport_width: 1024.0,
            copies: DEFAULT_COPIES,
            autoplay_interval: Duration::from_millis(2000),
            resume_delay: Duration::from_millis(3000),
            drag_sensitivity: 1.2,
            wheel_sensitivity: 0.8,
            scroll_duration: Duration::from_millis(450),
        }
    }
}

impl CarouselConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set card width and gap.
    #[must_use]
    pub fn card(mut self, width: f64, gap: f64) -> Self {
        self.card_width = width;
        self.gap = gap;
        self
    }

    /// Set the viewport width.
    #[must_use]
    pub fn viewport_width(mut self, width: f64) -> Self {
        self.viewport_width = width;
        self
    }

    /// Set the render sequence copy count.
    #[must_use]
    pub fn copies(mut self, copies: usize) -> Self {
        self.copies = copies;
        self
    }

    /// Set the autoplay period.
    #[must_use]
    pub fn autoplay_interval(mut self, interval: Duration) -> Self {
        self.autoplay_interval = interval;
        self
    }

    /// Set the resume-after-interaction delay.
    #[must_use]
    pub fn resume_delay(mut self, delay: Duration) -> Self {
        self.resume_delay = delay;
        self
    }

    /// Set drag and wheel sensitivities.
    #[must_use]
    pub fn sensitivity(mut self, drag: f64, wheel: f64) -> Self {
        self.drag_sensitivity = drag;
        self.wheel_sensitivity = wheel;
        self
    }

    /// Set the smooth-scroll duration. Zero makes scrolls instant.
    #[must_use]
    pub fn scroll_duration(mut self, duration: Duration) -> Self {
        self.scroll_duration = duration;
        self
    }

    /// Distance between consecutive card anchors.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.card_width + self.gap
    }

    /// Check every field.
    ///
    /// A zero card width is accepted; it produces an inert controller.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.copies < MIN_COPIES || self.copies % 2 == 0 {
            return Err(ConfigError::Copies(self.copies));
        }
        for (field, value) in [
            ("card_width", self.card_width),
            ("gap", self.gap),
            ("viewport_width", self.viewport_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Geometry { field, value });
            }
        }
        for (field, value) in [
            ("drag_sensitivity", self.drag_sensitivity),
            ("wheel_sensitivity", self.wheel_sensitivity),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Sensitivity { field, value });
            }
        }
        if self.autoplay_interval.is_zero() {
            return Err(ConfigError::Interval("autoplay_interval"));
        }
        if self.resume_delay.is_zero() {
            return Err(ConfigError::Interval("resume_delay"));
        }
        Ok(())
    }
}
