#![forbid(unsafe_code)]

//! Strip geometry: the mapping between scroll offsets and slots.
//!
//! Card `s` starts at `s × pitch`. The viewport shows `[offset, offset +
//! viewport_width)`. A slot is "centered" when its midpoint is nearest the
//! viewport's midpoint:
//!
//! ```text
//! slot = round((offset + viewport_width/2 − card_width/2) / pitch)
//! ```

/// Fixed geometry of one mounted strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripGeometry {
    card_width: f64,
    gap: f64,
    viewport_width: f64,
    slots: usize,
}

impl StripGeometry {
    /// Geometry for `slots` cards of `card_width` separated by `gap`.
    #[must_use]
    pub const fn new(card_width: f64, gap: f64, viewport_width: f64, slots: usize) -> Self {
        Self {
            card_width,
            gap,
            viewport_width,
            slots,
        }
    }

    /// Card width.
    #[must_use]
    pub const fn card_width(&self) -> f64 {
        self.card_width
    }

    /// Viewport width.
    #[must_use]
    pub const fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Card width plus gap.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.card_width + self.gap
    }

    /// Whether slot arithmetic is defined (non-zero pitch and at least one slot).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.pitch() <= 0.0 || self.slots == 0
    }

    /// Distance from a card's left edge to the viewport's left edge when the
    /// card is centered.
    #[must_use]
    pub fn center_offset(&self) -> f64 {
        self.viewport_width / 2.0 - self.card_width / 2.0
    }

    /// Total strip width (no trailing gap).
    #[must_use]
    pub fn content_width(&self) -> f64 {
        if self.slots == 0 {
            return 0.0;
        }
        self.slots as f64 * self.pitch() - self.gap
    }

    /// Largest reachable scroll offset.
    #[must_use]
    pub fn max_scroll(&self) -> f64 {
        (self.content_width() - self.viewport_width).max(0.0)
    }

    /// Clamp an offset into the scrollable range.
    #[must_use]
    pub fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_scroll())
    }

    /// Left edge of `slot` on the strip.
    #[must_use]
    pub fn slot_x(&self, slot: i64) -> f64 {
        slot as f64 * self.pitch()
    }

    /// Scroll offset that centers `slot` in the viewport.
    #[must_use]
    pub fn centering_offset(&self, slot: i64) -> f64 {
        self.slot_x(slot) - self.center_offset()
    }

    /// Slot nearest the viewport center at `offset`. Not clamped to the strip.
    #[must_use]
    pub fn nearest_slot(&self, offset: f64) -> i64 {
        if self.pitch() <= 0.0 {
            return 0;
        }
        ((offset + self.center_offset()) / self.pitch()).round() as i64
    }

    /// Whether `offset` lies within one pitch of either end of the range.
    #[must_use]
    pub fn in_edge_zone(&self, offset: f64) -> bool {
        let edge = self.pitch();
        offset <= edge || offset >= self.max_scroll() - edge
    }

    /// Slots whose cards overlap the viewport at `offset`.
    #[must_use]
    pub fn visible_slots(&self, offset: f64) -> std::ops::Range<usize> {
        if self.is_degenerate() {
            return 0..0;
        }
        let pitch = self.pitch();
        let first = ((offset - self.card_width) / pitch).floor().max(0.0) as usize;
        let last = ((offset + self.viewport_width) / pitch).ceil().max(0.0) as usize;
        first.min(self.slots)..last.min(self.slots)
    }
}
