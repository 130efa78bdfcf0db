#![forbid(unsafe_code)]

//! The render sequence: a ring of N items projected onto a finite strip.
//!
//! The strip holds `copies` back-to-back repetitions of the item list. Slot
//! `s` shows item `s mod N`. The copy count is a buffer size: more copies
//! means more room to scroll before a rewrap jump is needed. It is odd so
//! that one copy sits exactly in the middle.
//!
//! Nothing is materialized; a slot is resolved to its item on demand.

/// Smallest accepted copy count.
pub const MIN_COPIES: usize = 5;

/// Slot-to-item projection for a K-fold repeated item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSequence {
    item_count: usize,
    copies: usize,
}

impl RenderSequence {
    /// Create a sequence of `copies` repetitions of `item_count` items.
    #[must_use]
    pub const fn new(item_count: usize, copies: usize) -> Self {
        Self { item_count, copies }
    }

    /// Number of distinct items (N).
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of repetitions (K).
    #[must_use]
    pub const fn copies(&self) -> usize {
        self.copies
    }

    /// Total slots on the strip (N × K).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.item_count * self.copies
    }

    /// Whether the strip has no slots.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the middle copy.
    #[must_use]
    pub const fn middle_copy(&self) -> usize {
        self.copies / 2
    }

    /// First slot of the middle copy.
    #[must_use]
    pub const fn middle_start(&self) -> usize {
        self.middle_copy() * self.item_count
    }

    /// The slot showing `index` inside the middle copy.
    #[must_use]
    pub const fn middle_slot(&self, index: usize) -> usize {
        self.middle_start() + index
    }

    /// Item shown at `slot`, if the slot exists.
    #[must_use]
    pub const fn item_at(&self, slot: usize) -> Option<usize> {
        if slot < self.len() {
            Some(slot % self.item_count)
        } else {
            None
        }
    }

    /// Logical index for any (possibly negative or out-of-strip) slot.
    ///
    /// Negative remainders wrap to `N + r`. Returns 0 for an empty list.
    #[must_use]
    pub fn logical_index(&self, slot: i64) -> usize {
        if self.item_count == 0 {
            return 0;
        }
        slot.rem_euclid(self.item_count as i64) as usize
    }

    /// Copy number containing `slot` (floor division, may be negative).
    #[must_use]
    pub fn copy_of(&self, slot: i64) -> i64 {
        if self.item_count == 0 {
            return 0;
        }
        slot.div_euclid(self.item_count as i64)
    }

    /// Slot delta (a multiple of N) that moves `slot` into the middle copy.
    #[must_use]
    pub fn shift_to_middle(&self, slot: i64) -> i64 {
        (self.middle_copy() as i64)
            .saturating_sub(self.copy_of(slot))
            .saturating_mul(self.item_count as i64)
    }

    /// The first slot at or after `from` that shows `index`.
    #[must_use]
    pub fn next_slot_showing(&self, from: i64, index: usize) -> i64 {
        if self.item_count == 0 {
            return from;
        }
        let n = self.item_count as i64;
        let delta = (index as i64 - from).rem_euclid(n);
        from + delta
    }

    /// Iterate `(slot, item_index)` over every slot.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.len()).map(move |slot| (slot, slot % self.item_count))
    }
}
