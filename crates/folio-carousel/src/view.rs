#![forbid(unsafe_code)]

//! Read-only projections of controller state for a renderer.
//!
//! Nothing here mutates the controller. A host draws the cards returned by
//! [`visible_cards`] and the [`ProgressDots`] bar, then routes clicks on the
//! bar back through [`ProgressDots::hit_test`] and
//! [`CarouselController::jump_to`].

use folio_core::clock::Clock;

use crate::controller::{CarouselController, Mode};

/// One card as it should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPlacement {
    /// Slot on the strip.
    pub slot: usize,
    /// Item shown in the slot.
    pub item: usize,
    /// Left edge relative to the viewport (may be negative when clipped).
    pub x: f64,
    /// Card width.
    pub width: f64,
    /// Whether this card shows the current item.
    pub is_current: bool,
}

impl CardPlacement {
    /// Visual weight of the card.
    #[must_use]
    pub fn emphasis(&self) -> Emphasis {
        if self.is_current {
            Emphasis::Current
        } else {
            Emphasis::Dimmed
        }
    }
}

/// How prominently a card is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emphasis {
    /// Full opacity and scale.
    Current,
    /// Reduced opacity and scale.
    Dimmed,
}

/// Cards overlapping the viewport, left to right.
///
/// A static (single-item) carousel yields one card centered in the viewport.
/// An inert carousel yields nothing.
#[must_use]
pub fn visible_cards<C: Clock>(controller: &CarouselController<C>) -> Vec<CardPlacement> {
    let strip = controller.strip();
    match controller.mode() {
        Mode::Inert => Vec::new(),
        Mode::Static => vec![CardPlacement {
            slot: 0,
            item: 0,
            x: strip.center_offset(),
            width: strip.card_width(),
            is_current: true,
        }],
        Mode::Interactive => {
            let offset = controller.offset();
            let sequence = controller.sequence();
            strip
                .visible_slots(offset)
                .filter_map(|slot| {
                    let item = sequence.item_at(slot)?;
                    let x = strip.slot_x(slot as i64) - offset;
                    let visible = x < strip.viewport_width() && x + strip.card_width() > 0.0;
                    visible.then(|| CardPlacement {
                        slot,
                        item,
                        x,
                        width: strip.card_width(),
                        is_current: controller.is_current(slot),
                    })
                })
                .collect()
        }
    }
}

/// Cell width of the active progress dot.
pub const ACTIVE_DOT_WIDTH: u16 = 8;
/// Cell width of an inactive progress dot.
pub const DOT_WIDTH: u16 = 3;
/// Cells between dots.
pub const DOT_GAP: u16 = 2;

/// One dot in the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotSegment {
    /// Item the dot selects.
    pub index: usize,
    /// Left column relative to the bar.
    pub x: u16,
    /// Width in cells.
    pub width: u16,
    /// Whether this is the current item.
    pub active: bool,
}

/// Progress indicator: one dot per item, the current one elongated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressDots {
    count: usize,
    active: usize,
}

impl ProgressDots {
    /// Dots for `count` items with `active` highlighted.
    #[must_use]
    pub const fn new(count: usize, active: usize) -> Self {
        Self { count, active }
    }

    /// Dots reflecting the controller's current index.
    ///
    /// Carousels with fewer than two items show no dots.
    #[must_use]
    pub fn from_controller<C: Clock>(controller: &CarouselController<C>) -> Self {
        let count = if controller.mode() == Mode::Interactive {
            controller.item_count()
        } else {
            0
        };
        Self::new(count, controller.index())
    }

    /// Number of dots.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether there are no dots.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Dot layout, left to right.
    pub fn segments(&self) -> impl Iterator<Item = DotSegment> + '_ {
        let mut x: u16 = 0;
        (0..self.count).map(move |index| {
            let active = index == self.active;
            let width = if active { ACTIVE_DOT_WIDTH } else { DOT_WIDTH };
            let segment = DotSegment {
                index,
                x,
                width,
                active,
            };
            x = x.saturating_add(width).saturating_add(DOT_GAP);
            segment
        })
    }

    /// Total width of the bar in cells.
    #[must_use]
    pub fn total_width(&self) -> u16 {
        self.segments()
            .last()
            .map_or(0, |last| last.x.saturating_add(last.width))
    }

    /// Item whose dot covers column `x`, if any. Gaps select nothing.
    #[must_use]
    pub fn hit_test(&self, x: u16) -> Option<usize> {
        self.segments()
            .find(|seg| x >= seg.x && x < seg.x.saturating_add(seg.width))
            .map(|seg| seg.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarouselConfig;
    use folio_core::clock::ManualClock;

    fn controller(items: usize) -> CarouselController<ManualClock> {
        CarouselController::with_clock(items, CarouselConfig::default(), ManualClock::new())
            .expect("valid config")
    }

    #[test]
    fn centered_card_is_current() {
        let c = controller(10);
        let cards = visible_cards(&c);
        let current: Vec<_> = cards.iter().filter(|card| card.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].item, 0);
        assert_eq!(current[0].slot, 30);
        assert_eq!(current[0].x, 352.0);
        assert_eq!(current[0].emphasis(), Emphasis::Current);
    }

    #[test]
    fn neighbours_are_dimmed_and_ordered() {
        let c = controller(10);
        let cards = visible_cards(&c);
        assert!(cards.len() >= 3);
        assert!(cards.windows(2).all(|w| w[0].x < w[1].x));
        let left = cards.iter().find(|card| card.slot == 29).unwrap();
        assert_eq!(left.item, 9);
        assert_eq!(left.emphasis(), Emphasis::Dimmed);
    }

    #[test]
    fn only_overlapping_cards_are_returned() {
        let c = controller(10);
        for card in visible_cards(&c) {
            assert!(card.x < 1024.0);
            assert!(card.x + card.width > 0.0);
        }
    }

    #[test]
    fn single_item_renders_centered() {
        let c = controller(1);
        let cards = visible_cards(&c);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].x, 352.0);
        assert!(cards[0].is_current);
        assert!(ProgressDots::from_controller(&c).is_empty());
    }

    #[test]
    fn empty_renders_nothing() {
        let c = controller(0);
        assert!(visible_cards(&c).is_empty());
        assert_eq!(ProgressDots::from_controller(&c).total_width(), 0);
    }

    #[test]
    fn dot_layout() {
        let dots = ProgressDots::new(3, 1);
        let segs: Vec<_> = dots.segments().collect();
        assert_eq!(segs[0].x, 0);
        assert_eq!(segs[0].width, 3);
        assert_eq!(segs[1].x, 5);
        assert_eq!(segs[1].width, 8);
        assert!(segs[1].active);
        assert_eq!(segs[2].x, 15);
        assert_eq!(dots.total_width(), 18);
    }

    #[test]
    fn dot_hit_test() {
        let dots = ProgressDots::new(3, 1);
        assert_eq!(dots.hit_test(0), Some(0));
        assert_eq!(dots.hit_test(2), Some(0));
        assert_eq!(dots.hit_test(3), None);
        assert_eq!(dots.hit_test(12), Some(1));
        assert_eq!(dots.hit_test(17), Some(2));
        assert_eq!(dots.hit_test(18), None);
    }

    #[test]
    fn dots_follow_controller() {
        let mut c = controller(4);
        c.jump_to(2);
        let dots = ProgressDots::from_controller(&c);
        assert_eq!(dots.len(), 4);
        assert!(dots.segments().nth(2).unwrap().active);
    }
}
