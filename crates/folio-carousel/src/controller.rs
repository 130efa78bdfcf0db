#![forbid(unsafe_code)]

//! Carousel interaction controller.
//!
//! Owns the scroll offset of a horizontally scrolling strip of fixed-width
//! cards, derives which item is centered, advances automatically when idle,
//! and yields to pointer drags and wheel input until a quiet period passes.
//!
//! # Invariants
//!
//! 1. `index() < item_count()` whenever the controller is interactive.
//! 2. Outside an in-flight smooth scroll, `index()` is the nearest slot to
//!    the viewport center reduced modulo N.
//! 3. A rewrap jump moves the offset by a whole number of copy widths, so
//!    the centered item never changes across it.
//! 4. Autoplay and dragging never both drive the offset: autoplay ticks are
//!    only armed in [`Phase::AutoAdvancing`], and every path into
//!    [`Phase::UserDragging`] cancels the autoplay timer and any in-flight
//!    smooth scroll.
//! 5. Each timer role has at most one pending deadline.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | No items, or zero card pitch | Inert: no timers, every operation is a no-op, nothing is visible |
//! | One item | Static: the single card is shown centered, no timers, no dragging |
//! | Index out of range | Clamped to 0 |
//!
//! # Time
//!
//! The controller never reads the wall clock directly. It asks its
//! [`Clock`] for the current instant whenever it arms a timer or samples the
//! smooth scroll, and the host calls [`CarouselController::tick`] from its
//! frame loop.

use folio_core::animation::ScrollTween;
use folio_core::clock::{Clock, SystemClock};
use folio_core::timer::TimerSlot;
use folio_core::Instant;

use crate::config::CarouselConfig;
use crate::error::ConfigError;
use crate::machine::{Phase, TimerOp, Trigger, transition};
use crate::sequence::RenderSequence;
use crate::strip::StripGeometry;

/// Where a drag started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    /// Pointer x at press time.
    pub pointer_x: f64,
    /// Scroll offset at press time (shifted along with rewrap jumps).
    pub offset: f64,
}

/// How much of the controller is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Nothing to show.
    Inert,
    /// One card, no motion.
    Static,
    /// Full looping carousel.
    Interactive,
}

/// What a call to [`CarouselController::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The autoplay timer fired and advanced the index.
    pub advanced: bool,
    /// The resume timer fired and autoplay restarted.
    pub resumed: bool,
    /// The offset moved (animation frame or rewrap).
    pub scrolled: bool,
}

impl TickOutcome {
    /// Whether anything visible changed.
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.advanced || self.resumed || self.scrolled
    }
}

/// The carousel interaction controller.
#[derive(Debug)]
pub struct CarouselController<C: Clock = SystemClock> {
    config: CarouselConfig,
    sequence: RenderSequence,
    strip: StripGeometry,
    clock: C,
    mode: Mode,
    offset: f64,
    index: usize,
    phase: Phase,
    drag: Option<DragAnchor>,
    autoplay: TimerSlot,
    resume: TimerSlot,
    scroll: Option<ScrollTween>,
    mounted: bool,
}

impl CarouselController<SystemClock> {
    /// Mount a controller for `item_count` items on the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn new(item_count: usize, config: CarouselConfig) -> Result<Self, ConfigError> {
        Self::with_clock(item_count, config, SystemClock)
    }
}

impl<C: Clock> CarouselController<C> {
    /// Mount a controller driven by `clock`.
    ///
    /// The strip starts centered on item 0 in the middle copy. Autoplay is
    /// armed immediately when there are at least two items.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn with_clock(
        item_count: usize,
        config: CarouselConfig,
        clock: C,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let sequence = RenderSequence::new(item_count, config.copies);
        let strip = StripGeometry::new(
            config.card_width,
            config.gap,
            config.viewport_width,
            sequence.len(),
        );
        let mode = if strip.is_degenerate() {
            Mode::Inert
        } else if item_count == 1 {
            Mode::Static
        } else {
            Mode::Interactive
        };

        let mut controller = Self {
            config,
            sequence,
            strip,
            clock,
            mode,
            offset: 0.0,
            index: 0,
            phase: Phase::AutoAdvancing,
            drag: None,
            autoplay: TimerSlot::new("autoplay"),
            resume: TimerSlot::new("resume"),
            scroll: None,
            mounted: true,
        };

        if mode == Mode::Interactive {
            let home = sequence.middle_slot(0) as i64;
            controller.offset = controller.strip.clamp(controller.strip.centering_offset(home));
            let now = controller.clock.now();
            controller
                .autoplay
                .arm_every(now, controller.config.autoplay_interval);
        }

        tracing::debug!(
            items = item_count,
            copies = controller.sequence.copies(),
            mode = ?mode,
            offset = controller.offset,
            "carousel mounted"
        );
        Ok(controller)
    }

    // -- accessors ---------------------------------------------------------

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Slot-to-item projection.
    #[must_use]
    pub fn sequence(&self) -> &RenderSequence {
        &self.sequence
    }

    /// Strip geometry.
    #[must_use]
    pub fn strip(&self) -> &StripGeometry {
        &self.strip
    }

    /// Clock in use.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Number of distinct items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.sequence.item_count()
    }

    /// Inert, static, or interactive.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current scroll offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Current logical index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether autoplay ticks are scheduled.
    #[must_use]
    pub fn is_autoplay_armed(&self) -> bool {
        self.autoplay.is_armed()
    }

    /// The drag anchor while dragging.
    #[must_use]
    pub fn drag_anchor(&self) -> Option<DragAnchor> {
        self.drag
    }

    /// Target offset of the in-flight smooth scroll.
    #[must_use]
    pub fn scroll_target(&self) -> Option<f64> {
        self.scroll.map(|tween| tween.target())
    }

    /// Next autoplay deadline.
    #[must_use]
    pub fn autoplay_deadline(&self) -> Option<Instant> {
        self.autoplay.deadline()
    }

    /// Resume-timer deadline.
    #[must_use]
    pub fn resume_deadline(&self) -> Option<Instant> {
        self.resume.deadline()
    }

    /// Whether `slot` shows the current item (drives visual emphasis).
    #[must_use]
    pub fn is_current(&self, slot: usize) -> bool {
        self.mode != Mode::Inert && self.sequence.item_at(slot) == Some(self.index)
    }

    /// Earliest instant the host should call [`tick`](Self::tick) again.
    ///
    /// Returns `now` while a smooth scroll is animating.
    #[must_use]
    pub fn next_wake(&self) -> Option<Instant> {
        if self.scroll.is_some() {
            return Some(self.clock.now());
        }
        match (self.autoplay.deadline(), self.resume.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn is_interactive(&self) -> bool {
        self.mounted && self.mode == Mode::Interactive
    }

    // -- operations --------------------------------------------------------

    /// Advance to the next item and smooth-scroll to it.
    ///
    /// The target is the neighbouring card to the right, so the strip keeps
    /// moving forward across the wrap from the last item to the first.
    /// Returns `false` (and does nothing) while dragging or when not
    /// interactive.
    pub fn advance_one(&mut self) -> bool {
        if !self.is_interactive() || self.phase == Phase::UserDragging {
            return false;
        }
        let n = self.item_count();
        let next = (self.index + 1) % n;
        let from_slot = self.anchor_slot();
        let target_slot = self.sequence.next_slot_showing(from_slot + 1, next);
        self.index = next;
        self.scroll_to_slot(target_slot);
        tracing::debug!(index = next, slot = target_slot, "carousel advanced");
        true
    }

    /// Start a pointer drag at `pointer_x`.
    pub fn begin_drag(&mut self, pointer_x: f64) -> bool {
        if !self.is_interactive() || !pointer_x.is_finite() {
            return false;
        }
        self.settle_scroll();
        self.drag = Some(DragAnchor {
            pointer_x,
            offset: self.offset,
        });
        self.apply(Trigger::PointerDown);
        self.recompute_logical_index();
        true
    }

    /// Move the drag to `pointer_x`.
    ///
    /// `offset = anchor.offset − (pointer_x − anchor.pointer_x) × sensitivity`.
    /// Calling again with the same `pointer_x` yields the same offset.
    pub fn update_drag(&mut self, pointer_x: f64) -> bool {
        if !self.is_interactive() || !pointer_x.is_finite() {
            return false;
        }
        let Some(anchor) = self.drag else {
            return false;
        };
        let walk = (pointer_x - anchor.pointer_x) * self.config.drag_sensitivity;
        self.set_offset_raw(anchor.offset - walk);
        self.recompute_logical_index();
        true
    }

    /// Release the drag (pointer up).
    pub fn end_drag(&mut self) -> bool {
        if !self.is_interactive() || self.drag.is_none() {
            return false;
        }
        self.drag = None;
        self.apply(Trigger::PointerUp);
        self.maybe_rewrap_offset();
        self.recompute_logical_index();
        true
    }

    /// Pointer left the strip; ends a drag exactly like [`end_drag`](Self::end_drag).
    pub fn pointer_leave(&mut self) -> bool {
        self.end_drag()
    }

    /// Scroll by `delta × wheel_sensitivity` and (re)arm the resume timer.
    ///
    /// Wheel input never starts a drag. While a drag is in progress the
    /// delta is folded into the anchor so the finger and wheel compose.
    pub fn apply_wheel_delta(&mut self, delta: f64) -> bool {
        if !self.is_interactive() || !delta.is_finite() {
            return false;
        }
        self.settle_scroll();
        let step = delta * self.config.wheel_sensitivity;
        if let Some(anchor) = self.drag.as_mut() {
            anchor.offset += step;
        }
        self.set_offset_raw(self.offset + step);
        self.apply(Trigger::Wheel);
        self.recompute_logical_index();
        true
    }

    /// Center the item at `index` (e.g. a progress-dot click).
    ///
    /// Smooth-scrolls to that item's slot in the middle copy and arms the
    /// resume timer. Out-of-range indices clamp to 0. Ignored while dragging.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if !self.is_interactive() || self.phase == Phase::UserDragging {
            return false;
        }
        let index = if index < self.item_count() {
            index
        } else {
            tracing::warn!(index, items = self.item_count(), "jump index out of range, clamping");
            0
        };

        self.settle_scroll();
        // Bring the current view into the middle copy first so the animated
        // path stays within one copy.
        let shift = self.sequence.shift_to_middle(self.strip.nearest_slot(self.offset));
        self.translate(shift as f64 * self.strip.pitch());

        self.index = index;
        let target_slot = self.sequence.middle_slot(index) as i64;
        self.scroll_to_slot(target_slot);
        self.apply(Trigger::DotSelected);
        tracing::debug!(index, slot = target_slot, "carousel jump");
        true
    }

    /// Step `delta` items from the current one (keyboard navigation).
    ///
    /// Moves to the neighbouring slot in the direction of travel rather than
    /// back to the middle copy, and arms the resume timer like a dot click.
    /// Whole laps are dropped, so a multiple of N steps does nothing.
    pub fn step_by(&mut self, delta: i64) -> bool {
        if !self.is_interactive() || self.phase == Phase::UserDragging {
            return false;
        }
        let delta = delta % self.item_count() as i64;
        if delta == 0 {
            return false;
        }
        let target_slot = self.anchor_slot() + delta;
        self.index = self.sequence.logical_index(target_slot);
        self.scroll_to_slot(target_slot);
        self.apply(Trigger::DotSelected);
        true
    }

    /// Accept a scroll position reported by the host.
    ///
    /// Cancels any in-flight smooth scroll.
    pub fn set_offset(&mut self, offset: f64) -> bool {
        if !self.is_interactive() || !offset.is_finite() {
            return false;
        }
        self.scroll = None;
        self.set_offset_raw(offset);
        self.recompute_logical_index();
        true
    }

    /// Recompute the logical index from the current offset.
    ///
    /// Returns `true` if the index changed. Idempotent.
    pub fn recompute_logical_index(&mut self) -> bool {
        if self.mode != Mode::Interactive {
            return false;
        }
        let slot = self.strip.nearest_slot(self.offset);
        let mut index = self.sequence.logical_index(slot);
        if index >= self.item_count() {
            index = 0;
        }
        if index == self.index {
            return false;
        }
        tracing::trace!(from = self.index, to = index, slot, "logical index changed");
        self.index = index;
        true
    }

    /// Jump (without animation) to the equivalent position in the middle
    /// copy when the offset is within one pitch of either end of the strip.
    ///
    /// Returns `true` if a jump happened. The drag anchor and any in-flight
    /// smooth scroll move with the offset.
    pub fn maybe_rewrap_offset(&mut self) -> bool {
        if self.mode != Mode::Interactive || !self.strip.in_edge_zone(self.offset) {
            return false;
        }
        let slot = self.strip.nearest_slot(self.offset);
        let shift = self.sequence.shift_to_middle(slot);
        if shift == 0 {
            return false;
        }
        let dx = shift as f64 * self.strip.pitch();
        self.translate(dx);
        tracing::debug!(slot, shift, offset = self.offset, "carousel rewrap");
        true
    }

    /// Drive timers and the smooth scroll. Call once per frame.
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.is_interactive() {
            return outcome;
        }
        let now = self.clock.now();

        if self.resume.poll(now) {
            self.apply(Trigger::ResumeElapsed);
            outcome.resumed = true;
        }
        if self.autoplay.poll(now) {
            outcome.advanced = self.advance_one();
        }
        outcome.scrolled = self.step_scroll(now);
        outcome
    }

    /// Cancel both timers and any animation. The controller becomes inert.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.autoplay.cancel();
        self.resume.cancel();
        self.scroll = None;
        self.drag = None;
        self.mounted = false;
        tracing::debug!("carousel unmounted");
    }

    // -- internals ---------------------------------------------------------

    /// Run a trigger through the transition table and apply its timer ops.
    fn apply(&mut self, trigger: Trigger) {
        let from = self.phase;
        let t = transition(from, trigger);
        if t.is_noop(from) {
            return;
        }
        let now = self.clock.now();

        match t.autoplay {
            TimerOp::Keep => {}
            TimerOp::Cancel => {
                self.autoplay.cancel();
            }
            TimerOp::Arm => self.autoplay.arm_every(now, self.config.autoplay_interval),
        }
        match t.resume {
            TimerOp::Keep => {}
            TimerOp::Cancel => {
                self.resume.cancel();
            }
            TimerOp::Arm => self.resume.arm_once(now, self.config.resume_delay),
        }
        if t.to == Phase::UserDragging {
            self.scroll = None;
        }

        self.phase = t.to;
        if from != t.to {
            tracing::debug!(
                from = from.label(),
                to = t.to.label(),
                trigger = ?trigger,
                "carousel transition"
            );
        }
    }

    /// The slot the next relative move starts from: the in-flight target if
    /// a smooth scroll is running, otherwise the centered slot.
    fn anchor_slot(&self) -> i64 {
        let offset = self.scroll.map_or(self.offset, |tween| tween.target());
        let slot = self.strip.nearest_slot(offset);
        // Re-align to the committed index in case the view drifted mid-flight.
        let current = self.sequence.logical_index(slot);
        if current == self.index {
            slot
        } else {
            self.sequence.next_slot_showing(slot, self.index)
        }
    }

    /// Start a smooth scroll that centers `slot`.
    ///
    /// The scroll starts from wherever a running tween has reached. The
    /// target is brought within one lap of that position, keeping the item
    /// and the direction of travel. If it would land near an end of the
    /// strip, the view is first moved into the middle copy and the target
    /// with it, so both ends of the tween stay on the strip.
    fn scroll_to_slot(&mut self, slot: i64) {
        self.settle_scroll();
        let here = self.strip.nearest_slot(self.offset);
        let mut slot = here.saturating_add(self.within_one_lap(slot.saturating_sub(here)));
        if self.strip.in_edge_zone(self.strip.centering_offset(slot)) {
            let shift = self.sequence.shift_to_middle(here);
            self.translate(shift as f64 * self.strip.pitch());
            slot += shift;
        }
        let from = self.strip.clamp(self.offset);
        let target = self.strip.clamp(self.strip.centering_offset(slot));
        self.offset = from;
        self.scroll = Some(ScrollTween::new(
            from,
            target,
            self.clock.now(),
            self.config.scroll_duration,
        ));
    }

    /// Reduce a slot distance to at most one lap (N slots), keeping its sign
    /// and the item it lands on.
    fn within_one_lap(&self, travel: i64) -> i64 {
        let n = self.item_count() as i64;
        if travel > n {
            (travel - 1).rem_euclid(n) + 1
        } else if travel < -n {
            -((-(travel + 1)).rem_euclid(n) + 1)
        } else {
            travel
        }
    }

    /// Sample the running tween at the current instant and stop it, leaving
    /// the offset where the animation had reached.
    fn settle_scroll(&mut self) {
        if let Some(tween) = self.scroll.take() {
            self.offset = tween.sample(self.clock.now()).value;
        }
    }

    /// Advance the running tween. Returns `true` if the offset moved.
    fn step_scroll(&mut self, now: Instant) -> bool {
        let Some(tween) = self.scroll else {
            return false;
        };
        let sample = tween.sample(now);
        let moved = sample.value != self.offset;
        self.offset = sample.value;
        if sample.done {
            self.scroll = None;
            self.maybe_rewrap_offset();
            self.recompute_logical_index();
        }
        moved || sample.done
    }

    /// Set the offset from direct manipulation: rewrap, then clamp.
    ///
    /// Offsets more than one copy beyond either end are pulled back to that
    /// bound first, which keeps slot arithmetic in range.
    fn set_offset_raw(&mut self, offset: f64) {
        let copy = self.strip.pitch() * self.item_count() as f64;
        self.offset = offset.clamp(-copy, self.strip.max_scroll() + copy);
        self.maybe_rewrap_offset();
        self.offset = self.strip.clamp(self.offset);
    }

    /// Move the offset, the drag anchor, and any tween by `dx`.
    fn translate(&mut self, dx: f64) {
        if dx == 0.0 {
            return;
        }
        self.offset += dx;
        if let Some(anchor) = self.drag.as_mut() {
            anchor.offset += dx;
        }
        if let Some(tween) = self.scroll.as_mut() {
            tween.translate(dx);
        }
    }
}

impl<C: Clock> Drop for CarouselController<C> {
    fn drop(&mut self) {
        self.unmount();
    }
}
