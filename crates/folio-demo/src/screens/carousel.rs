#![forbid(unsafe_code)]

//! Testimonials screen: the carousel strip plus its progress dots.
//!
//! The controller works in pixels; this screen maps one terminal column to
//! [`PX_PER_COL`] pixels so the default 320 px cards are 40 columns wide.

use crossterm::style::Color;
use folio_carousel::{
    CarouselConfig, CarouselController, ConfigError, Emphasis, Phase, ProgressDots, Testimonial,
    visible_cards,
};
use folio_core::Instant;
use folio_core::clock::{Clock, SystemClock};
use folio_core::event::{KeyCode, KeyEvent, PointerEvent, PointerKind};

use crate::canvas::{Canvas, Rect, Style, wrap};

/// Pixels per terminal column.
pub const PX_PER_COL: f64 = 8.0;
/// Pixels scrolled per wheel notch before sensitivity is applied.
pub const WHEEL_NOTCH_PX: f64 = 100.0;
/// Card height in rows.
pub const CARD_ROWS: i32 = 11;

const STRIP_TOP: i32 = 3;
const QUOTE_LINES: usize = 4;

/// Carousel screen state.
#[derive(Debug)]
pub struct CarouselScreen<C: Clock + Clone = SystemClock> {
    items: Vec<Testimonial>,
    controller: CarouselController<C>,
    cols: u16,
}

impl CarouselScreen<SystemClock> {
    /// Screen for `items` on a terminal `cols` wide.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the derived carousel configuration is invalid.
    pub fn new(items: Vec<Testimonial>, cols: u16) -> Result<Self, ConfigError> {
        Self::with_clock(items, cols, SystemClock)
    }
}

impl<C: Clock + Clone> CarouselScreen<C> {
    /// Screen driven by `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the derived carousel configuration is invalid.
    pub fn with_clock(items: Vec<Testimonial>, cols: u16, clock: C) -> Result<Self, ConfigError> {
        let controller = CarouselController::with_clock(items.len(), config_for(cols), clock)?;
        Ok(Self {
            items,
            controller,
            cols,
        })
    }

    /// The controller.
    #[must_use]
    pub fn controller(&self) -> &CarouselController<C> {
        &self.controller
    }

    /// Rebuild for a new terminal width, keeping the current item centered.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the derived carousel configuration is invalid.
    pub fn resize(&mut self, cols: u16) -> Result<(), ConfigError> {
        if cols == self.cols {
            return Ok(());
        }
        let index = self.controller.index();
        let clock = self.controller.clock().clone();
        let mut controller =
            CarouselController::with_clock(self.items.len(), config_for(cols), clock)?;
        let slot = controller.sequence().middle_slot(index) as i64;
        let offset = controller.strip().centering_offset(slot);
        controller.set_offset(offset);
        self.controller = controller;
        self.cols = cols;
        Ok(())
    }

    /// Rows occupied by the strip.
    #[must_use]
    pub fn strip_rect(&self) -> Rect {
        Rect::new(0, STRIP_TOP, i32::from(self.cols), CARD_ROWS)
    }

    fn dots_row(&self) -> i32 {
        STRIP_TOP + CARD_ROWS + 1
    }

    fn dots_origin(&self, dots: &ProgressDots) -> i32 {
        (i32::from(self.cols) - i32::from(dots.total_width())).max(0) / 2
    }

    /// Route a key. Returns `true` if anything changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => self.controller.step_by(-1),
            KeyCode::Right => self.controller.step_by(1),
            _ => false,
        }
    }

    /// Route a pointer event. Returns `true` if anything changed.
    pub fn handle_pointer(&mut self, pointer: PointerEvent) -> bool {
        let x = i32::from(pointer.col);
        let y = i32::from(pointer.row);
        let px = f64::from(pointer.col) * PX_PER_COL;
        let on_strip = self.strip_rect().contains(x, y);

        match pointer.kind {
            PointerKind::Press if on_strip => self.controller.begin_drag(px),
            PointerKind::Press if y == self.dots_row() => {
                let dots = ProgressDots::from_controller(&self.controller);
                let rel = x - self.dots_origin(&dots);
                match u16::try_from(rel).ok().and_then(|rel| dots.hit_test(rel)) {
                    Some(index) => self.controller.jump_to(index),
                    None => false,
                }
            }
            PointerKind::Press => false,
            PointerKind::Drag if on_strip => self.controller.update_drag(px),
            PointerKind::Drag | PointerKind::Hover => {
                // Leaving the strip mid-drag ends the drag.
                self.controller.is_dragging() && !on_strip && self.controller.pointer_leave()
            }
            PointerKind::Release => self.controller.end_drag(),
            PointerKind::Wheel(steps) if on_strip => {
                self.controller.apply_wheel_delta(f64::from(steps) * WHEEL_NOTCH_PX)
            }
            PointerKind::Wheel(_) => false,
        }
    }

    /// Drive timers and animation. Returns `true` if a redraw is needed.
    pub fn tick(&mut self) -> bool {
        self.controller.tick().needs_redraw()
    }

    /// When the screen next needs a tick.
    #[must_use]
    pub fn next_wake(&self) -> Option<Instant> {
        self.controller.next_wake()
    }

    /// Draw into `canvas`.
    pub fn render(&self, canvas: &mut Canvas) {
        let width = i32::from(canvas.width());
        canvas.put_str(2, 1, "What clients say", Style::fg(Color::White).bold(), width);
        let status = status_line(
            self.controller.phase(),
            self.controller.index(),
            self.items.len(),
        );
        let status_x = (width - status.chars().count() as i32 - 2).max(20);
        canvas.put_str(status_x, 1, &status, Style::PLAIN.dim(), width);

        if self.items.is_empty() {
            canvas.put_str(2, STRIP_TOP + 1, "No testimonials yet.", Style::PLAIN.dim(), width);
            return;
        }

        for card in visible_cards(&self.controller) {
            let Some(item) = self.items.get(card.item) else {
                continue;
            };
            let x = (card.x / PX_PER_COL).round() as i32;
            let w = (card.width / PX_PER_COL).round() as i32;
            draw_card(canvas, Rect::new(x, STRIP_TOP, w, CARD_ROWS), item, card.emphasis());
        }

        let dots = ProgressDots::from_controller(&self.controller);
        let origin = self.dots_origin(&dots);
        let row = self.dots_row();
        for seg in dots.segments() {
            let style = if seg.active {
                Style::fg(Color::Cyan).bold()
            } else {
                Style::fg(Color::DarkGrey)
            };
            let x = origin + i32::from(seg.x);
            canvas.hline(x, row, i32::from(seg.width), '━', style);
        }
    }
}

fn config_for(cols: u16) -> CarouselConfig {
    CarouselConfig::default().viewport_width(f64::from(cols) * PX_PER_COL)
}

fn status_line(phase: Phase, index: usize, count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    format!("{}/{}  {}", index + 1, count, phase.label())
}

fn draw_card(canvas: &mut Canvas, rect: Rect, item: &Testimonial, emphasis: Emphasis) {
    let (border, text, accent) = match emphasis {
        Emphasis::Current => (
            Style::fg(Color::Cyan),
            Style::fg(Color::White),
            Style::fg(Color::Yellow),
        ),
        Emphasis::Dimmed => (
            Style::fg(Color::DarkGrey).dim(),
            Style::fg(Color::Grey).dim(),
            Style::fg(Color::DarkYellow).dim(),
        ),
    };
    canvas.draw_box(rect, border);

    let inner_x = rect.x + 2;
    let limit = rect.right() - 2;
    let inner_w = usize::try_from(limit - inner_x).unwrap_or(0);

    let rating = item.rating.get();
    let stars = format!(
        "{}{}",
        item.rating.stars(),
        "☆".repeat(usize::from(5 - rating.min(5)))
    );
    canvas.put_str(inner_x, rect.y + 1, &stars, accent, limit);

    let mut lines = wrap(&item.content, inner_w);
    if lines.len() > QUOTE_LINES {
        lines.truncate(QUOTE_LINES);
        if let Some(last) = lines.last_mut() {
            while last.chars().count() + 1 > inner_w && last.pop().is_some() {}
            last.push('…');
        }
    }
    for (i, line) in lines.iter().enumerate() {
        canvas.put_str(inner_x, rect.y + 3 + i as i32, line, text, limit);
    }

    let name_style = if emphasis == Emphasis::Current {
        text.bold()
    } else {
        text
    };
    canvas.put_str(inner_x, rect.bottom() - 3, &item.name, name_style, limit);
    let role = format!("{} @ {}", item.role, item.company);
    canvas.put_str(inner_x, rect.bottom() - 2, &role, text.dim(), limit);
}
