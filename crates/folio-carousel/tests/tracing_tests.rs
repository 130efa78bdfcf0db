#![forbid(unsafe_code)]

//! Log output of the carousel controller.
//!
//! Phase transitions, rewrap jumps, and index clamping are the events an
//! operator needs to reconstruct a session from a log file, so they are
//! asserted here rather than left to chance.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use folio_carousel::{CarouselConfig, CarouselController};
use folio_core::clock::ManualClock;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, SubscriberExt};

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: HashMap<String, String>,
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.insert(field.name().to_string(), value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .insert(field.name().to_string(), format!("{value:?}"));
        }
    }
}

#[derive(Default)]
struct EventLog {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventLog {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

fn with_captured_events<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let log = EventLog::default();
    let events = log.events.clone();
    let subscriber = tracing_subscriber::registry().with(log);
    tracing::subscriber::with_default(subscriber, || {
        tracing::callsite::rebuild_interest_cache();
        f();
    });
    let captured = events.lock().unwrap().clone();
    captured
}

fn transitions(events: &[CapturedEvent]) -> Vec<(String, String)> {
    events
        .iter()
        .filter(|e| e.message == "carousel transition")
        .map(|e| (e.fields["from"].clone(), e.fields["to"].clone()))
        .collect()
}

fn mount(items: usize, clock: &ManualClock) -> CarouselController<ManualClock> {
    CarouselController::with_clock(items, CarouselConfig::default(), clock.clone())
        .expect("valid config")
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn drag_cycle_logs_each_transition() {
    let events = with_captured_events(|| {
        let clock = ManualClock::new();
        let mut c = mount(5, &clock);
        c.begin_drag(0.0);
        c.update_drag(-40.0);
        c.end_drag();
        clock.advance_ms(3000);
        c.tick();
    });
    assert_eq!(
        transitions(&events),
        vec![
            ("auto".to_string(), "dragging".to_string()),
            ("dragging".to_string(), "paused".to_string()),
            ("paused".to_string(), "auto".to_string()),
        ]
    );
}

#[test]
fn repeated_wheel_logs_one_transition() {
    let events = with_captured_events(|| {
        let clock = ManualClock::new();
        let mut c = mount(5, &clock);
        c.apply_wheel_delta(10.0);
        c.apply_wheel_delta(10.0);
        c.apply_wheel_delta(10.0);
    });
    assert_eq!(
        transitions(&events),
        vec![("auto".to_string(), "paused".to_string())]
    );
}

#[test]
fn rewrap_is_logged() {
    let events = with_captured_events(|| {
        let clock = ManualClock::new();
        let mut c = mount(4, &clock);
        c.set_offset(0.0);
    });
    let rewrap = events
        .iter()
        .find(|e| e.message == "carousel rewrap")
        .expect("rewrap event");
    assert_eq!(rewrap.level, tracing::Level::DEBUG);
    assert!(rewrap.fields.contains_key("shift"));
}

#[test]
fn out_of_range_jump_warns() {
    let events = with_captured_events(|| {
        let clock = ManualClock::new();
        let mut c = mount(3, &clock);
        c.jump_to(42);
    });
    let warning = events
        .iter()
        .find(|e| e.level == tracing::Level::WARN)
        .expect("warning for clamped index");
    assert_eq!(warning.fields["index"], "42");
}

#[test]
fn unmount_is_logged_once() {
    let events = with_captured_events(|| {
        let clock = ManualClock::new();
        let mut c = mount(3, &clock);
        c.unmount();
        drop(c);
    });
    let count = events
        .iter()
        .filter(|e| e.message == "carousel unmounted")
        .count();
    assert_eq!(count, 1);
}
