#![forbid(unsafe_code)]

//! Core: input events, clocks, timer slots, animation, logging, and the
//! terminal session used by the Folio widgets.

pub mod animation;
pub mod clock;
pub mod event;
pub mod logging;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal_session;
pub mod timer;

pub use web_time::{Duration, Instant};
