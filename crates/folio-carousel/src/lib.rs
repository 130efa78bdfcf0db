#![forbid(unsafe_code)]

//! Infinite-loop testimonial carousel.
//!
//! A horizontally scrolling strip of fixed-width cards that advances on its
//! own, yields to pointer drags and wheel input, and resumes after a quiet
//! period. The strip repeats the item list several times and silently jumps
//! back to the middle copy near either end so scrolling never runs out.
//!
//! ```rust
//! use folio_carousel::{CarouselConfig, CarouselController};
//! use folio_core::clock::ManualClock;
//!
//! let clock = ManualClock::new();
//! let mut carousel =
//!     CarouselController::with_clock(4, CarouselConfig::default(), clock.clone()).unwrap();
//! clock.advance_ms(2000);
//! carousel.tick();
//! assert_eq!(carousel.index(), 1);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod item;
pub mod machine;
pub mod sequence;
pub mod strip;
pub mod view;

pub use config::CarouselConfig;
pub use controller::{CarouselController, DragAnchor, Mode, TickOutcome};
pub use error::{ConfigError, ItemError};
pub use item::{Rating, Testimonial};
pub use machine::Phase;
pub use view::{CardPlacement, Emphasis, ProgressDots, visible_cards};
