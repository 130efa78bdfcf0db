#![forbid(unsafe_code)]

//! Screens of the demo.

pub mod carousel;
pub mod contact;
