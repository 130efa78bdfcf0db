#![forbid(unsafe_code)]

//! Terminal showcase for the Folio carousel and contact form.

pub mod app;
pub mod canvas;
pub mod cli;
pub mod screens;
