//! Foundation module - small utilities the harness is built from
//!
//! - Logging setup
//! - Frame clocks and FPS sampling
//! - Math aliases and projection helpers

pub mod logging;
pub mod math;
pub mod time;
