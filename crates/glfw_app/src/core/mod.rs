//! # Core Module
//!
//! Shared pieces every other subsystem leans on:
//!
//! - **Config**: what the application asks for before the window exists
//! - **Error channel**: where backend C callbacks drop their error reports

pub mod config;
pub mod error_channel;

pub use config::{AppConfig, ContextConfig, ScreenshotConfig, TimingConfig, WindowConfig};
pub use error_channel::{BackendError, ErrorChannel, ErrorSource};
