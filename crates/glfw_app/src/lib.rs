//! # GLFW App
//!
//! Lifecycle harness for a single GLFW window with an OpenGL context.
//!
//! ## Features
//!
//! - **Lifecycle**: window hints, creation, context activation, frame loop
//! - **Guaranteed cleanup**: graphics shutdown runs exactly once on every exit path
//! - **Input hooks**: key, character, mouse button, cursor, enter/leave and scroll
//! - **Default bindings**: Escape closes, Shift+S takes a screenshot
//! - **FPS sampling**: logged every measurement window
//! - **Backend errors**: GLFW and OpenGL debug reports surface as [`AppError`]s
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glfw_app::prelude::*;
//!
//! struct MyApp;
//!
//! impl AppHandler for MyApp {
//!     fn draw(&mut self, ctx: &mut AppContext<'_>) -> AppResult<()> {
//!         ctx.graphics().clear([0.1, 0.2, 0.3, 1.0]);
//!         Ok(())
//!     }
//! }
//!
//! fn main() {
//!     glfw_app::foundation::logging::init("info");
//!     let code = match WindowedApp::with_glfw(AppConfig::new("My App"), MyApp) {
//!         Ok(mut app) => app.run(),
//!         Err(e) => {
//!             log::error!("{e}");
//!             e.exit_code()
//!         }
//!     };
//!     std::process::exit(code);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod input;
pub mod lifecycle;
pub mod render;

mod application;
mod context;
mod windowed_app;

#[cfg(test)]
mod testing;

pub use application::{default_key_policy, AppError, AppHandler, AppResult};
pub use context::{AppContext, FrameInfo};
pub use lifecycle::LifecycleState;
pub use windowed_app::WindowedApp;

/// Common imports for application authors
pub mod prelude {
    pub use crate::{
        core::config::{AppConfig, ContextConfig, ScreenshotConfig, TimingConfig, WindowConfig},
        config::Config,
        default_key_policy,
        foundation::math::{Mat4, Vec2, Vec4},
        input::{Action, InputEvent, Key, Modifiers, MouseButton},
        render::{
            overlay::TextRenderer,
            window::{ContextProfile, WindowHints, WindowPosition, WindowSize},
            GraphicsBackend,
        },
        AppContext, AppError, AppHandler, AppResult, LifecycleState, WindowedApp,
    };
}
