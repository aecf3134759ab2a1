//! Application hooks and error taxonomy

use thiserror::Error;

use crate::config::ConfigError;
use crate::context::AppContext;
use crate::input::{Action, InputEvent, Key, Modifiers, MouseButton};
use crate::render::screenshot::ScreenshotError;
use crate::render::window::WindowHints;

/// Result type used by hooks and the lifecycle
pub type AppResult<T> = Result<T, AppError>;

/// Overridable application behaviour
///
/// Implement this trait and override only what you need; every method has a
/// working default. Hooks run on the thread that owns the window. Input
/// hooks fire while events are being polled at the top of a frame, before
/// [`update`](Self::update).
pub trait AppHandler {
    /// Adjust the hints before the window is created
    ///
    /// Called exactly once. The hints arrive filled in from the
    /// configuration: OpenGL 3.3 core, 16-bit depth, forward-compatible on
    /// macOS, a debug context in debug builds.
    fn configure_window_hints(&mut self, _hints: &mut WindowHints) {}

    /// Create application-owned graphics resources
    ///
    /// Called once, after the default graphics state is set up. If this
    /// fails, [`shutdown_graphics`](Self::shutdown_graphics) still runs.
    fn init_graphics(&mut self, _ctx: &mut AppContext<'_>) -> AppResult<()> {
        Ok(())
    }

    /// Per-frame logic
    fn update(&mut self, _ctx: &mut AppContext<'_>) -> AppResult<()> {
        Ok(())
    }

    /// Per-frame rendering into the back buffer
    fn draw(&mut self, _ctx: &mut AppContext<'_>) -> AppResult<()> {
        Ok(())
    }

    /// Release application-owned graphics resources
    ///
    /// Runs exactly once per [`run`](crate::WindowedApp::run) that got as far
    /// as the loop setup, whether the loop ended normally, with an error or by
    /// panicking.
    fn shutdown_graphics(&mut self, _ctx: &mut AppContext<'_>) {}

    /// A key changed state; defaults to [`default_key_policy`]
    fn on_key(
        &mut self,
        ctx: &mut AppContext<'_>,
        key: Key,
        _scancode: i32,
        action: Action,
        mods: Modifiers,
    ) {
        default_key_policy(ctx, key, action, mods);
    }

    /// A character was typed
    fn on_character(&mut self, _ctx: &mut AppContext<'_>, _ch: char) {}

    /// A mouse button changed state
    fn on_mouse_button(
        &mut self,
        _ctx: &mut AppContext<'_>,
        _button: MouseButton,
        _action: Action,
        _mods: Modifiers,
    ) {
    }

    /// The cursor moved
    fn on_mouse_move(&mut self, _ctx: &mut AppContext<'_>, _x: f64, _y: f64) {}

    /// The cursor entered or left the window
    fn on_mouse_enter(&mut self, _ctx: &mut AppContext<'_>, _entered: bool) {}

    /// The user scrolled
    fn on_scroll(&mut self, _ctx: &mut AppContext<'_>, _x: f64, _y: f64) {}
}

/// Key bindings every application gets unless it overrides
/// [`AppHandler::on_key`]
///
/// Only presses count: Escape closes the window, Shift+S takes a screenshot.
pub fn default_key_policy(ctx: &mut AppContext<'_>, key: Key, action: Action, mods: Modifiers) {
    if action != Action::Press {
        return;
    }

    match key {
        Key::Escape => ctx.request_close(),
        Key::S if mods.contains(Modifiers::SHIFT) => ctx.request_screenshot(),
        _ => {}
    }
}

/// Route one input event to the matching hook
pub(crate) fn dispatch<H: AppHandler + ?Sized>(
    handler: &mut H,
    ctx: &mut AppContext<'_>,
    event: InputEvent,
) {
    match event {
        InputEvent::Key {
            key,
            scancode,
            action,
            mods,
        } => handler.on_key(ctx, key, scancode, action, mods),
        InputEvent::Character(ch) => handler.on_character(ctx, ch),
        InputEvent::MouseButton {
            button,
            action,
            mods,
        } => handler.on_mouse_button(ctx, button, action, mods),
        InputEvent::CursorMoved { x, y } => handler.on_mouse_move(ctx, x, y),
        InputEvent::CursorEntered(entered) => handler.on_mouse_enter(ctx, entered),
        InputEvent::Scroll { x, y } => handler.on_scroll(ctx, x, y),
    }
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Display backend or other pre-loop setup failed
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// Graphics bindings could not be loaded
    #[error("Graphics initialization failed: {0}")]
    GraphicsInit(String),

    /// The display backend did not produce a window
    #[error("Window creation failed: {0}")]
    WindowCreation(String),

    /// Error raised inside the frame loop
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Screenshot capture failed
    #[error("Screenshot error: {0}")]
    Screenshot(#[from] ScreenshotError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Whether the error stops the application before the frame loop
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Initialization(_)
                | Self::GraphicsInit(_)
                | Self::WindowCreation(_)
                | Self::Config(_)
        )
    }

    /// Process exit code reported by [`WindowedApp::run`](crate::WindowedApp::run)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Runtime(_) | Self::Screenshot(_) => 1,
            Self::Initialization(_) | Self::GraphicsInit(_) | Self::Config(_) => 2,
            Self::WindowCreation(_) => 3,
        }
    }
}
