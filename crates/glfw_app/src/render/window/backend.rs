//! Backend-agnostic display contract
//!
//! The harness never talks to GLFW directly. It drives a [`DisplayBackend`]
//! (library-wide state: hints, window creation, event pumping, swap
//! interval) and the [`DisplayWindow`] it hands back (one OS window with its
//! GL context). The GLFW implementation lives in `glfw_backend.rs`; tests use an
//! in-memory one.

use std::ffi::c_void;

use crate::core::config::{ContextConfig, WindowConfig};
use crate::input::InputEvent;

/// OpenGL profile to request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextProfile {
    /// Core profile, no deprecated entry points
    Core,
    /// Compatibility profile
    Compatibility,
    /// Whatever the driver gives
    Any,
}

/// Everything that must be decided before the window exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowHints {
    /// Requested (major, minor) OpenGL version
    pub context_version: (u32, u32),
    /// Requested profile
    pub profile: ContextProfile,
    /// Depth buffer precision in bits
    pub depth_bits: u32,
    /// Forward-compatible context; macOS refuses 3.2+ core contexts without it
    pub forward_compatible: bool,
    /// Ask the driver for a debug context
    pub debug_context: bool,
    /// Window can be resized by the user
    pub resizable: bool,
    /// Window is shown as soon as it is created
    pub visible: bool,
}

impl WindowHints {
    /// Build hints from the context section of the configuration
    pub fn from_config(context: &ContextConfig) -> Self {
        Self {
            context_version: (context.major, context.minor),
            profile: ContextProfile::Core,
            depth_bits: context.depth_bits,
            forward_compatible: cfg!(target_os = "macos"),
            debug_context: context.debug_context(),
            resizable: false,
            visible: true,
        }
    }
}

impl Default for WindowHints {
    fn default() -> Self {
        Self::from_config(&ContextConfig::default())
    }
}

/// Window size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Window position in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPosition {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
}

/// Requested window placement and title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowGeometry {
    /// Title bar text
    pub title: String,
    /// Client area size
    pub size: WindowSize,
    /// Top-left corner on screen
    pub position: WindowPosition,
}

impl From<&WindowConfig> for WindowGeometry {
    fn from(config: &WindowConfig) -> Self {
        Self {
            title: config.title.clone(),
            size: WindowSize {
                width: config.width,
                height: config.height,
            },
            position: WindowPosition {
                x: config.x,
                y: config.y,
            },
        }
    }
}

/// Library-wide side of a display backend
///
/// Constructing an implementation initializes the library; dropping it
/// terminates the library. Every window must be handed back through
/// [`destroy_window`](Self::destroy_window) before that happens.
pub trait DisplayBackend {
    /// Window type produced by this backend
    type Window: DisplayWindow;

    /// Set the hints used by the next [`create_window`](Self::create_window)
    fn apply_hints(&mut self, hints: &WindowHints);

    /// Create a window and its rendering context
    ///
    /// `None` means the library refused; it is a normal return, not an error,
    /// and the caller decides what it means.
    fn create_window(&mut self, geometry: &WindowGeometry) -> Option<Self::Window>;

    /// Pump the OS event queue
    ///
    /// Events for every window are queued while this runs; fetch them with
    /// [`DisplayWindow::drain_events`].
    fn poll_events(&mut self);

    /// Lock buffer swaps of the current context to the display refresh
    fn set_vsync(&mut self, enabled: bool);

    /// Release a window. Input must already be detached.
    fn destroy_window(&mut self, window: Self::Window) {
        drop(window);
    }
}

/// One window with its rendering context
pub trait DisplayWindow {
    /// Make this window's context current on the calling thread
    fn make_current(&mut self);

    /// Start delivering key, character, mouse button, cursor move, cursor
    /// enter and scroll events
    fn attach_input(&mut self);

    /// Stop delivering input events
    fn detach_input(&mut self);

    /// Address of a graphics API entry point, null if the driver lacks it
    fn proc_address(&mut self, name: &str) -> *const c_void;

    /// Input events queued by the last poll, oldest first
    fn drain_events(&mut self) -> Vec<InputEvent>;

    /// Whether a close has been requested by the user or the application
    fn should_close(&self) -> bool;

    /// Request or cancel closing the window
    fn set_should_close(&mut self, should_close: bool);

    /// Present the back buffer
    fn swap_buffers(&mut self);

    /// Size of the default framebuffer in pixels
    ///
    /// Differs from the requested window size on HiDPI displays, where one
    /// screen coordinate covers several pixels.
    fn framebuffer_size(&self) -> WindowSize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hints_request_gl33_core_with_16_bit_depth() {
        let hints = WindowHints::default();
        assert_eq!(hints.context_version, (3, 3));
        assert_eq!(hints.profile, ContextProfile::Core);
        assert_eq!(hints.depth_bits, 16);
        assert_eq!(hints.forward_compatible, cfg!(target_os = "macos"));
        assert_eq!(hints.debug_context, cfg!(debug_assertions));
    }

    #[test]
    fn explicit_debug_context_overrides_build_type() {
        let context = ContextConfig {
            debug_context: Some(false),
            ..ContextConfig::default()
        };
        assert!(!WindowHints::from_config(&context).debug_context);
    }

    #[test]
    fn geometry_comes_from_window_config() {
        let config = WindowConfig::new("geometry").with_size(800, 600).with_position(10, 20);
        let geometry = WindowGeometry::from(&config);
        assert_eq!(geometry.title, "geometry");
        assert_eq!(geometry.size, WindowSize { width: 800, height: 600 });
        assert_eq!(geometry.position, WindowPosition { x: 10, y: 20 });
    }
}
