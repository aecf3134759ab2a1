//! Graphics API contract used by the harness

use std::ffi::c_void;

use thiserror::Error;

use crate::core::error_channel::ErrorChannel;
use crate::render::window::WindowSize;

/// Graphics backend errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// A required entry point could not be resolved from the current context
    #[error("OpenGL entry point {0} is not available")]
    MissingEntryPoint(&'static str),

    /// Operation attempted before [`GraphicsBackend::load`] succeeded
    #[error("graphics bindings are not loaded")]
    NotLoaded,

    /// Size does not fit the graphics API's integer types
    #[error("invalid framebuffer size {width}x{height}")]
    InvalidSize {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

/// Graphics API operations the lifecycle needs
///
/// Every method assumes the context of the owning window is current on the
/// calling thread.
pub trait GraphicsBackend {
    /// Resolve the API's entry points through `loader`. Called once, right
    /// after the context becomes current.
    fn load(&mut self, loader: &mut dyn FnMut(&str) -> *const c_void) -> Result<(), GraphicsError>;

    /// Route driver debug messages into `errors` if the driver can report
    /// them. Returns whether the hook was installed.
    fn install_debug_output(&mut self, errors: &ErrorChannel) -> bool;

    /// Default framebuffer for draw and read, back-face culling and depth
    /// testing on, dithering off
    fn init_state(&mut self);

    /// Set the viewport rectangle
    fn viewport(&mut self, x: i32, y: i32, size: WindowSize);

    /// Clear color and depth of the bound framebuffer
    fn clear(&mut self, rgba: [f32; 4]);

    /// Read the color buffer as tightly packed RGB8, bottom row first
    fn read_pixels(&mut self, size: WindowSize) -> Result<Vec<u8>, GraphicsError>;

    /// Release everything the backend registered with the driver
    fn shutdown(&mut self);
}
