//! Window management subsystem
//!
//! - **`backend`**: the traits the application drives, plus hints and geometry
//! - **`glfw_backend`**: the GLFW implementation
//!
//! One window belongs to one application. Input events drained from a window
//! are dispatched to that application and nowhere else.

pub mod backend;
pub mod glfw_backend;

pub use backend::{
    ContextProfile, DisplayBackend, DisplayWindow, WindowGeometry, WindowHints, WindowPosition,
    WindowSize,
};
pub use glfw_backend::{GlfwDisplay, GlfwWindow};
