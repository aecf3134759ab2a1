//! Rendering collaborators
//!
//! - **`window`**: display backend (GLFW) and the window it creates
//! - **`graphics`**: graphics backend (OpenGL) and its debug hook
//! - **`overlay`**: matrix stacks and 2D text overlay
//! - **`screenshot`**: framebuffer capture to PNG

pub mod graphics;
pub mod overlay;
pub mod screenshot;
pub mod window;

pub use graphics::{GlGraphics, GraphicsBackend, GraphicsError};
pub use overlay::{MatrixStack, MatrixStacks, Overlay, TextRenderer};
pub use screenshot::{ScreenshotError, Screenshotter};
pub use window::{DisplayBackend, DisplayWindow, GlfwDisplay, WindowHints};
