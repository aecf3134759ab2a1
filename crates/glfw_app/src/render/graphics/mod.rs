//! Graphics backend
//!
//! [`GraphicsBackend`] is what the lifecycle calls; [`GlGraphics`] drives
//! OpenGL through the `gl` crate.

pub mod backend;
pub mod debug;
pub mod opengl;

pub use backend::{GraphicsBackend, GraphicsError};
pub use opengl::GlGraphics;
