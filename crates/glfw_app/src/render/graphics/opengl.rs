//! OpenGL implementation of [`GraphicsBackend`] on the `gl` crate

#![allow(unsafe_code)]

use std::ffi::{c_void, CStr};

use gl::types::GLsizei;

use crate::core::error_channel::ErrorChannel;
use crate::render::graphics::backend::{GraphicsBackend, GraphicsError};
use crate::render::graphics::debug::debug_callback;
use crate::render::window::WindowSize;

/// OpenGL through globally loaded `gl` function pointers
#[derive(Default)]
pub struct GlGraphics {
    loaded: bool,
    debug_sink: Option<Box<ErrorChannel>>,
}

impl GlGraphics {
    /// Create an unloaded backend
    pub fn new() -> Self {
        Self::default()
    }

    fn gl_string(name: gl::types::GLenum) -> String {
        // SAFETY: bindings are loaded and a context is current
        let ptr = unsafe { gl::GetString(name) };
        if ptr.is_null() {
            return "unknown".to_string();
        }
        // SAFETY: glGetString returns a static NUL-terminated string
        unsafe { CStr::from_ptr(ptr.cast()) }
            .to_string_lossy()
            .into_owned()
    }

    fn size_to_gl(size: WindowSize) -> Result<(GLsizei, GLsizei), GraphicsError> {
        let invalid = || GraphicsError::InvalidSize {
            width: size.width,
            height: size.height,
        };
        let width = GLsizei::try_from(size.width).map_err(|_| invalid())?;
        let height = GLsizei::try_from(size.height).map_err(|_| invalid())?;
        Ok((width, height))
    }
}

impl GraphicsBackend for GlGraphics {
    fn load(&mut self, loader: &mut dyn FnMut(&str) -> *const c_void) -> Result<(), GraphicsError> {
        gl::load_with(|name| loader(name));

        let required = [
            ("glGetString", gl::GetString::is_loaded()),
            ("glGetError", gl::GetError::is_loaded()),
            ("glEnable", gl::Enable::is_loaded()),
            ("glDisable", gl::Disable::is_loaded()),
            ("glViewport", gl::Viewport::is_loaded()),
            ("glBindFramebuffer", gl::BindFramebuffer::is_loaded()),
            ("glReadPixels", gl::ReadPixels::is_loaded()),
        ];
        if let Some((name, _)) = required.into_iter().find(|&(_, loaded)| !loaded) {
            return Err(GraphicsError::MissingEntryPoint(name));
        }

        log::info!(
            "OpenGL {} on {} ({})",
            Self::gl_string(gl::VERSION),
            Self::gl_string(gl::RENDERER),
            Self::gl_string(gl::VENDOR)
        );

        // Loading can leave a stale error flag behind on some drivers
        // SAFETY: bindings are loaded and a context is current
        unsafe {
            gl::GetError();
        }

        self.loaded = true;
        Ok(())
    }

    fn install_debug_output(&mut self, errors: &ErrorChannel) -> bool {
        // The gl crate falls back to the ARB entry point when core lacks it
        if !self.loaded || !gl::DebugMessageCallback::is_loaded() {
            log::info!("OpenGL debug output not available");
            return false;
        }

        let mut sink = Box::new(errors.clone());
        let user_param = std::ptr::addr_of_mut!(*sink).cast::<c_void>();

        // SAFETY: the boxed channel is kept in `self` until the callback is removed
        unsafe {
            gl::Enable(gl::DEBUG_OUTPUT);
            gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
            gl::DebugMessageCallback(Some(debug_callback), user_param);
            gl::DebugMessageControl(
                gl::DONT_CARE,
                gl::DONT_CARE,
                gl::DONT_CARE,
                0,
                std::ptr::null(),
                gl::TRUE,
            );
        }

        self.debug_sink = Some(sink);
        log::debug!("OpenGL debug output installed");
        true
    }

    fn init_state(&mut self) {
        // SAFETY: bindings are loaded and a context is current
        unsafe {
            gl::BindFramebuffer(gl::DRAW_FRAMEBUFFER, 0);
            gl::BindFramebuffer(gl::READ_FRAMEBUFFER, 0);
            gl::Enable(gl::CULL_FACE);
            gl::Enable(gl::DEPTH_TEST);
            gl::Disable(gl::DITHER);
        }
    }

    fn viewport(&mut self, x: i32, y: i32, size: WindowSize) {
        match Self::size_to_gl(size) {
            // SAFETY: bindings are loaded and a context is current
            Ok((width, height)) => unsafe { gl::Viewport(x, y, width, height) },
            Err(e) => log::warn!("Viewport not changed: {e}"),
        }
    }

    fn clear(&mut self, rgba: [f32; 4]) {
        let [r, g, b, a] = rgba;
        // SAFETY: bindings are loaded and a context is current
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    fn read_pixels(&mut self, size: WindowSize) -> Result<Vec<u8>, GraphicsError> {
        if !self.loaded {
            return Err(GraphicsError::NotLoaded);
        }
        let (width, height) = Self::size_to_gl(size)?;
        let mut pixels = vec![0_u8; size.width as usize * size.height as usize * 3];

        // SAFETY: `pixels` holds exactly width * height RGB8 texels and
        // PACK_ALIGNMENT 1 keeps rows tightly packed
        unsafe {
            gl::PixelStorei(gl::PACK_ALIGNMENT, 1);
            gl::ReadPixels(
                0,
                0,
                width,
                height,
                gl::RGB,
                gl::UNSIGNED_BYTE,
                pixels.as_mut_ptr().cast(),
            );
        }
        Ok(pixels)
    }

    fn shutdown(&mut self) {
        if self.debug_sink.is_some() {
            // SAFETY: the context that registered the callback is still current
            unsafe {
                gl::DebugMessageCallback(None, std::ptr::null_mut());
            }
            self.debug_sink = None;
            log::debug!("OpenGL debug output removed");
        }
    }
}

impl Drop for GlGraphics {
    fn drop(&mut self) {
        // Without a context there is no safe way to unregister the callback,
        // so the channel it points at has to stay alive
        if let Some(sink) = self.debug_sink.take() {
            log::warn!("GlGraphics dropped without shutdown, leaking debug sink");
            std::mem::forget(sink);
        }
    }
}
