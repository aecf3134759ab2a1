//! What an [`AppHandler`](crate::AppHandler) hook can see and do

use crate::foundation::math::Vec2;
use crate::render::graphics::GraphicsBackend;
use crate::render::overlay::Overlay;
use crate::render::window::{DisplayWindow, WindowPosition, WindowSize};

/// Read-only frame bookkeeping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Loop iterations started so far; never reset
    pub frame: u64,
    /// Last FPS sample, zero until the first measurement window closes
    pub fps: f32,
    /// Requested window size
    pub size: WindowSize,
    /// Requested window position
    pub position: WindowPosition,
    /// Width over height, zero until the context is activated
    pub aspect: f32,
    /// Height over width, zero until the context is activated
    pub aspect_inverse: f32,
}

impl FrameInfo {
    pub(crate) const fn new(size: WindowSize, position: WindowPosition) -> Self {
        Self {
            frame: 0,
            fps: 0.0,
            size,
            position,
            aspect: 0.0,
            aspect_inverse: 0.0,
        }
    }
}

/// Handle passed to every hook while the window exists
pub struct AppContext<'a> {
    window: &'a mut dyn DisplayWindow,
    graphics: &'a mut dyn GraphicsBackend,
    overlay: &'a mut Overlay,
    info: &'a FrameInfo,
    screenshot_requested: &'a mut bool,
}

impl<'a> AppContext<'a> {
    pub(crate) fn new(
        window: &'a mut dyn DisplayWindow,
        graphics: &'a mut dyn GraphicsBackend,
        overlay: &'a mut Overlay,
        info: &'a FrameInfo,
        screenshot_requested: &'a mut bool,
    ) -> Self {
        Self {
            window,
            graphics,
            overlay,
            info,
            screenshot_requested,
        }
    }

    /// Current frame number, starting at 1 for the first loop iteration
    pub const fn frame(&self) -> u64 {
        self.info.frame
    }

    /// Last FPS sample
    pub const fn fps(&self) -> f32 {
        self.info.fps
    }

    /// Requested window size
    pub const fn window_size(&self) -> WindowSize {
        self.info.size
    }

    /// Requested window position
    pub const fn window_position(&self) -> WindowPosition {
        self.info.position
    }

    /// Width over height
    pub const fn aspect(&self) -> f32 {
        self.info.aspect
    }

    /// Height over width
    pub const fn aspect_inverse(&self) -> f32 {
        self.info.aspect_inverse
    }

    /// Ask the loop to stop; observed before the next iteration starts
    ///
    /// Asking again while a close is pending does nothing.
    pub fn request_close(&mut self) {
        if self.window.should_close() {
            return;
        }
        log::info!("Window close requested at frame {}", self.info.frame);
        self.window.set_should_close(true);
    }

    /// Whether a close is pending
    pub fn is_closing(&self) -> bool {
        self.window.should_close()
    }

    /// Capture the framebuffer once the current frame has been drawn
    pub fn request_screenshot(&mut self) {
        log::debug!("Screenshot requested");
        *self.screenshot_requested = true;
    }

    /// Graphics backend of the window
    pub fn graphics(&mut self) -> &mut dyn GraphicsBackend {
        &mut *self.graphics
    }

    /// Draw overlay text at a normalized position, see [`Overlay::render_text`]
    pub fn render_overlay_text(&mut self, text: &str, position: Vec2) {
        self.overlay
            .render_text(text, position, self.info.aspect_inverse);
    }
}
