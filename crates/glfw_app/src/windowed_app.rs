//! The windowed application lifecycle
//!
//! [`WindowedApp`] owns one window, its graphics context and an
//! [`AppHandler`]. [`run`](WindowedApp::run) drives it through
//! [`LifecycleState`]: hints, window creation, context activation, default
//! graphics state, then the frame loop. Once the default graphics state is
//! set up, graphics shutdown is guaranteed to run exactly once, however the
//! loop ends.

use std::path::PathBuf;

use crate::application::{dispatch, AppError, AppHandler, AppResult};
use crate::context::{AppContext, FrameInfo};
use crate::core::config::AppConfig;
use crate::core::error_channel::ErrorChannel;
use crate::foundation::math;
use crate::foundation::time::{FpsCounter, FrameClock, SystemClock};
use crate::lifecycle::LifecycleState;
use crate::render::graphics::{GlGraphics, GraphicsBackend};
use crate::render::overlay::{Overlay, TextRenderer};
use crate::render::screenshot::Screenshotter;
use crate::render::window::{
    DisplayBackend, DisplayWindow, GlfwDisplay, WindowGeometry, WindowHints, WindowPosition, WindowSize,
};

/// A single-window application
///
/// Generic over its collaborators so the lifecycle can be driven without a
/// display; [`WindowedApp::with_glfw`] builds the real thing.
pub struct WindowedApp<D, G, C, H>
where
    D: DisplayBackend,
    G: GraphicsBackend,
    C: FrameClock,
    H: AppHandler,
{
    display: D,
    window: Option<D::Window>,
    graphics: G,
    clock: C,
    handler: H,
    errors: ErrorChannel,
    geometry: WindowGeometry,
    config: AppConfig,
    frame: FrameInfo,
    fps_counter: FpsCounter,
    screenshots: Screenshotter,
    overlay: Overlay,
    screenshot_requested: bool,
    state: LifecycleState,
}

impl<H: AppHandler> WindowedApp<GlfwDisplay, GlGraphics, SystemClock, H> {
    /// Initialize GLFW and prepare an OpenGL application
    pub fn with_glfw(config: AppConfig, handler: H) -> AppResult<Self> {
        let errors = ErrorChannel::new();
        let display = GlfwDisplay::init(&errors)?;
        Self::new(
            config,
            display,
            GlGraphics::new(),
            SystemClock::new(),
            handler,
            errors,
        )
    }
}

impl<D, G, C, H> WindowedApp<D, G, C, H>
where
    D: DisplayBackend,
    G: GraphicsBackend,
    C: FrameClock,
    H: AppHandler,
{
    /// Assemble an application from an already initialized display backend
    ///
    /// `errors` must be the channel the display backend reports into. Any
    /// error already waiting on it fails construction.
    pub fn new(
        config: AppConfig,
        display: D,
        graphics: G,
        clock: C,
        handler: H,
        errors: ErrorChannel,
    ) -> AppResult<Self> {
        config.validate()?;

        let geometry = WindowGeometry::from(&config.window);
        let frame = FrameInfo::new(geometry.size, geometry.position);
        let fps_counter =
            FpsCounter::new(config.timing.fps_sample_window_ms, clock.elapsed_millis());
        let screenshots = Screenshotter::from_config(&config.screenshot);

        let app = Self {
            display,
            window: None,
            graphics,
            clock,
            handler,
            errors,
            geometry,
            config,
            frame,
            fps_counter,
            screenshots,
            overlay: Overlay::new(),
            screenshot_requested: false,
            state: LifecycleState::Constructed,
        };
        app.check_backend_errors(AppError::Initialization)?;

        log::debug!("Application '{}' constructed", app.geometry.title);
        Ok(app)
    }

    /// Run the application and return a process exit code
    ///
    /// `0` on a normal close, otherwise [`AppError::exit_code`] of the error
    /// that stopped it. The error is logged.
    pub fn run(&mut self) -> i32 {
        match self.try_run() {
            Ok(()) => {
                log::info!("Application exited after {} frames", self.frame.frame);
                0
            }
            Err(e) => {
                log::error!("{e}");
                e.exit_code()
            }
        }
    }

    /// Run the application, returning the error that stopped it
    ///
    /// Can be called once. A panic inside a hook still releases graphics
    /// resources before it propagates.
    pub fn try_run(&mut self) -> AppResult<()> {
        if self.state != LifecycleState::Constructed {
            return Err(AppError::Initialization(format!(
                "run() called on an application that is already {}",
                self.state
            )));
        }

        self.state = LifecycleState::Creating;
        let result = self.setup().and_then(|()| self.run_guarded());
        if result.is_err() {
            self.state = LifecycleState::Aborted;
        }
        result
    }

    fn setup(&mut self) -> AppResult<()> {
        self.configure_window_hints();
        self.create_window()?;
        self.activate_context()?;
        self.init_graphics_state()
    }

    fn run_guarded(&mut self) -> AppResult<()> {
        let mut app = scopeguard::guard(self, |app| {
            app.shutdown_graphics();
            if std::thread::panicking() {
                app.state = LifecycleState::Aborted;
            }
        });

        {
            let (handler, mut ctx) = app.split()?;
            handler.init_graphics(&mut ctx)?;
        }

        app.state = LifecycleState::Running;
        log::info!("Entering frame loop");
        app.run_loop()
    }

    fn configure_window_hints(&mut self) {
        let mut hints = WindowHints::from_config(&self.config.context);
        self.handler.configure_window_hints(&mut hints);
        log::debug!("Window hints: {hints:?}");
        self.display.apply_hints(&hints);
    }

    fn create_window(&mut self) -> AppResult<()> {
        let window = self.display.create_window(&self.geometry).ok_or_else(|| {
            AppError::WindowCreation(format!(
                "could not create a {}x{} window titled '{}'",
                self.geometry.size.width, self.geometry.size.height, self.geometry.title
            ))
        })?;
        self.window = Some(window);
        self.check_backend_errors(AppError::Initialization)?;

        log::info!(
            "Created {}x{} window '{}'",
            self.geometry.size.width,
            self.geometry.size.height,
            self.geometry.title
        );
        Ok(())
    }

    fn activate_context(&mut self) -> AppResult<()> {
        let window = self
            .window
            .as_mut()
            .ok_or_else(|| AppError::Initialization("no window to activate".to_string()))?;

        window.make_current();

        let size = self.frame.size;
        self.frame.aspect = math::aspect(size.width, size.height);
        self.frame.aspect_inverse = math::aspect(size.height, size.width);

        window.attach_input();
        self.display.set_vsync(self.config.context.vsync);

        self.graphics
            .load(&mut |name| window.proc_address(name))
            .map_err(|e| AppError::GraphicsInit(e.to_string()))?;
        if !self.graphics.install_debug_output(&self.errors) {
            log::warn!("Graphics debug output is not available");
        }

        self.check_backend_errors(AppError::Initialization)
    }

    fn init_graphics_state(&mut self) -> AppResult<()> {
        let framebuffer = self.window()?.framebuffer_size();
        self.graphics.init_state();
        self.graphics.viewport(0, 0, framebuffer);
        self.check_backend_errors(AppError::Initialization)
    }

    fn run_loop(&mut self) -> AppResult<()> {
        self.fps_counter.restart(self.clock.elapsed_millis());

        while !self.window()?.should_close() {
            self.step()?;
        }

        log::info!("Window closed, leaving frame loop");
        Ok(())
    }

    fn step(&mut self) -> AppResult<()> {
        self.poll_events()?;
        self.check_backend_errors(AppError::Runtime)?;

        self.frame.frame += 1;

        {
            let (handler, mut ctx) = self.split()?;
            handler.update(&mut ctx)?;
        }
        {
            let (handler, mut ctx) = self.split()?;
            handler.draw(&mut ctx)?;
        }

        if std::mem::take(&mut self.screenshot_requested) {
            self.capture_screenshot()?;
        }

        self.finish_frame()?;
        self.check_backend_errors(AppError::Runtime)?;
        self.sample_fps();
        Ok(())
    }

    fn poll_events(&mut self) -> AppResult<()> {
        self.display.poll_events();

        let events = self.window_mut()?.drain_events();
        if events.is_empty() {
            return Ok(());
        }

        let (handler, mut ctx) = self.split()?;
        for event in events {
            dispatch(handler, &mut ctx, event);
        }
        Ok(())
    }

    fn finish_frame(&mut self) -> AppResult<()> {
        self.window_mut()?.swap_buffers();
        Ok(())
    }

    fn sample_fps(&mut self) {
        if let Some(fps) = self.fps_counter.tick(self.clock.elapsed_millis()) {
            self.frame.fps = fps;
            log::info!("FPS: {fps:.2}");
        }
    }

    fn capture_screenshot(&mut self) -> AppResult<PathBuf> {
        let framebuffer = self.window()?.framebuffer_size();
        let path = self.screenshots.capture(&mut self.graphics, framebuffer)?;
        Ok(path)
    }

    fn shutdown_graphics(&mut self) {
        log::info!("Shutting down graphics");
        if let Ok((handler, mut ctx)) = self.split() {
            handler.shutdown_graphics(&mut ctx);
        }
        self.graphics.shutdown();
        self.state = LifecycleState::ShuttingDown;
    }

    /// Drain the error channel, failing with the oldest report
    fn check_backend_errors(&self, kind: fn(String) -> AppError) -> AppResult<()> {
        let mut pending = self.errors.drain().into_iter();
        let Some(first) = pending.next() else {
            return Ok(());
        };
        for later in pending {
            log::error!("Additional backend error: {later}");
        }
        Err(kind(first.to_string()))
    }

    fn window(&self) -> AppResult<&D::Window> {
        self.window
            .as_ref()
            .ok_or_else(|| AppError::Runtime("window is gone".to_string()))
    }

    fn window_mut(&mut self) -> AppResult<&mut D::Window> {
        self.window
            .as_mut()
            .ok_or_else(|| AppError::Runtime("window is gone".to_string()))
    }

    fn split(&mut self) -> AppResult<(&mut H, AppContext<'_>)> {
        let window = self
            .window
            .as_mut()
            .ok_or_else(|| AppError::Runtime("window is gone".to_string()))?;
        let ctx = AppContext::new(
            window,
            &mut self.graphics,
            &mut self.overlay,
            &self.frame,
            &mut self.screenshot_requested,
        );
        Ok((&mut self.handler, ctx))
    }

    /// Capture the framebuffer right now
    ///
    /// Inside hooks prefer [`AppContext::request_screenshot`], which waits
    /// until the frame has been drawn.
    pub fn screenshot(&mut self) -> AppResult<PathBuf> {
        if self.window.is_none() {
            return Err(AppError::Runtime(format!(
                "cannot take a screenshot while {}",
                self.state
            )));
        }
        self.capture_screenshot()
    }

    /// Install the renderer used for overlay text
    pub fn set_text_renderer(&mut self, renderer: Box<dyn TextRenderer>) {
        self.overlay.set_renderer(renderer);
    }

    /// Frames started so far
    pub const fn frame(&self) -> u64 {
        self.frame.frame
    }

    /// Last FPS sample
    pub const fn fps(&self) -> f32 {
        self.frame.fps
    }

    /// Requested window size
    pub const fn window_size(&self) -> WindowSize {
        self.frame.size
    }

    /// Requested window position
    pub const fn window_position(&self) -> WindowPosition {
        self.frame.position
    }

    /// Width over height, zero before the context is activated
    pub const fn aspect(&self) -> f32 {
        self.frame.aspect
    }

    /// Height over width, zero before the context is activated
    pub const fn aspect_inverse(&self) -> f32 {
        self.frame.aspect_inverse
    }

    /// Current lifecycle state
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// Whether the window currently exists
    ///
    /// `false` before `run` and after a failed creation.
    pub const fn has_window(&self) -> bool {
        self.window.is_some()
    }

    /// The application's hooks
    pub const fn handler(&self) -> &H {
        &self.handler
    }

    /// The application's hooks, mutably
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }
}

impl<D, G, C, H> Drop for WindowedApp<D, G, C, H>
where
    D: DisplayBackend,
    G: GraphicsBackend,
    C: FrameClock,
    H: AppHandler,
{
    fn drop(&mut self) {
        if let Some(mut window) = self.window.take() {
            window.detach_input();
            self.display.destroy_window(window);
            log::debug!("Window '{}' destroyed", self.geometry.title);
        }
        self.state = LifecycleState::Destroyed;
    }
}
