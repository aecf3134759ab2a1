//! In-memory display and graphics backends for lifecycle tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::ffi::c_void;
use std::rc::Rc;

use crate::core::error_channel::{ErrorChannel, ErrorSource};
use crate::foundation::time::ManualClock;
use crate::input::InputEvent;
use crate::render::graphics::{GraphicsBackend, GraphicsError};
use crate::render::window::{DisplayBackend, DisplayWindow, WindowGeometry, WindowHints, WindowSize};

/// Everything the mocks observed, in order
#[derive(Debug, Default)]
pub struct MockLog {
    pub calls: Vec<&'static str>,
    pub hints: Option<WindowHints>,
    pub geometry: Option<WindowGeometry>,
    pub pending_events: Vec<InputEvent>,
    pub should_close: bool,
    pub close_requests: u32,
    pub input_attached: bool,
    pub polls: u64,
    pub viewport_size: Option<WindowSize>,
    pub read_size: Option<WindowSize>,
}

impl MockLog {
    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    pub fn position(&self, call: &str) -> Option<usize> {
        self.calls.iter().position(|c| *c == call)
    }
}

pub type MockState = Rc<RefCell<MockLog>>;

pub struct MockDisplay {
    state: MockState,
    fail_create: bool,
    close_after_polls: Option<u64>,
    script: VecDeque<Vec<InputEvent>>,
    error_on_poll: Option<(u64, ErrorChannel)>,
    error_on_create: Option<ErrorChannel>,
    clock: Option<(ManualClock, u64)>,
    framebuffer_scale: u32,
}

impl MockDisplay {
    pub fn new(state: MockState) -> Self {
        Self {
            state,
            fail_create: false,
            close_after_polls: None,
            script: VecDeque::new(),
            error_on_poll: None,
            error_on_create: None,
            clock: None,
            framebuffer_scale: 1,
        }
    }

    /// `create_window` returns `None`
    pub fn failing_creation(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Simulate the user closing the window during poll number `polls`
    pub fn close_after(mut self, polls: u64) -> Self {
        self.close_after_polls = Some(polls);
        self
    }

    /// Events delivered by successive polls, one batch per poll
    pub fn with_events(mut self, batches: Vec<Vec<InputEvent>>) -> Self {
        self.script = batches.into();
        self
    }

    /// Report a backend error during poll number `poll`
    pub fn error_on_poll(mut self, poll: u64, channel: ErrorChannel) -> Self {
        self.error_on_poll = Some((poll, channel));
        self
    }

    /// Report a backend error while the window is being created
    pub fn error_on_create(mut self, channel: ErrorChannel) -> Self {
        self.error_on_create = Some(channel);
        self
    }

    /// Windows get a framebuffer `scale` times their requested size
    pub fn hidpi(mut self, scale: u32) -> Self {
        self.framebuffer_scale = scale;
        self
    }

    /// Advance `clock` by `millis` on every poll
    pub fn ticking(mut self, clock: ManualClock, millis: u64) -> Self {
        self.clock = Some((clock, millis));
        self
    }
}

impl DisplayBackend for MockDisplay {
    type Window = MockWindow;

    fn apply_hints(&mut self, hints: &WindowHints) {
        let mut log = self.state.borrow_mut();
        log.calls.push("apply_hints");
        log.hints = Some(hints.clone());
    }

    fn create_window(&mut self, geometry: &WindowGeometry) -> Option<MockWindow> {
        let mut log = self.state.borrow_mut();
        log.calls.push("create_window");
        log.geometry = Some(geometry.clone());
        if let Some(channel) = &self.error_on_create {
            channel.report(ErrorSource::Display, "pixel format not supported");
        }
        if self.fail_create {
            return None;
        }

        let framebuffer = WindowSize {
            width: geometry.size.width * self.framebuffer_scale,
            height: geometry.size.height * self.framebuffer_scale,
        };
        Some(MockWindow::new(self.state.clone()).with_framebuffer(framebuffer))
    }

    fn poll_events(&mut self) {
        let mut log = self.state.borrow_mut();
        log.calls.push("poll_events");
        log.polls += 1;
        let poll = log.polls;

        if let Some(batch) = self.script.pop_front() {
            if log.input_attached {
                log.pending_events.extend(batch);
            }
        }
        if self.close_after_polls == Some(poll) {
            log.should_close = true;
        }
        if let Some((at, channel)) = &self.error_on_poll {
            if *at == poll {
                channel.report(ErrorSource::Display, "device lost");
            }
        }
        if let Some((clock, millis)) = &self.clock {
            clock.advance(*millis);
        }
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.state
            .borrow_mut()
            .calls
            .push(if enabled { "vsync_on" } else { "vsync_off" });
    }

    fn destroy_window(&mut self, window: MockWindow) {
        self.state.borrow_mut().calls.push("destroy_window");
        drop(window);
    }
}

pub struct MockWindow {
    state: MockState,
    framebuffer: WindowSize,
}

impl MockWindow {
    pub fn new(state: MockState) -> Self {
        Self {
            state,
            framebuffer: WindowSize {
                width: 640,
                height: 480,
            },
        }
    }

    pub fn with_framebuffer(mut self, framebuffer: WindowSize) -> Self {
        self.framebuffer = framebuffer;
        self
    }
}

impl DisplayWindow for MockWindow {
    fn make_current(&mut self) {
        self.state.borrow_mut().calls.push("make_current");
    }

    fn attach_input(&mut self) {
        let mut log = self.state.borrow_mut();
        log.calls.push("attach_input");
        log.input_attached = true;
    }

    fn detach_input(&mut self) {
        let mut log = self.state.borrow_mut();
        log.calls.push("detach_input");
        log.input_attached = false;
        log.pending_events.clear();
    }

    fn proc_address(&mut self, _name: &str) -> *const c_void {
        std::ptr::null()
    }

    fn drain_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.state.borrow_mut().pending_events)
    }

    fn should_close(&self) -> bool {
        self.state.borrow().should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        let mut log = self.state.borrow_mut();
        if should_close {
            log.close_requests += 1;
        }
        log.should_close = should_close;
    }

    fn swap_buffers(&mut self) {
        self.state.borrow_mut().calls.push("swap_buffers");
    }

    fn framebuffer_size(&self) -> WindowSize {
        self.framebuffer
    }
}

pub struct MockGraphics {
    state: MockState,
    fail_load: bool,
    error_on_load: Option<ErrorChannel>,
    debug_output: bool,
}

impl MockGraphics {
    pub fn new(state: MockState) -> Self {
        Self {
            state,
            fail_load: false,
            error_on_load: None,
            debug_output: true,
        }
    }

    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    /// Report a graphics error while the bindings load
    pub fn error_on_load(mut self, channel: ErrorChannel) -> Self {
        self.error_on_load = Some(channel);
        self
    }

    pub fn without_debug_output(mut self) -> Self {
        self.debug_output = false;
        self
    }
}

impl GraphicsBackend for MockGraphics {
    fn load(&mut self, loader: &mut dyn FnMut(&str) -> *const c_void) -> Result<(), GraphicsError> {
        self.state.borrow_mut().calls.push("load");
        // the mock window resolves nothing, so only `fail_load` decides
        let _ = loader("glGetString");
        if self.fail_load {
            return Err(GraphicsError::MissingEntryPoint("glGetString"));
        }
        if let Some(channel) = &self.error_on_load {
            channel.report(ErrorSource::Graphics, "[1282] invalid operation");
        }
        Ok(())
    }

    fn install_debug_output(&mut self, _errors: &ErrorChannel) -> bool {
        self.state.borrow_mut().calls.push("install_debug_output");
        self.debug_output
    }

    fn init_state(&mut self) {
        self.state.borrow_mut().calls.push("init_state");
    }

    fn viewport(&mut self, _x: i32, _y: i32, size: WindowSize) {
        let mut log = self.state.borrow_mut();
        log.calls.push("viewport");
        log.viewport_size = Some(size);
    }

    fn clear(&mut self, _rgba: [f32; 4]) {
        self.state.borrow_mut().calls.push("clear");
    }

    fn read_pixels(&mut self, size: WindowSize) -> Result<Vec<u8>, GraphicsError> {
        let mut log = self.state.borrow_mut();
        log.calls.push("read_pixels");
        log.read_size = Some(size);
        Ok(vec![128; size.width as usize * size.height as usize * 3])
    }

    fn shutdown(&mut self) {
        self.state.borrow_mut().calls.push("graphics_shutdown");
    }
}
