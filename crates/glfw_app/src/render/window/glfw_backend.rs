//! Display backend using GLFW
//!
//! Input arrives through GLFW's per-event-kind polling: while
//! [`GlfwDisplay::poll_events`] runs, the binding queues every callback on the
//! window's receiver, and [`GlfwWindow::drain_events`] translates the queue.
//! There is exactly one consumer per window, the application that created it.

use std::ffi::c_void;

use glfw::Context;

use crate::application::{AppError, AppResult};
use crate::core::error_channel::{ErrorChannel, ErrorSource};
use crate::input::{Action, InputEvent, Key, Modifiers, MouseButton};
use crate::render::window::backend::{
    ContextProfile, DisplayBackend, DisplayWindow, WindowGeometry, WindowHints, WindowSize,
};

/// GLFW library handle
///
/// GLFW is terminated when this and every window created from it are dropped.
pub struct GlfwDisplay {
    glfw: glfw::Glfw,
}

impl GlfwDisplay {
    /// Initialize GLFW and route its error callback into `errors`
    pub fn init(errors: &ErrorChannel) -> AppResult<Self> {
        let reporter = errors.clone();
        let glfw = glfw::init(move |error: glfw::Error, description: String| {
            log::error!("GLFW error {error:?}: {description}");
            reporter.report(ErrorSource::Display, format!("{error:?}: {description}"));
        })
        .map_err(|e| AppError::Initialization(format!("Failed to initialize GLFW: {e:?}")))?;

        log::info!("GLFW {} initialized", glfw::get_version_string());
        Ok(Self { glfw })
    }
}

impl DisplayBackend for GlfwDisplay {
    type Window = GlfwWindow;

    fn apply_hints(&mut self, hints: &WindowHints) {
        let (major, minor) = hints.context_version;
        let profile = match hints.profile {
            ContextProfile::Core => glfw::OpenGlProfileHint::Core,
            ContextProfile::Compatibility => glfw::OpenGlProfileHint::Compat,
            ContextProfile::Any => glfw::OpenGlProfileHint::Any,
        };

        self.glfw.default_window_hints();
        self.glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
        self.glfw.window_hint(glfw::WindowHint::OpenGlProfile(profile));
        self.glfw.window_hint(glfw::WindowHint::DepthBits(Some(hints.depth_bits)));
        self.glfw
            .window_hint(glfw::WindowHint::OpenGlForwardCompat(hints.forward_compatible));
        self.glfw
            .window_hint(glfw::WindowHint::OpenGlDebugContext(hints.debug_context));
        self.glfw.window_hint(glfw::WindowHint::Resizable(hints.resizable));
        self.glfw.window_hint(glfw::WindowHint::Visible(hints.visible));
    }

    fn create_window(&mut self, geometry: &WindowGeometry) -> Option<GlfwWindow> {
        let (mut window, events) = self.glfw.create_window(
            geometry.size.width,
            geometry.size.height,
            &geometry.title,
            glfw::WindowMode::Windowed,
        )?;
        window.set_pos(geometry.position.x, geometry.position.y);

        Some(GlfwWindow { window, events })
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    fn set_vsync(&mut self, enabled: bool) {
        let interval = if enabled {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        };
        self.glfw.set_swap_interval(interval);
    }
}

impl Drop for GlfwDisplay {
    fn drop(&mut self) {
        log::debug!("Releasing GLFW");
    }
}

/// GLFW window wrapper
pub struct GlfwWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl GlfwWindow {
    fn set_input_polling(&mut self, enabled: bool) {
        self.window.set_key_polling(enabled);
        self.window.set_char_polling(enabled);
        self.window.set_mouse_button_polling(enabled);
        self.window.set_cursor_pos_polling(enabled);
        self.window.set_cursor_enter_polling(enabled);
        self.window.set_scroll_polling(enabled);
    }
}

impl DisplayWindow for GlfwWindow {
    fn make_current(&mut self) {
        self.window.make_current();
    }

    fn attach_input(&mut self) {
        self.set_input_polling(true);
    }

    fn detach_input(&mut self) {
        self.set_input_polling(false);
        // Anything still queued belongs to a window that is going away
        for _ in glfw::flush_messages(&self.events) {}
    }

    fn proc_address(&mut self, name: &str) -> *const c_void {
        self.window.get_proc_address(name) as *const c_void
    }

    fn drain_events(&mut self) -> Vec<InputEvent> {
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| translate_event(event))
            .collect()
    }

    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn framebuffer_size(&self) -> WindowSize {
        let (width, height) = self.window.get_framebuffer_size();
        WindowSize {
            width: u32::try_from(width).unwrap_or(0),
            height: u32::try_from(height).unwrap_or(0),
        }
    }
}

fn translate_event(event: glfw::WindowEvent) -> Option<InputEvent> {
    let event = match event {
        glfw::WindowEvent::Key(key, scancode, action, mods) => InputEvent::Key {
            key: translate_key(key),
            scancode,
            action: translate_action(action),
            mods: translate_mods(mods),
        },
        glfw::WindowEvent::Char(ch) => InputEvent::Character(ch),
        glfw::WindowEvent::MouseButton(button, action, mods) => InputEvent::MouseButton {
            button: MouseButton::from_index(u8::try_from(button as i32).unwrap_or(u8::MAX)),
            action: translate_action(action),
            mods: translate_mods(mods),
        },
        glfw::WindowEvent::CursorPos(x, y) => InputEvent::CursorMoved { x, y },
        glfw::WindowEvent::CursorEnter(entered) => InputEvent::CursorEntered(entered),
        glfw::WindowEvent::Scroll(x, y) => InputEvent::Scroll { x, y },
        _ => return None,
    };
    Some(event)
}

const fn translate_action(action: glfw::Action) -> Action {
    match action {
        glfw::Action::Release => Action::Release,
        glfw::Action::Press => Action::Press,
        glfw::Action::Repeat => Action::Repeat,
    }
}

fn translate_mods(mods: glfw::Modifiers) -> Modifiers {
    Modifiers::from_bits_truncate(u32::try_from(mods.bits()).unwrap_or(0))
}

#[allow(clippy::too_many_lines)]
const fn translate_key(key: glfw::Key) -> Key {
    use glfw::Key as G;
    match key {
        G::A => Key::A,
        G::B => Key::B,
        G::C => Key::C,
        G::D => Key::D,
        G::E => Key::E,
        G::F => Key::F,
        G::G => Key::G,
        G::H => Key::H,
        G::I => Key::I,
        G::J => Key::J,
        G::K => Key::K,
        G::L => Key::L,
        G::M => Key::M,
        G::N => Key::N,
        G::O => Key::O,
        G::P => Key::P,
        G::Q => Key::Q,
        G::R => Key::R,
        G::S => Key::S,
        G::T => Key::T,
        G::U => Key::U,
        G::V => Key::V,
        G::W => Key::W,
        G::X => Key::X,
        G::Y => Key::Y,
        G::Z => Key::Z,
        G::Num0 => Key::Num0,
        G::Num1 => Key::Num1,
        G::Num2 => Key::Num2,
        G::Num3 => Key::Num3,
        G::Num4 => Key::Num4,
        G::Num5 => Key::Num5,
        G::Num6 => Key::Num6,
        G::Num7 => Key::Num7,
        G::Num8 => Key::Num8,
        G::Num9 => Key::Num9,
        G::F1 => Key::F1,
        G::F2 => Key::F2,
        G::F3 => Key::F3,
        G::F4 => Key::F4,
        G::F5 => Key::F5,
        G::F6 => Key::F6,
        G::F7 => Key::F7,
        G::F8 => Key::F8,
        G::F9 => Key::F9,
        G::F10 => Key::F10,
        G::F11 => Key::F11,
        G::F12 => Key::F12,
        G::Space => Key::Space,
        G::Enter => Key::Enter,
        G::Escape => Key::Escape,
        G::Tab => Key::Tab,
        G::Backspace => Key::Backspace,
        G::Delete => Key::Delete,
        G::Up => Key::Up,
        G::Down => Key::Down,
        G::Left => Key::Left,
        G::Right => Key::Right,
        G::LeftShift => Key::LeftShift,
        G::RightShift => Key::RightShift,
        G::LeftControl => Key::LeftControl,
        G::RightControl => Key::RightControl,
        G::LeftAlt => Key::LeftAlt,
        G::RightAlt => Key::RightAlt,
        other => Key::Other(other as i32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_shift_s_press() {
        let event = translate_event(glfw::WindowEvent::Key(
            glfw::Key::S,
            31,
            glfw::Action::Press,
            glfw::Modifiers::Shift,
        ));
        assert_eq!(
            event,
            Some(InputEvent::Key {
                key: Key::S,
                scancode: 31,
                action: Action::Press,
                mods: Modifiers::SHIFT,
            })
        );
    }

    #[test]
    fn translates_pointer_events() {
        assert_eq!(
            translate_event(glfw::WindowEvent::CursorPos(1.5, 2.5)),
            Some(InputEvent::CursorMoved { x: 1.5, y: 2.5 })
        );
        assert_eq!(
            translate_event(glfw::WindowEvent::Scroll(0.0, -1.0)),
            Some(InputEvent::Scroll { x: 0.0, y: -1.0 })
        );
        assert_eq!(
            translate_event(glfw::WindowEvent::MouseButton(
                glfw::MouseButton::Button2,
                glfw::Action::Release,
                glfw::Modifiers::empty(),
            )),
            Some(InputEvent::MouseButton {
                button: MouseButton::Right,
                action: Action::Release,
                mods: Modifiers::empty(),
            })
        );
    }

    #[test]
    fn unnamed_keys_keep_their_code() {
        assert_eq!(translate_key(glfw::Key::Insert), Key::Other(glfw::Key::Insert as i32));
    }

    #[test]
    fn non_input_events_are_ignored() {
        assert_eq!(translate_event(glfw::WindowEvent::Close), None);
        assert_eq!(translate_event(glfw::WindowEvent::Focus(true)), None);
    }
}
