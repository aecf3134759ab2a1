//! Input vocabulary shared by every display backend
//!
//! Backends translate their native events into [`InputEvent`]s; handlers only
//! ever see these types. Modifier bits and mouse button numbers follow the
//! GLFW numbering so the translation stays a cast.

use bitflags::bitflags;

/// Keyboard keys
///
/// Keys the harness has no name for arrive as [`Key::Other`] with the
/// backend's key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
#[rustfmt::skip]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    /// Any key without a dedicated variant
    Other(i32),
}

/// What happened to a key or button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Released after being held
    Release,
    /// Pressed down
    Press,
    /// Held long enough to auto-repeat
    Repeat,
}

bitflags! {
    /// Modifier keys held while an event happened
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        /// Either shift key
        const SHIFT = 0x0001;
        /// Either control key
        const CONTROL = 0x0002;
        /// Either alt key
        const ALT = 0x0004;
        /// Either super (logo) key
        const SUPER = 0x0008;
        /// Caps lock is on
        const CAPS_LOCK = 0x0010;
        /// Num lock is on
        const NUM_LOCK = 0x0020;
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// Extra buttons, numbered from zero like the backend does
    Other(u8),
}

impl MouseButton {
    /// Map a zero-based button index to a button
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Right,
            2 => Self::Middle,
            other => Self::Other(other),
        }
    }
}

/// One input event, as delivered during event polling
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key state change
    Key {
        /// Logical key
        key: Key,
        /// Platform scancode
        scancode: i32,
        /// Press, release or repeat
        action: Action,
        /// Modifiers held at the time
        mods: Modifiers,
    },
    /// Text input, already composed into a character
    Character(char),
    /// Mouse button state change
    MouseButton {
        /// Button that changed
        button: MouseButton,
        /// Press or release
        action: Action,
        /// Modifiers held at the time
        mods: Modifiers,
    },
    /// Cursor moved, in window coordinates
    CursorMoved {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },
    /// Cursor entered (`true`) or left (`false`) the window
    CursorEntered(bool),
    /// Scroll wheel or touchpad scroll
    Scroll {
        /// Horizontal offset
        x: f64,
        /// Vertical offset
        y: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_button_indices_follow_glfw_numbering() {
        assert_eq!(MouseButton::from_index(0), MouseButton::Left);
        assert_eq!(MouseButton::from_index(1), MouseButton::Right);
        assert_eq!(MouseButton::from_index(2), MouseButton::Middle);
        assert_eq!(MouseButton::from_index(5), MouseButton::Other(5));
    }

    #[test]
    fn modifier_bits_match_glfw() {
        let mods = Modifiers::from_bits_truncate(0x0001 | 0x0004 | 0x0100);
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(mods.contains(Modifiers::ALT));
        assert!(!mods.contains(Modifiers::CONTROL));
    }
}
