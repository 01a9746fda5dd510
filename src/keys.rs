// src/keys.rs

//! Platform-independent key and modifier vocabulary.
//!
//! Every backend translates its native key and pointer-button codes into a
//! [`Key`]. Pointer buttons live in their own range at the start of the
//! enumeration so they can share the key-state table with keyboard keys.
//! Anything a backend does not recognise becomes [`Key::Invalid`], which is
//! the last slot of the table, so a translated key is always a valid index.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier keys held at the time of an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
        const CAPS_LOCK = 1 << 4;
        const NUM_LOCK = 1 << 5;
    }
}

/// Abstract key identifier.
///
/// The discriminant is the index into the key-state table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[repr(u16)]
pub enum Key {
    // Pointer buttons
    Button1 = 0,
    Button2,
    Button3,
    Button4,
    Button5,

    Escape,
    Tab,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,
    Menu,
    NumLock,
    CapsLock,
    PrintScreen,
    ScrollLock,
    Pause,
    Delete,
    Backspace,
    Enter,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Left,
    Right,
    Down,
    Up,

    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    F25,

    KeypadDivide,
    KeypadMultiply,
    KeypadSubtract,
    KeypadAdd,
    Keypad0,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    Keypad6,
    Keypad7,
    Keypad8,
    Keypad9,
    KeypadDecimal,
    KeypadEqual,
    KeypadEnter,

    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Num0,

    Space,
    Minus,
    Equal,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Apostrophe,
    GraveAccent,
    Comma,
    Period,
    Slash,
    /// Non-US `<>` key.
    World1,

    /// Unrecognised native code. Must stay the last variant.
    #[default]
    Invalid,
}

/// Number of slots in the key-state table, including the `Invalid` slot.
pub const KEY_COUNT: usize = Key::Invalid as usize + 1;

impl Key {
    /// Index of this key in the key-state table. Always `< KEY_COUNT`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// True for the reserved pointer-button range.
    pub fn is_button(self) -> bool {
        self <= Key::Button5
    }

    /// Returns true if the key is one of the modifier keys.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Key::LeftShift
                | Key::RightShift
                | Key::LeftControl
                | Key::RightControl
                | Key::LeftAlt
                | Key::RightAlt
                | Key::LeftSuper
                | Key::RightSuper
                | Key::CapsLock
                | Key::NumLock
        )
    }
}
