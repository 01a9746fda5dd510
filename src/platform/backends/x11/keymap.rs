// src/platform/backends/x11/keymap.rs
#![allow(non_upper_case_globals)] // Keysym constants keep their X11 names

//! X11 key translation table.
//!
//! Pure functions from X11 codes to the crate's `Key` / `Modifiers`. Key
//! codes are looked up at shift level 0, so letters arrive lowercase and the
//! keypad arrives in its navigation (NumLock off) form; both forms are mapped.

use crate::keys::{Key, Modifiers};
use x11::{keysym::*, xlib};

/// Translates an X11 keysym or pointer button number into a `Key`.
///
/// Button numbers 1..=5 share the code space with keysyms; no keysym uses
/// those values. Anything unrecognised is `Key::Invalid`.
#[rustfmt::skip]
pub fn key_of(code: u32) -> Key {
    match code {
        xlib::Button1 => Key::Button1,
        xlib::Button2 => Key::Button2,
        xlib::Button3 => Key::Button3,
        xlib::Button4 => Key::Button4,
        xlib::Button5 => Key::Button5,

        XK_Escape => Key::Escape,
        XK_Tab | XK_ISO_Left_Tab => Key::Tab,
        XK_Shift_L => Key::LeftShift,
        XK_Shift_R => Key::RightShift,
        XK_Control_L => Key::LeftControl,
        XK_Control_R => Key::RightControl,
        XK_Meta_L | XK_Alt_L => Key::LeftAlt,
        XK_Mode_switch | XK_ISO_Level3_Shift | XK_Meta_R | XK_Alt_R => Key::RightAlt,
        XK_Super_L => Key::LeftSuper,
        XK_Super_R => Key::RightSuper,
        XK_Menu => Key::Menu,
        XK_Num_Lock => Key::NumLock,
        XK_Caps_Lock => Key::CapsLock,
        XK_Print => Key::PrintScreen,
        XK_Scroll_Lock => Key::ScrollLock,
        XK_Pause => Key::Pause,
        XK_Delete => Key::Delete,
        XK_BackSpace => Key::Backspace,
        XK_Return => Key::Enter,
        XK_Home => Key::Home,
        XK_End => Key::End,
        XK_Page_Up => Key::PageUp,
        XK_Page_Down => Key::PageDown,
        XK_Insert => Key::Insert,
        XK_Left => Key::Left,
        XK_Right => Key::Right,
        XK_Down => Key::Down,
        XK_Up => Key::Up,

        XK_F1 => Key::F1,
        XK_F2 => Key::F2,
        XK_F3 => Key::F3,
        XK_F4 => Key::F4,
        XK_F5 => Key::F5,
        XK_F6 => Key::F6,
        XK_F7 => Key::F7,
        XK_F8 => Key::F8,
        XK_F9 => Key::F9,
        XK_F10 => Key::F10,
        XK_F11 => Key::F11,
        XK_F12 => Key::F12,
        XK_F13 => Key::F13,
        XK_F14 => Key::F14,
        XK_F15 => Key::F15,
        XK_F16 => Key::F16,
        XK_F17 => Key::F17,
        XK_F18 => Key::F18,
        XK_F19 => Key::F19,
        XK_F20 => Key::F20,
        XK_F21 => Key::F21,
        XK_F22 => Key::F22,
        XK_F23 => Key::F23,
        XK_F24 => Key::F24,
        XK_F25 => Key::F25,

        XK_KP_Divide => Key::KeypadDivide,
        XK_KP_Multiply => Key::KeypadMultiply,
        XK_KP_Subtract => Key::KeypadSubtract,
        XK_KP_Add => Key::KeypadAdd,
        XK_KP_Insert | XK_KP_0 => Key::Keypad0,
        XK_KP_End | XK_KP_1 => Key::Keypad1,
        XK_KP_Down | XK_KP_2 => Key::Keypad2,
        XK_KP_Page_Down | XK_KP_3 => Key::Keypad3,
        XK_KP_Left | XK_KP_4 => Key::Keypad4,
        XK_KP_Begin | XK_KP_5 => Key::Keypad5,
        XK_KP_Right | XK_KP_6 => Key::Keypad6,
        XK_KP_Home | XK_KP_7 => Key::Keypad7,
        XK_KP_Up | XK_KP_8 => Key::Keypad8,
        XK_KP_Page_Up | XK_KP_9 => Key::Keypad9,
        XK_KP_Delete | XK_KP_Decimal => Key::KeypadDecimal,
        XK_KP_Equal => Key::KeypadEqual,
        XK_KP_Enter => Key::KeypadEnter,

        XK_a | XK_A => Key::A,
        XK_b | XK_B => Key::B,
        XK_c | XK_C => Key::C,
        XK_d | XK_D => Key::D,
        XK_e | XK_E => Key::E,
        XK_f | XK_F => Key::F,
        XK_g | XK_G => Key::G,
        XK_h | XK_H => Key::H,
        XK_i | XK_I => Key::I,
        XK_j | XK_J => Key::J,
        XK_k | XK_K => Key::K,
        XK_l | XK_L => Key::L,
        XK_m | XK_M => Key::M,
        XK_n | XK_N => Key::N,
        XK_o | XK_O => Key::O,
        XK_p | XK_P => Key::P,
        XK_q | XK_Q => Key::Q,
        XK_r | XK_R => Key::R,
        XK_s | XK_S => Key::S,
        XK_t | XK_T => Key::T,
        XK_u | XK_U => Key::U,
        XK_v | XK_V => Key::V,
        XK_w | XK_W => Key::W,
        XK_x | XK_X => Key::X,
        XK_y | XK_Y => Key::Y,
        XK_z | XK_Z => Key::Z,

        XK_1 => Key::Num1,
        XK_2 => Key::Num2,
        XK_3 => Key::Num3,
        XK_4 => Key::Num4,
        XK_5 => Key::Num5,
        XK_6 => Key::Num6,
        XK_7 => Key::Num7,
        XK_8 => Key::Num8,
        XK_9 => Key::Num9,
        XK_0 => Key::Num0,

        XK_space => Key::Space,
        XK_minus => Key::Minus,
        XK_equal => Key::Equal,
        XK_bracketleft => Key::LeftBracket,
        XK_bracketright => Key::RightBracket,
        XK_backslash => Key::Backslash,
        XK_semicolon => Key::Semicolon,
        XK_apostrophe => Key::Apostrophe,
        XK_grave => Key::GraveAccent,
        XK_comma => Key::Comma,
        XK_period => Key::Period,
        XK_slash => Key::Slash,
        XK_less => Key::World1,

        _ => Key::Invalid,
    }
}

/// Translates an X11 event `state` field into `Modifiers`.
pub fn mods_of(state: u32) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    if state & xlib::ShiftMask != 0 {
        modifiers.insert(Modifiers::SHIFT);
    }
    if state & xlib::ControlMask != 0 {
        modifiers.insert(Modifiers::CONTROL);
    }
    if state & xlib::Mod1Mask != 0 {
        modifiers.insert(Modifiers::ALT);
    }
    if state & xlib::Mod4Mask != 0 {
        modifiers.insert(Modifiers::SUPER);
    }
    if state & xlib::LockMask != 0 {
        modifiers.insert(Modifiers::CAPS_LOCK);
    }
    if state & xlib::Mod2Mask != 0 {
        modifiers.insert(Modifiers::NUM_LOCK);
    }
    modifiers
}

/// Decodes the bytes `XLookupString` writes. Without an input method these
/// are Latin-1, where every byte is the code point of the same value.
pub fn lookup_text(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    Some(bytes.iter().map(|&b| char::from(b)).collect())
}
