// src/lib.rs

//! `softwin`: a native window with a software framebuffer and a
//! callback-driven input model.
//!
//! Write pixels into [`WindowContext::pixels_mut`], call
//! [`WindowContext::update`] once per frame, and react to input through the
//! hooks set with `on_key_press`, `on_mouse_move` and friends.

pub mod config;
pub mod keys;
pub mod pixels;
pub mod platform;
pub mod stl;
pub mod window;

pub use config::WindowConfig;
pub use keys::{Key, Modifiers, KEY_COUNT};
pub use pixels::{rgb, Pixel, PixelBuffer, PixelsMut};
pub use platform::{Backend, HeadlessBackend, NativeError, WindowEvent};
#[cfg(target_os = "linux")]
pub use platform::X11Backend;
#[cfg(target_os = "linux")]
pub use window::Window;
pub use window::{Callbacks, WindowContext, WindowState};
