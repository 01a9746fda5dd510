// src/platform/backends/mod.rs

//! Defines the `Backend` trait for native platform implementations (X11,
//! headless) and the platform-neutral `WindowEvent` they produce.
//!
//! A backend owns the native window resources and a native image view that
//! aliases the `PixelBuffer` storage, so presenting never copies pixels on
//! our side. Event translation (native key codes and modifier state into
//! `Key` and `Modifiers`) happens inside the backend; everything that mutates
//! window state lives in `WindowContext`, once, for every platform.

use crate::keys::{Key, Modifiers};
use crate::pixels::PixelBuffer;
use anyhow::Result;
use std::fmt;

pub mod headless;
#[cfg(target_os = "linux")]
pub mod x11;

/// A translated native event, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    /// A keyboard key went down. `text` carries composed characters, if any.
    KeyDown {
        key: Key,
        modifiers: Modifiers,
        text: Option<String>,
    },
    KeyUp {
        key: Key,
        modifiers: Modifiers,
    },
    /// A pointer button went down. `key` is in the button range.
    ButtonDown {
        key: Key,
        modifiers: Modifiers,
    },
    ButtonUp {
        key: Key,
        modifiers: Modifiers,
    },
    MouseMove {
        x: i32,
        y: i32,
    },
    MouseEnter {
        x: i32,
        y: i32,
    },
    MouseLeave {
        x: i32,
        y: i32,
    },
    /// The window's drawable area changed (or was re-announced) at this size.
    Resize {
        width: u32,
        height: u32,
    },
    /// The user or window manager asked the window to close.
    CloseRequested,
}

/// Native resource acquisition failures. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeError {
    OpenDisplay,
    CreateWindow,
    SetProperties,
    CreateGraphicsContext,
    CreateImage { width: u32, height: u32 },
    InvalidTitle(String),
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeError::OpenDisplay => write!(f, "unable to open display (is DISPLAY set?)"),
            NativeError::CreateWindow => write!(f, "unable to create native window"),
            NativeError::SetProperties => write!(f, "unable to set window properties"),
            NativeError::CreateGraphicsContext => write!(f, "unable to create graphics context"),
            NativeError::CreateImage { width, height } => {
                write!(f, "unable to create {}x{} native image view", width, height)
            }
            NativeError::InvalidTitle(title) => {
                write!(f, "window title contains an interior NUL: {:?}", title)
            }
        }
    }
}

impl std::error::Error for NativeError {}

/// Native window driver.
///
/// A `Backend` is responsible for:
/// 1.  Opening the native window and binding a native image view to the
///     `PixelBuffer` storage (zero-copy).
/// 2.  Blitting the current buffer contents on `present`.
/// 3.  Handing out queued native events, translated, one at a time, without
///     ever blocking for events that have not arrived yet.
/// 4.  Re-pointing its image view whenever the buffer storage moves.
pub trait Backend {
    /// Opens the native window, sized to `pixels`, and binds its image view
    /// to `pixels`' storage.
    ///
    /// # Returns
    /// * `Result<Self>`: the backend, or a `NativeError` (wrapped in
    ///   `anyhow::Error`) naming the resource that could not be acquired.
    fn create(pixels: &mut PixelBuffer, title: &str) -> Result<Self>
    where
        Self: Sized;

    /// Puts the logical area of `pixels` on screen.
    fn present(&mut self, pixels: &PixelBuffer) -> Result<()>;

    /// Pops the next queued event, translated.
    ///
    /// Returns `None` as soon as the native queue is empty. Native events
    /// with no `WindowEvent` counterpart are consumed and skipped.
    fn next_event(&mut self) -> Option<WindowEvent>;

    /// Rebinds the native image view onto `pixels`' current storage and size.
    /// Must be called after every resize of `pixels`, before the next present.
    fn rebind(&mut self, pixels: &mut PixelBuffer) -> Result<()>;

    fn set_title(&mut self, title: &str) -> Result<()>;

    /// Releases every native resource. Idempotent.
    fn destroy(&mut self);
}
