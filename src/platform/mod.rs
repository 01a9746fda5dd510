// src/platform/mod.rs
//
// Native platform layer: the `Backend` contract and its implementations.

pub mod backends;

pub use backends::{Backend, NativeError, WindowEvent};

#[cfg(target_os = "linux")]
pub use backends::x11::X11Backend;
pub use backends::headless::HeadlessBackend;
