// src/window.rs

//! `WindowContext`: the aggregate that owns the framebuffer, the native
//! backend, the input state and the user's callback hooks.
//!
//! ## Lifecycle
//! 1. `create` allocates the `PixelBuffer`, then opens the backend bound to it.
//! 2. `update`, once per frame: present, drain native events, dispatch.
//! 3. `destroy` releases the backend and the buffer.
//!
//! A window is OPEN until a close request (or `close()`, or the default
//! Escape binding). CLOSED is terminal: `update` then returns `true` without
//! presenting, polling, or invoking any hook.

use crate::config::WindowConfig;
use crate::keys::{Key, Modifiers, KEY_COUNT};
use crate::pixels::{PixelBuffer, PixelsMut};
use crate::platform::backends::{Backend, WindowEvent};
use anyhow::{Context, Result};
use log::{debug, error, info, trace, warn};

#[cfg(target_os = "linux")]
use crate::platform::backends::x11::X11Backend;

/// A window on the X11 display.
#[cfg(target_os = "linux")]
pub type Window = WindowContext<X11Backend>;

/// Input state visible to (and mutable by) the callback hooks.
#[derive(Debug, Clone)]
pub struct WindowState {
    closed: bool,
    mouse: (i32, i32),
    prev_mouse: (i32, i32),
    keys: [bool; KEY_COUNT],
    modifiers: Modifiers,
    /// Set until the first pointer move has seeded `prev_mouse`.
    first_mouse: bool,
}

impl WindowState {
    fn new() -> Self {
        Self {
            closed: false,
            mouse: (0, 0),
            prev_mouse: (0, 0),
            keys: [false; KEY_COUNT],
            modifiers: Modifiers::empty(),
            first_mouse: true,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Moves the window to CLOSED. Cannot be undone.
    pub fn close(&mut self) {
        if !self.closed {
            info!("Window closed");
        }
        self.closed = true;
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys[key.index()]
    }

    pub fn mouse(&self) -> (i32, i32) {
        self.mouse
    }

    pub fn prev_mouse(&self) -> (i32, i32) {
        self.prev_mouse
    }

    /// Modifiers held at the most recent key or button event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

/// `(state, x, y, prev_x, prev_y)`
pub type MouseHook = Box<dyn FnMut(&mut WindowState, i32, i32, i32, i32)>;
pub type KeyHook = Box<dyn FnMut(&mut WindowState, Key, Modifiers)>;
pub type TextHook = Box<dyn FnMut(&mut WindowState, &str)>;
/// `(state, width, height)`
pub type ResizeHook = Box<dyn FnMut(&mut WindowState, u32, u32)>;

/// The set of user hooks. Each one is independently replaceable.
pub struct Callbacks {
    pub on_mouse_move: MouseHook,
    pub on_mouse_enter: MouseHook,
    pub on_mouse_leave: MouseHook,
    pub on_key_press: KeyHook,
    pub on_key_release: KeyHook,
    pub on_text_input: TextHook,
    pub on_window_resize: ResizeHook,
}

impl Callbacks {
    /// No-op hooks, except `on_key_press` which closes the window on Escape
    /// when `escape_closes` is set.
    pub fn new(escape_closes: bool) -> Self {
        let on_key_press: KeyHook = if escape_closes {
            Box::new(|state, key, _| {
                if key == Key::Escape {
                    state.close();
                }
            })
        } else {
            Box::new(|_, _, _| {})
        };
        Self {
            on_mouse_move: Box::new(|_, _, _, _, _| {}),
            on_mouse_enter: Box::new(|_, _, _, _, _| {}),
            on_mouse_leave: Box::new(|_, _, _, _, _| {}),
            on_key_press,
            on_key_release: Box::new(|_, _, _| {}),
            on_text_input: Box::new(|_, _| {}),
            on_window_resize: Box::new(|_, _, _| {}),
        }
    }
}

impl Default for Callbacks {
    fn default() -> Self {
        Self::new(true)
    }
}

pub struct WindowContext<B: Backend> {
    pixels: PixelBuffer,
    backend: B,
    state: WindowState,
    callbacks: Callbacks,
    reseed_mouse_on_crossing: bool,
}

impl<B: Backend> WindowContext<B> {
    /// Opens a window with default hooks.
    ///
    /// # Errors
    /// Any native resource that cannot be acquired. Not retryable.
    pub fn create(config: &WindowConfig) -> Result<Self> {
        Self::with_callbacks(config, Callbacks::new(config.escape_closes))
    }

    /// Opens a window with the given hooks.
    pub fn with_callbacks(config: &WindowConfig, callbacks: Callbacks) -> Result<Self> {
        info!(
            "WindowContext::create() - {}x{} '{}'",
            config.width, config.height, config.title
        );
        let mut pixels = PixelBuffer::new(config.width, config.height);
        // The backend binds to the buffer's heap storage, which stays put
        // when `pixels` itself is moved into the context below.
        let backend = B::create(&mut pixels, &config.title)
            .context("Unable to create native window")?;
        Ok(Self {
            pixels,
            backend,
            state: WindowState::new(),
            callbacks,
            reseed_mouse_on_crossing: config.reseed_mouse_on_crossing,
        })
    }

    /// Runs one frame of the window: present, then drain and dispatch every
    /// pending event. Returns `true` once the window is closed.
    pub fn update(&mut self) -> bool {
        if self.state.closed {
            return true;
        }
        self.poll_and_present()
    }

    fn poll_and_present(&mut self) -> bool {
        if let Err(err) = self.backend.present(&self.pixels) {
            warn!("Present failed: {:#}", err);
        }
        while let Some(event) = self.backend.next_event() {
            self.dispatch(event);
            if self.state.closed {
                // Anything still queued stays unprocessed.
                break;
            }
        }
        self.state.closed
    }

    fn dispatch(&mut self, event: WindowEvent) {
        trace!("Dispatching {:?}", event);
        let state = &mut self.state;
        let hooks = &mut self.callbacks;
        match event {
            WindowEvent::KeyDown {
                key,
                modifiers,
                text,
            } => {
                state.modifiers = modifiers;
                state.keys[key.index()] = true;
                (hooks.on_key_press)(state, key, modifiers);
                if let Some(text) = text.as_deref().filter(|t| !t.is_empty()) {
                    (hooks.on_text_input)(state, text);
                }
            }
            WindowEvent::ButtonDown { key, modifiers } => {
                state.modifiers = modifiers;
                state.keys[key.index()] = true;
                (hooks.on_key_press)(state, key, modifiers);
            }
            WindowEvent::KeyUp { key, modifiers } | WindowEvent::ButtonUp { key, modifiers } => {
                state.modifiers = modifiers;
                state.keys[key.index()] = false;
                (hooks.on_key_release)(state, key, modifiers);
            }
            WindowEvent::MouseMove { x, y } => {
                if state.first_mouse {
                    state.prev_mouse = (x, y);
                    state.first_mouse = false;
                }
                state.mouse = (x, y);
                let (px, py) = state.prev_mouse;
                (hooks.on_mouse_move)(state, x, y, px, py);
                state.prev_mouse = (x, y);
            }
            WindowEvent::MouseEnter { x, y } => {
                state.mouse = (x, y);
                state.prev_mouse = (x, y);
                if self.reseed_mouse_on_crossing {
                    state.first_mouse = true;
                }
                (hooks.on_mouse_enter)(state, x, y, x, y);
            }
            WindowEvent::MouseLeave { x, y } => {
                state.mouse = (x, y);
                state.prev_mouse = (x, y);
                if self.reseed_mouse_on_crossing {
                    state.first_mouse = true;
                }
                (hooks.on_mouse_leave)(state, x, y, x, y);
            }
            WindowEvent::Resize { width, height } => {
                if (width, height) == (self.pixels.width(), self.pixels.height()) {
                    return;
                }
                debug!(
                    "Resize {}x{} -> {}x{}",
                    self.pixels.width(),
                    self.pixels.height(),
                    width,
                    height
                );
                self.pixels.resize(width, height);
                if let Err(err) = self.backend.rebind(&mut self.pixels) {
                    error!("Failed to rebind image view after resize: {:#}", err);
                }
                (hooks.on_window_resize)(state, width, height);
            }
            WindowEvent::CloseRequested => state.close(),
        }
    }

    /// Releases the native window and the framebuffer.
    pub fn destroy(mut self) {
        info!("WindowContext::destroy()");
        self.state.close();
        self.backend.destroy();
        self.pixels.release();
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed
    }

    pub fn close(&mut self) {
        self.state.close();
    }

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.state.key_down(key)
    }

    pub fn mouse(&self) -> (i32, i32) {
        self.state.mouse
    }

    pub fn prev_mouse(&self) -> (i32, i32) {
        self.state.prev_mouse
    }

    pub fn modifiers(&self) -> Modifiers {
        self.state.modifiers
    }

    /// Current drawable size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.pixels.width(), self.pixels.height())
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Pixel-only access to the framebuffer. The logical size follows the
    /// native window and changes only through resize events.
    pub fn pixels_mut(&mut self) -> PixelsMut<'_> {
        PixelsMut::new(&mut self.pixels)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.backend.set_title(title)
    }

    pub fn on_mouse_move(&mut self, hook: impl FnMut(&mut WindowState, i32, i32, i32, i32) + 'static) {
        self.callbacks.on_mouse_move = Box::new(hook);
    }

    pub fn on_mouse_enter(&mut self, hook: impl FnMut(&mut WindowState, i32, i32, i32, i32) + 'static) {
        self.callbacks.on_mouse_enter = Box::new(hook);
    }

    pub fn on_mouse_leave(&mut self, hook: impl FnMut(&mut WindowState, i32, i32, i32, i32) + 'static) {
        self.callbacks.on_mouse_leave = Box::new(hook);
    }

    pub fn on_key_press(&mut self, hook: impl FnMut(&mut WindowState, Key, Modifiers) + 'static) {
        self.callbacks.on_key_press = Box::new(hook);
    }

    pub fn on_key_release(&mut self, hook: impl FnMut(&mut WindowState, Key, Modifiers) + 'static) {
        self.callbacks.on_key_release = Box::new(hook);
    }

    pub fn on_text_input(&mut self, hook: impl FnMut(&mut WindowState, &str) + 'static) {
        self.callbacks.on_text_input = Box::new(hook);
    }

    pub fn on_window_resize(&mut self, hook: impl FnMut(&mut WindowState, u32, u32) + 'static) {
        self.callbacks.on_window_resize = Box::new(hook);
    }
}

#[cfg(test)]
mod tests;
