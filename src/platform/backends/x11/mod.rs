// src/platform/backends/x11/mod.rs
#![allow(non_snake_case)] // Allow non-snake case for X11 types

//! X11 backend.
//!
//! `X11Backend` opens a plain Xlib window and wraps the `PixelBuffer` storage
//! in an `XImage` without copying it, so `present` is a single `XPutImage`.
//! The `XImage` never owns its data: before the image is destroyed the data
//! pointer is detached so Xlib does not free memory that belongs to the
//! `PixelBuffer`.
//!
//! Submodules:
//! - `keymap`: translation of keysyms, button numbers and modifier state.

pub mod keymap;

use crate::pixels::PixelBuffer;
use crate::platform::backends::{Backend, NativeError, WindowEvent};
use anyhow::Result;
use libc::{c_char, c_int, c_long};
use log::{debug, info, trace, warn};
use std::ffi::CString;
use std::mem;
use std::ptr;
use x11::xlib;

use keymap::{key_of, lookup_text, mods_of};

/// Buffer size for text obtained from `XLookupString`.
const KEY_TEXT_BUFFER_SIZE: usize = 64;
/// Depth of the image view. Pixels are 32-bit `0x00RRGGBB`.
const IMAGE_DEPTH: u32 = 24;
const IMAGE_BITMAP_PAD: c_int = 32;

const EVENT_MASK: c_long = xlib::ExposureMask
    | xlib::KeyPressMask
    | xlib::KeyReleaseMask
    | xlib::ButtonPressMask
    | xlib::ButtonReleaseMask
    | xlib::PointerMotionMask
    | xlib::EnterWindowMask
    | xlib::LeaveWindowMask
    | xlib::StructureNotifyMask;

#[derive(Debug)]
pub struct X11Backend {
    display: *mut xlib::Display,
    window: xlib::Window,
    gc: xlib::GC,
    visual: *mut xlib::Visual,
    /// View over the `PixelBuffer` storage. Null while the buffer is empty.
    image: *mut xlib::XImage,
    wm_delete_window: xlib::Atom,
}

impl X11Backend {
    /// Acquires everything after the display connection. On error the
    /// caller releases whatever was acquired so far via `destroy`.
    fn open(&mut self, pixels: &mut PixelBuffer, title: &CString) -> Result<()> {
        let display = self.display;
        // SAFETY: `display` is a live connection returned by `XOpenDisplay`.
        // Every handle passed back to Xlib below was created on it.
        unsafe {
            let screen = xlib::XDefaultScreen(display);
            let root = xlib::XRootWindow(display, screen);
            self.visual = xlib::XDefaultVisual(display, screen);

            self.window = xlib::XCreateSimpleWindow(
                display,
                root,
                0,
                0,
                pixels.width().max(1),
                pixels.height().max(1),
                0,
                xlib::XWhitePixel(display, screen),
                xlib::XBlackPixel(display, screen),
            );
            if self.window == 0 {
                return Err(NativeError::CreateWindow.into());
            }
            debug!("X11Backend: created window {}", self.window);

            let status = xlib::XSetStandardProperties(
                display,
                self.window,
                title.as_ptr(),
                title.as_ptr(),
                0,
                ptr::null_mut(),
                0,
                ptr::null_mut(),
            );
            if status == 0 {
                return Err(NativeError::SetProperties.into());
            }

            self.gc = xlib::XCreateGC(display, self.window, 0, ptr::null_mut());
            if self.gc.is_null() {
                return Err(NativeError::CreateGraphicsContext.into());
            }

            xlib::XSelectInput(display, self.window, EVENT_MASK);

            self.wm_delete_window = xlib::XInternAtom(
                display,
                b"WM_DELETE_WINDOW\0".as_ptr() as *const c_char,
                xlib::False,
            );
            let mut protocols = [self.wm_delete_window];
            xlib::XSetWMProtocols(display, self.window, protocols.as_mut_ptr(), 1);

            xlib::XMapRaised(display, self.window);
            xlib::XSync(display, xlib::False);
        }

        self.bind_image(pixels)
    }

    /// Wraps `pixels`' storage in a fresh `XImage`.
    fn bind_image(&mut self, pixels: &mut PixelBuffer) -> Result<()> {
        let (width, height) = (pixels.width(), pixels.height());
        if width == 0 || height == 0 {
            debug!("X11Backend: empty buffer, no image view bound");
            return Ok(());
        }
        // SAFETY: the data pointer covers at least `width * height` 32-bit
        // pixels (PixelBuffer capacity never falls below its logical area),
        // which is exactly what a 32-bpp ZPixmap of this size addresses.
        let image = unsafe {
            xlib::XCreateImage(
                self.display,
                self.visual,
                IMAGE_DEPTH,
                xlib::ZPixmap,
                0,
                pixels.as_mut_ptr() as *mut c_char,
                width,
                height,
                IMAGE_BITMAP_PAD,
                0,
            )
        };
        if image.is_null() {
            return Err(NativeError::CreateImage { width, height }.into());
        }
        self.image = image;
        Ok(())
    }

    /// Destroys the `XImage` without letting Xlib free the pixel storage.
    fn release_image(&mut self) {
        if self.image.is_null() {
            return;
        }
        // SAFETY: `image` came from `XCreateImage` and is destroyed exactly
        // once; detaching `data` first keeps Xlib away from our storage.
        unsafe {
            (*self.image).data = ptr::null_mut();
            xlib::XDestroyImage(self.image);
        }
        self.image = ptr::null_mut();
    }

    /// Translates one native event, or `None` if it has no counterpart.
    fn translate(&self, xevent: &mut xlib::XEvent) -> Option<WindowEvent> {
        // SAFETY: each union field is read only after `type_` identified it.
        unsafe {
            match xevent.type_ {
                xlib::KeyPress => {
                    let key_event = &mut xevent.key;
                    let modifiers = mods_of(key_event.state);
                    let keysym =
                        xlib::XkbKeycodeToKeysym(self.display, key_event.keycode as u8, 0, 0);
                    let key = key_of(keysym as u32);

                    let mut text_buffer = [0u8; KEY_TEXT_BUFFER_SIZE];
                    let count = xlib::XLookupString(
                        key_event,
                        text_buffer.as_mut_ptr() as *mut c_char,
                        text_buffer.len() as c_int,
                        ptr::null_mut(),
                        ptr::null_mut(),
                    );
                    let text = lookup_text(&text_buffer[..count.max(0) as usize]);

                    trace!(
                        "XEvent: KeyPress (keysym: {:X}, key: {:?}, modifiers: {:?}, text: {:?})",
                        keysym, key, modifiers, text
                    );
                    Some(WindowEvent::KeyDown { key, modifiers, text })
                }
                xlib::KeyRelease => {
                    let key_event = xevent.key;
                    let keysym =
                        xlib::XkbKeycodeToKeysym(self.display, key_event.keycode as u8, 0, 0);
                    let key = key_of(keysym as u32);
                    trace!("XEvent: KeyRelease (keysym: {:X}, key: {:?})", keysym, key);
                    Some(WindowEvent::KeyUp {
                        key,
                        modifiers: mods_of(key_event.state),
                    })
                }
                xlib::ButtonPress => {
                    let button_event = xevent.button;
                    let key = key_of(button_event.button);
                    trace!("XEvent: ButtonPress (button: {}, key: {:?})", button_event.button, key);
                    Some(WindowEvent::ButtonDown {
                        key,
                        modifiers: mods_of(button_event.state),
                    })
                }
                xlib::ButtonRelease => {
                    let button_event = xevent.button;
                    let key = key_of(button_event.button);
                    trace!("XEvent: ButtonRelease (button: {}, key: {:?})", button_event.button, key);
                    Some(WindowEvent::ButtonUp {
                        key,
                        modifiers: mods_of(button_event.state),
                    })
                }
                xlib::MotionNotify => {
                    let motion_event = xevent.motion;
                    Some(WindowEvent::MouseMove {
                        x: motion_event.x,
                        y: motion_event.y,
                    })
                }
                xlib::EnterNotify => {
                    let crossing = xevent.crossing;
                    Some(WindowEvent::MouseEnter {
                        x: crossing.x,
                        y: crossing.y,
                    })
                }
                xlib::LeaveNotify => {
                    let crossing = xevent.crossing;
                    Some(WindowEvent::MouseLeave {
                        x: crossing.x,
                        y: crossing.y,
                    })
                }
                xlib::ConfigureNotify => {
                    let configure_event = xevent.configure;
                    if configure_event.window != self.window {
                        return None;
                    }
                    Some(WindowEvent::Resize {
                        width: configure_event.width.max(0) as u32,
                        height: configure_event.height.max(0) as u32,
                    })
                }
                xlib::ClientMessage => {
                    let client_message = xevent.client_message;
                    if client_message.data.get_long(0) as xlib::Atom == self.wm_delete_window {
                        info!("XEvent: WM_DELETE_WINDOW received for window {}", self.window);
                        Some(WindowEvent::CloseRequested)
                    } else {
                        trace!(
                            "XEvent: ignored ClientMessage (type: {})",
                            client_message.message_type
                        );
                        None
                    }
                }
                // Every frame is redrawn in full, so Expose needs no handling.
                other => {
                    trace!("XEvent: ignored event type {}", other);
                    None
                }
            }
        }
    }
}

impl Backend for X11Backend {
    fn create(pixels: &mut PixelBuffer, title: &str) -> Result<Self> {
        info!(
            "X11Backend::create() - {}x{} '{}'",
            pixels.width(),
            pixels.height(),
            title
        );
        let c_title =
            CString::new(title).map_err(|_| NativeError::InvalidTitle(title.to_string()))?;

        // Passing NULL means the DISPLAY environment variable is used.
        let display = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if display.is_null() {
            return Err(NativeError::OpenDisplay.into());
        }

        let mut backend = Self {
            display,
            window: 0,
            gc: ptr::null_mut(),
            visual: ptr::null_mut(),
            image: ptr::null_mut(),
            wm_delete_window: 0,
        };
        if let Err(err) = backend.open(pixels, &c_title) {
            warn!("X11Backend: creation failed: {}", err);
            backend.destroy();
            return Err(err);
        }
        info!("X11Backend: window {} ready", backend.window);
        Ok(backend)
    }

    fn present(&mut self, pixels: &PixelBuffer) -> Result<()> {
        if self.image.is_null() {
            trace!("X11Backend: nothing bound, skipping present");
            return Ok(());
        }
        let bound = unsafe { (*self.image).data } as *const u32;
        debug_assert_eq!(bound, pixels.as_ptr(), "image view not rebound after reallocation");
        // SAFETY: `image` views the live PixelBuffer storage (rebind rule) and
        // the blit is limited to its logical size.
        unsafe {
            xlib::XPutImage(
                self.display,
                self.window,
                self.gc,
                self.image,
                0,
                0,
                0,
                0,
                pixels.width(),
                pixels.height(),
            );
            xlib::XFlush(self.display);
        }
        Ok(())
    }

    fn next_event(&mut self) -> Option<WindowEvent> {
        loop {
            // SAFETY: `XPending` guards `XNextEvent`, so this never blocks.
            if unsafe { xlib::XPending(self.display) } == 0 {
                return None;
            }
            let mut xevent: xlib::XEvent = unsafe { mem::zeroed() };
            unsafe { xlib::XNextEvent(self.display, &mut xevent) };
            if let Some(event) = self.translate(&mut xevent) {
                return Some(event);
            }
        }
    }

    fn rebind(&mut self, pixels: &mut PixelBuffer) -> Result<()> {
        debug!(
            "X11Backend: rebinding image view to {}x{} at {:p}",
            pixels.width(),
            pixels.height(),
            pixels.as_ptr()
        );
        self.release_image();
        self.bind_image(pixels)
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        let c_title =
            CString::new(title).map_err(|_| NativeError::InvalidTitle(title.to_string()))?;
        unsafe {
            xlib::XStoreName(self.display, self.window, c_title.as_ptr() as *mut c_char);
            xlib::XFlush(self.display);
        }
        Ok(())
    }

    fn destroy(&mut self) {
        if self.display.is_null() {
            return;
        }
        info!("X11Backend::destroy() - window {}", self.window);
        self.release_image();
        // SAFETY: each handle is non-null/non-zero only if it was created on
        // `display`, and is released exactly once before being cleared.
        unsafe {
            if !self.gc.is_null() {
                xlib::XFreeGC(self.display, self.gc);
                self.gc = ptr::null_mut();
            }
            if self.window != 0 {
                xlib::XDestroyWindow(self.display, self.window);
                self.window = 0;
            }
            xlib::XCloseDisplay(self.display);
        }
        self.display = ptr::null_mut();
        self.visual = ptr::null_mut();
    }
}

impl Drop for X11Backend {
    fn drop(&mut self) {
        self.destroy();
    }
}
