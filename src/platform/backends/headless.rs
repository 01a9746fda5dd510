// src/platform/backends/headless.rs

//! Headless backend: no native window, an injectable event queue.
//!
//! Used by the test suite to drive `WindowContext` with synthetic events and
//! by anything that wants the window/input model without a display server.

use crate::pixels::PixelBuffer;
use crate::platform::backends::{Backend, WindowEvent};
use anyhow::Result;
use log::{info, trace};
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    queue: VecDeque<WindowEvent>,
    title: String,
    /// Storage address and size the "image view" currently points at.
    bound: (usize, u32, u32),
    presents: usize,
    rebinds: usize,
    polls: usize,
    destroyed: bool,
}

impl HeadlessBackend {
    /// Queues a synthetic event behind any already pending.
    pub fn push_event(&mut self, event: WindowEvent) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of `present` calls so far.
    pub fn presents(&self) -> usize {
        self.presents
    }

    /// Number of `rebind` calls so far.
    pub fn rebinds(&self) -> usize {
        self.rebinds
    }

    /// Number of times the event queue has been consulted.
    pub fn polls(&self) -> usize {
        self.polls
    }

    /// Address the image view is bound to.
    pub fn bound_ptr(&self) -> usize {
        self.bound.0
    }

    /// Size the image view is bound to.
    pub fn bound_size(&self) -> (u32, u32) {
        (self.bound.1, self.bound.2)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Backend for HeadlessBackend {
    fn create(pixels: &mut PixelBuffer, title: &str) -> Result<Self> {
        info!(
            "HeadlessBackend::create() - {}x{} '{}'",
            pixels.width(),
            pixels.height(),
            title
        );
        Ok(Self {
            title: title.to_string(),
            bound: (pixels.as_ptr() as usize, pixels.width(), pixels.height()),
            ..Self::default()
        })
    }

    fn present(&mut self, pixels: &PixelBuffer) -> Result<()> {
        trace!("HeadlessBackend: present {}x{}", pixels.width(), pixels.height());
        debug_assert_eq!(self.bound.0, pixels.as_ptr() as usize, "present before rebind");
        self.presents += 1;
        Ok(())
    }

    fn next_event(&mut self) -> Option<WindowEvent> {
        self.polls += 1;
        self.queue.pop_front()
    }

    fn rebind(&mut self, pixels: &mut PixelBuffer) -> Result<()> {
        self.rebinds += 1;
        self.bound = (pixels.as_ptr() as usize, pixels.width(), pixels.height());
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.title = title.to_string();
        Ok(())
    }

    fn destroy(&mut self) {
        if !self.destroyed {
            info!("HeadlessBackend::destroy()");
        }
        self.queue.clear();
        self.destroyed = true;
    }
}
