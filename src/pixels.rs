// src/pixels.rs

//! Software framebuffer.
//!
//! `PixelBuffer` holds packed 32-bit pixels in row-major order. The native
//! backend aliases this storage directly, so pixels written here are what the
//! next present puts on screen. Storage only grows: shrinking the logical
//! size keeps the allocation, and regrowing within the old capacity reuses it
//! without clearing whatever was there before.

use log::debug;
use std::ops::Deref;

/// A packed pixel, `0x00RRGGBB` (blue in the lowest byte).
pub type Pixel = u32;

/// Packs an 8-bit-per-channel colour into a [`Pixel`].
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Pixel {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    /// Largest `width * height` ever allocated. Never decreases.
    capacity: usize,
    data: Vec<Pixel>,
}

impl PixelBuffer {
    /// Allocates exactly `width * height` zeroed pixels.
    pub fn new(width: u32, height: u32) -> Self {
        let len = area(width, height);
        Self {
            width,
            height,
            capacity: len,
            data: vec![0; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the logical size.
    ///
    /// Reallocates (zeroed, exactly `width * height`) only when the new area
    /// exceeds the current capacity; returns `true` in that case so the caller
    /// knows any native view of the old storage is now dangling.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let len = area(width, height);
        let reallocated = len > self.capacity;
        if reallocated {
            debug!(
                "PixelBuffer: growing storage {} -> {} pixels ({}x{})",
                self.capacity, len, width, height
            );
            // Drop the old block before allocating the new one.
            self.data = Vec::new();
            self.data = vec![0; len];
            self.capacity = len;
        }
        self.width = width;
        self.height = height;
        reallocated
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Writes one pixel. Out-of-range coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, value: Pixel) {
        if let Some(i) = self.offset(x, y) {
            self.data[i] = value;
        }
    }

    /// Reads one pixel. Out-of-range coordinates read as 0.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Pixel {
        self.offset(x, y).map_or(0, |i| self.data[i])
    }

    /// Writes one pixel without bounds checking.
    ///
    /// # Safety
    /// `x < width` and `y < height` must hold.
    #[inline]
    pub unsafe fn set_pixel_unchecked(&mut self, x: usize, y: usize, value: Pixel) {
        let i = y * self.width as usize + x;
        // SAFETY: caller guarantees (x, y) is inside the logical area, which
        // never exceeds `capacity == data.len()`.
        unsafe { *self.data.get_unchecked_mut(i) = value };
    }

    /// Reads one pixel without bounds checking.
    ///
    /// # Safety
    /// `x < width` and `y < height` must hold.
    #[inline]
    pub unsafe fn get_pixel_unchecked(&self, x: usize, y: usize) -> Pixel {
        let i = y * self.width as usize + x;
        // SAFETY: see `set_pixel_unchecked`.
        unsafe { *self.data.get_unchecked(i) }
    }

    /// Fills the whole logical area.
    pub fn clear(&mut self, value: Pixel) {
        let len = area(self.width, self.height);
        self.data[..len].fill(value);
    }

    /// Fills a rectangle, clipped to the logical area.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, value: Pixel) {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + w as i64).min(self.width as i64);
        let y1 = (y as i64 + h as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let stride = self.width as usize;
        for row in y0 as usize..y1 as usize {
            let start = row * stride;
            self.data[start + x0 as usize..start + x1 as usize].fill(value);
        }
    }

    /// The logical `width * height` pixels, row-major.
    pub fn as_slice(&self) -> &[Pixel] {
        &self.data[..area(self.width, self.height)]
    }

    pub fn as_mut_slice(&mut self) -> &mut [Pixel] {
        let len = area(self.width, self.height);
        &mut self.data[..len]
    }

    /// Start of the backing storage. Stable until the next reallocating resize.
    pub fn as_ptr(&self) -> *const Pixel {
        self.data.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut Pixel {
        self.data.as_mut_ptr()
    }

    /// Frees the storage and zeroes every field.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.width = 0;
        self.height = 0;
        self.capacity = 0;
    }
}

/// Pixel-only access to a `PixelBuffer` a native view is bound to.
///
/// Reads go through `Deref`; writes are limited to pixel contents. There is
/// no way to resize or release the storage through this, so the bound view
/// stays valid.
///
/// ```compile_fail
/// use softwin::{HeadlessBackend, WindowConfig, WindowContext};
/// let mut window = WindowContext::<HeadlessBackend>::create(&WindowConfig::default()).unwrap();
/// window.pixels_mut().resize(4096, 4096);
/// ```
#[derive(Debug)]
pub struct PixelsMut<'a> {
    buffer: &'a mut PixelBuffer,
}

impl<'a> PixelsMut<'a> {
    pub(crate) fn new(buffer: &'a mut PixelBuffer) -> Self {
        Self { buffer }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, value: Pixel) {
        self.buffer.set_pixel(x, y, value);
    }

    /// # Safety
    /// `x < width` and `y < height` must hold.
    #[inline]
    pub unsafe fn set_pixel_unchecked(&mut self, x: usize, y: usize, value: Pixel) {
        // SAFETY: forwarded caller contract.
        unsafe { self.buffer.set_pixel_unchecked(x, y, value) }
    }

    pub fn clear(&mut self, value: Pixel) {
        self.buffer.clear(value);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, value: Pixel) {
        self.buffer.fill_rect(x, y, w, h, value);
    }

    pub fn as_mut_slice(&mut self) -> &mut [Pixel] {
        self.buffer.as_mut_slice()
    }
}

impl Deref for PixelsMut<'_> {
    type Target = PixelBuffer;

    fn deref(&self) -> &PixelBuffer {
        &*self.buffer
    }
}

#[inline]
fn area(width: u32, height: u32) -> usize {
    width as usize * height as usize
}
