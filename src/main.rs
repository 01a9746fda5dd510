// src/main.rs

//! Demo: a gradient window you can draw on with the left mouse button.
//!
//! Usage: `softwin-demo [config.json]`

use anyhow::Context;
use log::info;
use softwin::{rgb, Key, PixelsMut, Window, WindowConfig};
use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

const FRAME_TIME: Duration = Duration::from_millis(16);
const BRUSH: u32 = rgb(0xFF, 0xFF, 0xFF);

fn paint_gradient(pixels: &mut PixelsMut<'_>) {
    let (w, h) = (pixels.width().max(1), pixels.height().max(1));
    for y in 0..pixels.height() {
        for x in 0..pixels.width() {
            let r = (x * 255 / w) as u8;
            let b = (y * 255 / h) as u8;
            // SAFETY: loop bounds are the buffer's logical size.
            unsafe { pixels.set_pixel_unchecked(x as usize, y as usize, rgb(r, 0x30, b)) };
        }
    }
}

/// Main entry point for the demo.
fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => WindowConfig::load(&path)?,
        None => WindowConfig::default(),
    };

    // Default filter comes from the config if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_filter))
        .format_timestamp_micros()
        .init();

    info!("Starting softwin demo: {:?}", config);

    let mut window = Window::create(&config).context("Failed to open demo window")?;
    paint_gradient(&mut window.pixels_mut());

    // Hooks only see input state, so strokes and resizes are queued here and
    // applied to the framebuffer between frames.
    let strokes: Rc<RefCell<Vec<(i32, i32, i32, i32)>>> = Rc::default();
    let resized = Rc::new(RefCell::new(false));

    let s = strokes.clone();
    window.on_mouse_move(move |state, x, y, px, py| {
        if state.key_down(Key::Button1) {
            s.borrow_mut().push((px, py, x, y));
        }
    });
    let r = resized.clone();
    window.on_window_resize(move |_, width, height| {
        info!("Window resized to {}x{}", width, height);
        *r.borrow_mut() = true;
    });
    window.on_text_input(|_, text| info!("Text input: {:?}", text));
    let escape_closes = config.escape_closes;
    window.on_key_press(move |state, key, mods| {
        if !key.is_modifier() {
            info!("Key press: {:?} {:?}", key, mods);
        }
        if escape_closes && key == Key::Escape {
            state.close();
        }
    });

    while !window.update() {
        if resized.replace(false) {
            paint_gradient(&mut window.pixels_mut());
        }
        for (x0, y0, x1, y1) in strokes.borrow_mut().drain(..) {
            draw_segment(&mut window.pixels_mut(), x0, y0, x1, y1);
        }
        thread::sleep(FRAME_TIME);
    }

    info!("Window closed, exiting.");
    window.destroy();
    Ok(())
}

/// Plots a 3x3 brush along the segment, clipped to the buffer.
fn draw_segment(pixels: &mut PixelsMut<'_>, x0: i32, y0: i32, x1: i32, y1: i32) {
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
    for i in 0..=steps {
        let x = x0 + (x1 - x0) * i / steps;
        let y = y0 + (y1 - y0) * i / steps;
        pixels.fill_rect(x - 1, y - 1, 3, 3, BRUSH);
    }
}
