// src/window/tests.rs

use super::*;
use crate::platform::backends::headless::HeadlessBackend;
use std::cell::RefCell;
use std::rc::Rc;
use test_log::test;

type TestWindow = WindowContext<HeadlessBackend>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Press(Key, Modifiers),
    Release(Key, Modifiers),
    Text(String),
    Move(i32, i32, i32, i32),
    Enter(i32, i32, i32, i32),
    Leave(i32, i32, i32, i32),
    Resize(u32, u32),
}

/// Creates a window whose hooks all append to the returned log.
fn recording_window(config: &WindowConfig) -> (TestWindow, Rc<RefCell<Vec<Call>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut window = TestWindow::create(config).expect("headless create never fails");

    let l = log.clone();
    window.on_key_press(move |state, key, mods| {
        l.borrow_mut().push(Call::Press(key, mods));
        if key == Key::Escape {
            state.close();
        }
    });
    let l = log.clone();
    window.on_key_release(move |_, key, mods| l.borrow_mut().push(Call::Release(key, mods)));
    let l = log.clone();
    window.on_text_input(move |_, text| l.borrow_mut().push(Call::Text(text.to_string())));
    let l = log.clone();
    window.on_mouse_move(move |_, x, y, px, py| l.borrow_mut().push(Call::Move(x, y, px, py)));
    let l = log.clone();
    window.on_mouse_enter(move |_, x, y, px, py| l.borrow_mut().push(Call::Enter(x, y, px, py)));
    let l = log.clone();
    window.on_mouse_leave(move |_, x, y, px, py| l.borrow_mut().push(Call::Leave(x, y, px, py)));
    let l = log.clone();
    window.on_window_resize(move |_, w, h| l.borrow_mut().push(Call::Resize(w, h)));

    (window, log)
}

fn key_down(key: Key) -> WindowEvent {
    WindowEvent::KeyDown {
        key,
        modifiers: Modifiers::empty(),
        text: None,
    }
}

fn key_up(key: Key) -> WindowEvent {
    WindowEvent::KeyUp {
        key,
        modifiers: Modifiers::empty(),
    }
}

#[test]
fn key_down_then_up_updates_state_and_fires_hooks_in_order() {
    let (mut window, log) = recording_window(&WindowConfig::default());

    window.backend_mut().push_event(key_down(Key::A));
    assert!(!window.update());
    assert!(window.key_down(Key::A));
    assert_eq!(*log.borrow(), vec![Call::Press(Key::A, Modifiers::empty())]);

    window.backend_mut().push_event(key_up(Key::A));
    assert!(!window.update());
    assert!(!window.key_down(Key::A));
    assert_eq!(
        *log.borrow(),
        vec![
            Call::Press(Key::A, Modifiers::empty()),
            Call::Release(Key::A, Modifiers::empty()),
        ]
    );
}

#[test]
fn text_input_follows_key_press_as_a_separate_call() {
    let (mut window, log) = recording_window(&WindowConfig::default());
    window.backend_mut().push_event(WindowEvent::KeyDown {
        key: Key::Q,
        modifiers: Modifiers::SHIFT,
        text: Some("Q".to_string()),
    });
    // Empty composed text is not reported.
    window.backend_mut().push_event(WindowEvent::KeyDown {
        key: Key::LeftShift,
        modifiers: Modifiers::SHIFT,
        text: Some(String::new()),
    });
    window.update();
    assert_eq!(
        *log.borrow(),
        vec![
            Call::Press(Key::Q, Modifiers::SHIFT),
            Call::Text("Q".to_string()),
            Call::Press(Key::LeftShift, Modifiers::SHIFT),
        ]
    );
}

#[test]
fn modifiers_come_from_each_event() {
    let (mut window, _log) = recording_window(&WindowConfig::default());
    window.backend_mut().push_event(WindowEvent::KeyDown {
        key: Key::C,
        modifiers: Modifiers::CONTROL | Modifiers::NUM_LOCK,
        text: None,
    });
    window.update();
    assert_eq!(window.modifiers(), Modifiers::CONTROL | Modifiers::NUM_LOCK);

    window.backend_mut().push_event(key_up(Key::C));
    window.update();
    assert_eq!(window.modifiers(), Modifiers::empty());
}

#[test]
fn pointer_buttons_share_the_key_table() {
    let (mut window, log) = recording_window(&WindowConfig::default());
    window.backend_mut().push_event(WindowEvent::ButtonDown {
        key: Key::Button1,
        modifiers: Modifiers::ALT,
    });
    window.update();
    assert!(window.key_down(Key::Button1));
    assert!(!window.key_down(Key::A));

    window.backend_mut().push_event(WindowEvent::ButtonUp {
        key: Key::Button1,
        modifiers: Modifiers::empty(),
    });
    window.update();
    assert!(!window.key_down(Key::Button1));
    assert_eq!(
        *log.borrow(),
        vec![
            Call::Press(Key::Button1, Modifiers::ALT),
            Call::Release(Key::Button1, Modifiers::empty()),
        ]
    );
}

#[test]
fn unmapped_keys_land_in_the_invalid_slot() {
    let (mut window, _log) = recording_window(&WindowConfig::default());
    window.backend_mut().push_event(key_down(Key::Invalid));
    window.update();
    assert!(window.key_down(Key::Invalid));
    assert!(!window.is_closed());
}

#[test]
fn first_move_has_zero_delta_then_tracks_previous() {
    let (mut window, log) = recording_window(&WindowConfig::default());
    window.backend_mut().push_event(WindowEvent::MouseMove { x: 300, y: 200 });
    window.backend_mut().push_event(WindowEvent::MouseMove { x: 310, y: 195 });
    window.update();
    assert_eq!(
        *log.borrow(),
        vec![Call::Move(300, 200, 300, 200), Call::Move(310, 195, 300, 200)]
    );
    assert_eq!(window.mouse(), (310, 195));
    assert_eq!(window.prev_mouse(), (310, 195));
}

#[test]
fn enter_and_leave_snap_position_with_zero_delta() {
    let (mut window, log) = recording_window(&WindowConfig::default());
    window.backend_mut().push_event(WindowEvent::MouseMove { x: 5, y: 5 });
    window.backend_mut().push_event(WindowEvent::MouseLeave { x: -3, y: 40 });
    window.backend_mut().push_event(WindowEvent::MouseEnter { x: 100, y: 7 });
    window.update();
    assert_eq!(
        *log.borrow(),
        vec![
            Call::Move(5, 5, 5, 5),
            Call::Leave(-3, 40, -3, 40),
            Call::Enter(100, 7, 100, 7),
        ]
    );
    assert_eq!(window.mouse(), (100, 7));
    assert_eq!(window.prev_mouse(), (100, 7));
}

// Both readings of first-move seeding around enter/leave. Either way the
// first move after entering reports a delta from the entry point, because
// entering already snapped `prev` there.
#[test]
fn move_after_reentry_without_reseeding() {
    let (mut window, log) = recording_window(&WindowConfig::default());
    for event in [
        WindowEvent::MouseMove { x: 10, y: 10 },
        WindowEvent::MouseLeave { x: 0, y: 10 },
        WindowEvent::MouseEnter { x: 50, y: 60 },
        WindowEvent::MouseMove { x: 52, y: 61 },
    ] {
        window.backend_mut().push_event(event);
    }
    window.update();
    assert_eq!(log.borrow().last(), Some(&Call::Move(52, 61, 50, 60)));
}

#[test]
fn move_after_reentry_with_reseeding() {
    let config = WindowConfig {
        reseed_mouse_on_crossing: true,
        ..WindowConfig::default()
    };
    let (mut window, log) = recording_window(&config);
    for event in [
        WindowEvent::MouseMove { x: 10, y: 10 },
        WindowEvent::MouseLeave { x: 0, y: 10 },
        WindowEvent::MouseEnter { x: 50, y: 60 },
        WindowEvent::MouseMove { x: 52, y: 61 },
        WindowEvent::MouseMove { x: 55, y: 65 },
    ] {
        window.backend_mut().push_event(event);
    }
    window.update();
    let calls = log.borrow();
    assert_eq!(calls[3], Call::Move(52, 61, 52, 61));
    assert_eq!(calls[4], Call::Move(55, 65, 52, 61));
}

#[test]
fn resize_grows_buffer_rebinds_and_fires_once() {
    let (mut window, log) = recording_window(&WindowConfig::new(800, 600, "resize"));
    let old_ptr = window.pixels().as_ptr() as usize;
    assert_eq!(window.backend().bound_ptr(), old_ptr);

    window.backend_mut().push_event(WindowEvent::Resize {
        width: 1024,
        height: 768,
    });
    window.update();

    assert_eq!(window.size(), (1024, 768));
    assert_eq!(window.pixels().capacity(), 1024 * 768);
    assert_eq!(*log.borrow(), vec![Call::Resize(1024, 768)]);
    assert_eq!(window.backend().rebinds(), 1);
    assert_eq!(window.backend().bound_ptr(), window.pixels().as_ptr() as usize);
    assert_eq!(window.backend().bound_size(), (1024, 768));
}

#[test]
fn resize_to_same_size_is_ignored() {
    let (mut window, log) = recording_window(&WindowConfig::new(640, 480, "same"));
    window.backend_mut().push_event(WindowEvent::Resize {
        width: 640,
        height: 480,
    });
    window.update();
    assert!(log.borrow().is_empty());
    assert_eq!(window.backend().rebinds(), 0);
}

#[test]
fn shrinking_resize_keeps_storage_but_rebinds_size() {
    let (mut window, log) = recording_window(&WindowConfig::new(400, 300, "shrink"));
    let ptr = window.pixels().as_ptr();
    window.backend_mut().push_event(WindowEvent::Resize {
        width: 200,
        height: 100,
    });
    window.update();
    assert_eq!(window.pixels().as_ptr(), ptr);
    assert_eq!(window.pixels().capacity(), 400 * 300);
    assert_eq!(window.backend().bound_size(), (200, 100));
    assert_eq!(*log.borrow(), vec![Call::Resize(200, 100)]);
}

#[test]
fn close_request_stops_the_drain_and_is_terminal() {
    let (mut window, log) = recording_window(&WindowConfig::default());
    window.backend_mut().push_event(key_down(Key::A));
    window.backend_mut().push_event(WindowEvent::CloseRequested);
    window.backend_mut().push_event(key_down(Key::B));

    assert!(window.update());
    assert!(window.is_closed());
    assert_eq!(*log.borrow(), vec![Call::Press(Key::A, Modifiers::empty())]);
    assert_eq!(window.backend().pending(), 1);

    let presents = window.backend().presents();
    let polls = window.backend().polls();
    window.backend_mut().push_event(key_down(Key::C));
    window.backend_mut().push_event(WindowEvent::MouseMove { x: 1, y: 1 });
    for _ in 0..3 {
        assert!(window.update());
    }
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(window.backend().presents(), presents);
    assert_eq!(window.backend().polls(), polls);
    assert!(!window.key_down(Key::B));
    assert!(!window.key_down(Key::C));
}

#[test]
fn escape_closes_by_default() {
    let mut window = TestWindow::create(&WindowConfig::default()).unwrap();
    window.backend_mut().push_event(key_down(Key::Escape));
    window.backend_mut().push_event(key_down(Key::A));
    assert!(window.update());
    assert!(window.key_down(Key::Escape));
    assert!(!window.key_down(Key::A));
    assert!(window.update());
}

#[test]
fn escape_binding_can_be_disabled() {
    let config = WindowConfig {
        escape_closes: false,
        ..WindowConfig::default()
    };
    let mut window = TestWindow::create(&config).unwrap();
    window.backend_mut().push_event(key_down(Key::Escape));
    assert!(!window.update());
    assert!(!window.is_closed());
}

#[test]
fn escape_text_still_reported_for_the_closing_event() {
    let (mut window, log) = recording_window(&WindowConfig::default());
    window.backend_mut().push_event(WindowEvent::KeyDown {
        key: Key::Escape,
        modifiers: Modifiers::empty(),
        text: Some("\u{1b}".to_string()),
    });
    assert!(window.update());
    assert_eq!(
        *log.borrow(),
        vec![
            Call::Press(Key::Escape, Modifiers::empty()),
            Call::Text("\u{1b}".to_string()),
        ]
    );
}

#[test]
fn update_presents_before_draining() {
    let mut window = TestWindow::create(&WindowConfig::default()).unwrap();
    assert!(!window.update());
    assert!(!window.update());
    assert_eq!(window.backend().presents(), 2);
    assert_eq!(window.backend().pending(), 0);
}

#[test]
fn explicit_close_short_circuits_update() {
    let mut window = TestWindow::create(&WindowConfig::default()).unwrap();
    window.close();
    window.backend_mut().push_event(key_down(Key::A));
    assert!(window.update());
    assert_eq!(window.backend().presents(), 0);
    assert_eq!(window.backend().pending(), 1);
}

#[test]
fn hooks_can_be_supplied_at_construction() {
    let seen = Rc::new(RefCell::new(0u32));
    let s = seen.clone();
    let mut callbacks = Callbacks::new(false);
    callbacks.on_window_resize = Box::new(move |_, w, h| *s.borrow_mut() = w * h);
    let mut window = TestWindow::with_callbacks(&WindowConfig::new(10, 10, "hooks"), callbacks).unwrap();
    window.backend_mut().push_event(WindowEvent::Resize { width: 20, height: 3 });
    window.update();
    assert_eq!(*seen.borrow(), 60);
}

#[test]
fn pixels_written_between_frames_survive_update() {
    let mut window = TestWindow::create(&WindowConfig::new(16, 16, "draw")).unwrap();
    window.pixels_mut().set_pixel(3, 4, 0x00FF00);
    window.update();
    assert_eq!(window.pixels().get_pixel(3, 4), 0x00FF00);
    assert_eq!(window.backend().title(), "draw");
    window.set_title("renamed").unwrap();
    assert_eq!(window.backend().title(), "renamed");
    window.destroy();
}

#[test]
fn pixel_view_stays_bound_across_growing_resize() {
    let mut window = TestWindow::create(&WindowConfig::new(8, 8, "bound")).unwrap();
    window.pixels_mut().fill_rect(0, 0, 8, 8, 0x112233);
    window.backend_mut().push_event(WindowEvent::Resize { width: 64, height: 64 });
    window.update();

    let view = window.pixels_mut();
    assert_eq!((view.width(), view.height()), (64, 64));
    let storage = view.as_ptr() as usize;
    drop(view);
    assert_eq!(window.backend().bound_ptr(), storage);
    assert_eq!(window.backend().bound_size(), (64, 64));

    window.pixels_mut().set_pixel(63, 63, 0xABCDEF);
    window.update();
    assert_eq!(window.backend().presents(), 2);
    assert_eq!(window.backend().bound_ptr(), window.pixels().as_ptr() as usize);
    assert_eq!(window.pixels().get_pixel(63, 63), 0xABCDEF);
}
