use std::io::Cursor;
use std::sync::{Arc, Mutex};

use super::*;
use crate::foundation::core::ContentItem;
use crate::foundation::error::{VitrineError, VitrineResult};
use crate::slides::sampler::ImageLoader;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn content(n: usize) -> ContentList {
    (0..n)
        .map(|i| ContentItem {
            id: format!("slide-{i}"),
            title: format!("Slide {i}"),
            year: None,
            image_url: format!("s{i}.png"),
            thumbnail_url: None,
        })
        .collect::<Vec<_>>()
        .into()
}

fn desktop() -> Viewport {
    Viewport::new(1440.0, 900.0).unwrap()
}

fn session(n: usize) -> SlideSession {
    SlideSession::new(&MotionConfig::default(), content(n), desktop(), Duration::ZERO)
}

fn white_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([250, 250, 250, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn starts_idle_on_first_slide() {
    let s = session(4);
    assert_eq!(s.active_index(), Some(0));
    assert_eq!(s.phase(), Phase::Idle);
    assert!(s.auto_advance_enabled());
    assert!(s.is_dark_background());
    assert_eq!(s.transition_progress(Duration::ZERO), None);
}

#[test]
fn auto_advance_fires_every_interval() {
    let mut s = session(3);
    s.advance_clock(ms(2999));
    assert_eq!(s.active_index(), Some(0));

    s.advance_clock(ms(3000));
    assert_eq!(s.active_index(), Some(1));
    assert!(matches!(s.phase(), Phase::Transitioning { from: 0, to: 1, .. }));

    s.advance_clock(ms(4200));
    assert_eq!(s.phase(), Phase::Idle);

    s.advance_clock(ms(6000));
    s.advance_clock(ms(9000));
    // Wraps around.
    assert_eq!(s.active_index(), Some(0));
}

#[test]
fn requests_during_a_transition_are_dropped() {
    let mut s = session(5);
    assert!(s.navigate(NavRequest::Next, NavSource::Key, ms(0)).is_started());
    assert_eq!(
        s.navigate(NavRequest::Next, NavSource::Key, ms(100)),
        NavOutcome::Rejected(Rejection::InFlight)
    );
    assert_eq!(s.active_index(), Some(1));
    assert!(s.navigate(NavRequest::Next, NavSource::Key, ms(1200)).is_started());
    assert_eq!(s.active_index(), Some(2));
}

#[test]
fn accepted_requests_match_index_changes() {
    let mut s = session(6);
    let mut started = 0;
    let mut changes = 0;
    let mut last = s.active_index();
    for step in 0..200u64 {
        let now = ms(step * 73);
        let outcome = match step % 4 {
            0 => s.navigate(NavRequest::Next, NavSource::Key, now),
            1 => s.navigate(NavRequest::Prev, NavSource::Indicator, now),
            2 => s.select((step as usize) % 7, now),
            _ => s.wheel(if step % 8 == 3 { 120.0 } else { -120.0 }, now),
        };
        s.advance_clock(now);
        if outcome.is_started() {
            started += 1;
        }
        if s.active_index() != last {
            changes += 1;
            last = s.active_index();
        }
    }
    assert!(started > 0);
    assert_eq!(started, changes);
}

#[test]
fn manual_input_latches_auto_advance_off() {
    let mut s = session(4);
    s.key(Key::ArrowDown, ms(10));
    assert!(!s.auto_advance_enabled());
    let after_key = s.active_index();

    let mut now = ms(10);
    while now < Duration::from_secs(30) {
        now += ms(16);
        s.advance_clock(now);
        assert_eq!(s.active_index(), after_key);
    }
    assert_eq!(s.phase(), Phase::Idle);
}

#[test]
fn rejected_manual_input_still_latches() {
    let mut s = session(4);
    assert_eq!(
        s.wheel(3.0, ms(5)),
        NavOutcome::Rejected(Rejection::BelowThreshold)
    );
    assert!(!s.auto_advance_enabled());
    s.advance_clock(ms(10_000));
    assert_eq!(s.active_index(), Some(0));
}

#[test]
fn single_slide_never_transitions() {
    let mut s = session(1);
    let mut now = Duration::ZERO;
    while now < Duration::from_secs(20) {
        now += ms(50);
        s.advance_clock(now);
        assert_eq!(s.phase(), Phase::Idle);
    }
    let rejected = NavOutcome::Rejected(Rejection::TooFewSlides);
    assert_eq!(s.wheel(500.0, now), rejected);
    assert_eq!(s.key(Key::ArrowRight, now), Some(rejected));
    assert_eq!(s.select(0, now), rejected);
    assert_eq!(s.active_index(), Some(0));
}

#[test]
fn empty_show_is_inert() {
    let mut s = session(0);
    assert_eq!(s.active_index(), None);
    assert!(s.is_empty());
    s.advance_clock(ms(10_000));
    assert_eq!(s.open_active(), None);
    assert_eq!(
        s.on_input(&InputEvent::Activate { index: 3 }, ms(1)),
        InputDisposition::Consumed
    );
    let frame = s.frame(ms(2));
    assert_eq!(frame.active_index, None);
    assert!(frame.transition.is_none());
}

#[test]
fn wheel_is_filtered_and_debounced() {
    let mut s = session(4);
    assert!(s.wheel(120.0, ms(0)).is_started());
    // Transition is over but the wheel window is not.
    assert_eq!(
        s.wheel(120.0, ms(1300)),
        NavOutcome::Rejected(Rejection::Debounced)
    );
    assert!(s.wheel(120.0, ms(1500)).is_started());
    assert_eq!(s.active_index(), Some(2));
    assert!(s.wheel(-90.0, ms(3100)).is_started());
    assert_eq!(s.active_index(), Some(1));
    assert_eq!(
        s.wheel(f64::NAN, ms(9000)),
        NavOutcome::Rejected(Rejection::BelowThreshold)
    );
}

#[test]
fn swipes_need_minimum_travel() {
    let mut s = session(4);
    s.touch_start(Point::new(500.0, 600.0));
    assert_eq!(
        s.touch_end(Point::new(500.0, 570.0), ms(0)),
        NavOutcome::Rejected(Rejection::BelowThreshold)
    );

    s.touch_start(Point::new(500.0, 600.0));
    assert_eq!(
        s.touch_end(Point::new(505.0, 480.0), ms(10)),
        NavOutcome::Started { from: 0, to: 1 }
    );

    s.touch_start(Point::new(300.0, 400.0));
    assert_eq!(
        s.touch_end(Point::new(380.0, 410.0), ms(2000)),
        NavOutcome::Started { from: 1, to: 0 }
    );
    assert_eq!(
        s.touch_end(Point::new(0.0, 0.0), ms(5000)),
        NavOutcome::Rejected(Rejection::BelowThreshold)
    );
}

#[test]
fn arrow_keys_map_to_directions() {
    let mut s = session(4);
    assert_eq!(
        s.key(Key::ArrowRight, ms(0)),
        Some(NavOutcome::Started { from: 0, to: 1 })
    );
    assert_eq!(
        s.key(Key::ArrowUp, ms(2000)),
        Some(NavOutcome::Started { from: 1, to: 0 })
    );
    assert_eq!(
        s.key(Key::ArrowLeft, ms(4000)),
        Some(NavOutcome::Started { from: 0, to: 3 })
    );
    assert_eq!(
        s.key(Key::ArrowDown, ms(6000)),
        Some(NavOutcome::Started { from: 3, to: 0 })
    );
    assert_eq!(s.key(Key::Other, ms(8000)), None);
}

#[test]
fn indicator_selection_validates_index() {
    let mut s = session(4);
    assert_eq!(
        s.select(9, ms(0)),
        NavOutcome::Rejected(Rejection::OutOfRange)
    );
    assert_eq!(
        s.select(0, ms(0)),
        NavOutcome::Rejected(Rejection::AlreadyActive)
    );
    assert_eq!(s.select(3, ms(0)), NavOutcome::Started { from: 0, to: 3 });
    assert_eq!(s.open_active().unwrap().content_id, "slide-3");
}

#[test]
fn progress_is_eased_and_bounded() {
    let mut s = session(3);
    s.navigate(NavRequest::Next, NavSource::Key, ms(1000));
    assert_eq!(s.transition_progress(ms(1000)), Some(0.0));
    let mid = s.transition_progress(ms(1600)).unwrap();
    assert!((mid - 0.5).abs() < 1e-9);
    let early = s.transition_progress(ms(1120)).unwrap();
    assert!(early < 0.1, "in-out cubic starts slow: {early}");
    assert_eq!(s.transition_progress(ms(5000)), Some(1.0));

    let frame = s.frame(ms(1600));
    let t = frame.transition.unwrap();
    assert_eq!((t.from, t.to), (0, 1));

    s.advance_clock(ms(2200));
    assert_eq!(s.transition_progress(ms(2200)), None);
}

#[test]
fn narrow_viewport_passes_scroll_gestures_through() {
    let mut s = SlideSession::new(
        &MotionConfig::default(),
        content(3),
        Viewport::new(390.0, 844.0).unwrap(),
        Duration::ZERO,
    );
    let wheel = InputEvent::Wheel {
        delta_x: 0.0,
        delta_y: 200.0,
    };
    assert_eq!(s.on_input(&wheel, ms(1)), InputDisposition::Passthrough);
    assert_eq!(s.active_index(), Some(0));
    assert!(s.auto_advance_enabled());

    let key = InputEvent::Key {
        key: Key::ArrowDown,
    };
    assert_eq!(s.on_input(&key, ms(2)), InputDisposition::Consumed);
    assert_eq!(s.active_index(), Some(1));
}

#[test]
fn view_frame_reports_state() {
    let mut s = session(2);
    let Some(ViewFrame::Slides(frame)) = s.on_frame(ms(3000)) else {
        panic!("expected a slide frame");
    };
    assert_eq!(frame.active_index, Some(1));
    assert!(frame.transition.is_some());
    assert!(frame.auto_advance);
}

fn wait_for_light(s: &mut SlideSession, now: Duration) -> bool {
    for _ in 0..1000 {
        s.advance_clock(now);
        if !s.is_dark_background() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn brightness_sample_updates_background() {
    let loader: Arc<dyn ImageLoader> =
        Arc::new(|_: &str| -> VitrineResult<Vec<u8>> { Ok(white_png()) });
    let cfg = MotionConfig::default();
    let sampler = BrightnessSampler::new(loader, cfg.brightness.clone());
    let mut s = SlideSession::new(&cfg, content(3), desktop(), Duration::ZERO)
        .with_brightness(sampler, Duration::ZERO);
    assert!(wait_for_light(&mut s, ms(1)));
}

#[test]
fn overdue_sample_settles_dark() {
    let gate = Arc::new(Mutex::new(()));
    let blocker = Arc::clone(&gate);
    let loader: Arc<dyn ImageLoader> = Arc::new(move |url: &str| -> VitrineResult<Vec<u8>> {
        if url == "s0.png" {
            return Ok(white_png());
        }
        let _wait = blocker.lock();
        Err(VitrineError::sampling("unreachable host"))
    });
    let cfg = MotionConfig::default();
    let sampler = BrightnessSampler::new(loader, cfg.brightness.clone());
    let mut s = SlideSession::new(&cfg, content(3), desktop(), Duration::ZERO)
        .with_brightness(sampler, Duration::ZERO);
    assert!(wait_for_light(&mut s, ms(1)));

    let held = gate.lock().unwrap();
    s.select(1, ms(100));
    s.advance_clock(ms(200));
    assert!(!s.is_dark_background());
    s.advance_clock(ms(100) + cfg.brightness.timeout());
    assert!(s.is_dark_background());
    drop(held);
}
