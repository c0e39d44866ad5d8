use super::*;
use crate::render::frame::{ScrollFrame, ViewFrame};
use crate::render::sink::InMemorySink;

/// Emits a scroll frame carrying its tag and the clock, and consumes wheel events.
struct Recorder {
    tag: f64,
    inputs: usize,
    last_now: Option<Duration>,
}

impl Recorder {
    fn new(tag: f64) -> Self {
        Self {
            tag,
            inputs: 0,
            last_now: None,
        }
    }
}

impl View for Recorder {
    fn on_frame(&mut self, now: Duration) -> Option<ViewFrame> {
        self.last_now = Some(now);
        Some(ViewFrame::Scroll(ScrollFrame {
            content_offset_y: now.as_secs_f64(),
            current: self.tag,
            target: 0.0,
            max_scroll: 0.0,
            items: Vec::new(),
        }))
    }

    fn on_input(&mut self, event: &InputEvent, _now: Duration) -> InputDisposition {
        self.inputs += 1;
        match event {
            InputEvent::Wheel { .. } => InputDisposition::Consumed,
            _ => InputDisposition::Ignored,
        }
    }
}

fn tags(sink: &InMemorySink) -> Vec<(u64, f64)> {
    sink.frames()
        .iter()
        .map(|(idx, frame)| match frame {
            ViewFrame::Scroll(f) => (idx.0, f.current),
            other => panic!("unexpected frame {other:?}"),
        })
        .collect()
}

#[test]
fn frames_arrive_in_index_then_mount_order() {
    let mut stage = Stage::new();
    let _a = stage.mount(Recorder::new(1.0));
    let _b = stage.mount(Recorder::new(2.0));
    let mut sink = InMemorySink::new();
    stage.run_frame(&mut sink).unwrap();
    stage.run_frame(&mut sink).unwrap();
    assert_eq!(tags(&sink), vec![(0, 1.0), (0, 2.0), (1, 1.0), (1, 2.0)]);
}

#[test]
fn clock_advances_one_interval_per_frame() {
    let interval = Duration::from_millis(10);
    let mut stage = Stage::with_frame_interval(interval);
    let recorder = stage.mount(Recorder::new(0.0));
    let mut sink = InMemorySink::new();
    for _ in 0..3 {
        stage.run_frame(&mut sink).unwrap();
    }
    assert_eq!(recorder.view().last_now, Some(interval * 2));
    assert_eq!(stage.now(), interval * 3);
    assert_eq!(stage.next_frame_index(), FrameIndex(3));

    stage.advance(Duration::from_secs(1));
    assert_eq!(stage.now(), interval * 3 + Duration::from_secs(1));
}

#[test]
fn dispatch_reports_consumption() {
    let mut stage = Stage::new();
    let recorder = stage.mount(Recorder::new(0.0));
    let wheel = InputEvent::Wheel {
        delta_x: 0.0,
        delta_y: 10.0,
    };
    assert_eq!(stage.dispatch(&wheel), InputDisposition::Consumed);
    let key = InputEvent::Key {
        key: crate::input::event::Key::Other,
    };
    assert_eq!(stage.dispatch(&key), InputDisposition::Ignored);
    assert_eq!(recorder.view().inputs, 2);
}

#[test]
fn unmount_stops_frames_and_listeners() {
    let mut stage = Stage::new();
    let kept = stage.mount(Recorder::new(1.0));
    let gone = stage.mount(Recorder::new(2.0));
    assert_eq!(stage.mounted(), 2);

    gone.unmount();
    assert_eq!(stage.mounted(), 1);

    let mut sink = InMemorySink::new();
    for _ in 0..5 {
        stage.run_frame(&mut sink).unwrap();
    }
    assert!(tags(&sink).iter().all(|(_, tag)| *tag == 1.0));
    assert_eq!(sink.frames().len(), 5);

    drop(kept);
    assert_eq!(stage.mounted(), 0);
    assert_eq!(
        stage.dispatch(&InputEvent::Wheel {
            delta_x: 0.0,
            delta_y: 1.0
        }),
        InputDisposition::Ignored
    );
}

#[test]
fn empty_stage_runs_frames() {
    let mut stage = Stage::new();
    let mut sink = InMemorySink::new();
    assert_eq!(stage.run_frame(&mut sink).unwrap(), FrameIndex(0));
    assert!(sink.frames().is_empty());
}

struct DropFlag(Rc<std::cell::Cell<bool>>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

struct Owned {
    _flag: DropFlag,
}

impl View for Owned {
    fn on_frame(&mut self, _now: Duration) -> Option<ViewFrame> {
        None
    }

    fn on_input(&mut self, _event: &InputEvent, _now: Duration) -> InputDisposition {
        InputDisposition::Ignored
    }
}

#[test]
fn unmount_frees_controller_before_next_frame() {
    let mut stage = Stage::new();
    let dropped = Rc::new(std::cell::Cell::new(false));
    let mounted = stage.mount(Owned {
        _flag: DropFlag(Rc::clone(&dropped)),
    });
    assert!(!dropped.get());

    mounted.unmount();
    assert!(dropped.get());
    assert_eq!(stage.mounted(), 0);
}

struct RejectingSink;

impl FrameSink for RejectingSink {
    fn push_frame(&mut self, _idx: FrameIndex, _frame: &ViewFrame) -> VitrineResult<()> {
        Err(crate::foundation::error::VitrineError::validation("sink closed"))
    }
}

#[test]
fn sink_error_stops_the_frame() {
    let mut stage = Stage::new();
    let first = stage.mount(Recorder::new(1.0));
    let second = stage.mount(Recorder::new(2.0));

    let err = stage.run_frame(&mut RejectingSink).unwrap_err();
    assert!(err.to_string().contains("sink closed"));
    assert!(first.view().last_now.is_some());
    assert!(second.view().last_now.is_none());
}
