use std::cell::{Ref, RefCell, RefMut};
use std::convert::Infallible;
use std::rc::Rc;
use std::time::Duration;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{VitrineError, VitrineResult};
use crate::input::event::{InputDisposition, InputEvent};
use crate::render::frame::ViewFrame;
use crate::render::sink::FrameSink;
use crate::runtime::registry::{Registry, Subscription, ViewCell};

/// Default frame interval (60 Hz).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// A controller mounted on a [`Stage`].
///
/// `now` is the stage's logical clock; controllers never read wall time.
pub trait View {
    /// Advance one frame. `None` means nothing to draw this frame.
    fn on_frame(&mut self, now: Duration) -> Option<ViewFrame>;

    /// React to one host input event.
    fn on_input(&mut self, event: &InputEvent, now: Duration) -> InputDisposition;
}

/// Per-frame callbacks, ticked in mount order.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    registry: Registry,
}

impl FrameScheduler {
    pub(crate) fn register(&mut self, view: &ViewCell) -> Subscription {
        self.registry.register(view)
    }

    /// Number of live frame loops.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Return `true` when no frame loop is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tick every live loop and push the produced frames.
    pub fn tick(
        &mut self,
        idx: FrameIndex,
        now: Duration,
        sink: &mut dyn FrameSink,
    ) -> VitrineResult<usize> {
        let mut pushed = 0;
        self.registry.for_each_live::<VitrineError>(|_, view| {
            if let Some(frame) = view.on_frame(now) {
                sink.push_frame(idx, &frame)?;
                pushed += 1;
            }
            Ok(())
        })?;
        Ok(pushed)
    }
}

/// Input listeners, dispatched in mount order.
#[derive(Debug, Default)]
pub struct InputRouter {
    registry: Registry,
}

impl InputRouter {
    pub(crate) fn register(&mut self, view: &ViewCell) -> Subscription {
        self.registry.register(view)
    }

    /// Number of live listeners.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Return `true` when no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `event` to every live listener and merge their answers.
    pub fn dispatch(&mut self, event: &InputEvent, now: Duration) -> InputDisposition {
        let mut out = InputDisposition::Ignored;
        let Ok(()) = self.registry.for_each_live::<Infallible>(|_, view| {
            out = out.merge(view.on_input(event, now));
            Ok(())
        });
        out
    }
}

/// Owner of every mounted controller's frame loop and listeners.
#[derive(Debug)]
pub struct Stage {
    frames: FrameScheduler,
    input: InputRouter,
    clock: Duration,
    interval: Duration,
    next_frame: u64,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage {
    /// Stage ticking at [`DEFAULT_FRAME_INTERVAL`].
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL)
    }

    /// Stage with a custom frame interval.
    pub fn with_frame_interval(interval: Duration) -> Self {
        Self {
            frames: FrameScheduler::default(),
            input: InputRouter::default(),
            clock: Duration::ZERO,
            interval,
            next_frame: 0,
        }
    }

    /// Logical time.
    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Move the clock forward without running a frame.
    pub fn advance(&mut self, dt: Duration) {
        self.clock += dt;
    }

    /// Index the next [`Stage::run_frame`] will use.
    pub fn next_frame_index(&self) -> FrameIndex {
        FrameIndex(self.next_frame)
    }

    /// Number of mounted views that still have a live frame loop.
    pub fn mounted(&self) -> usize {
        self.frames.len()
    }

    /// Mount a controller: register its frame loop and its input listener.
    pub fn mount<C: View + 'static>(&mut self, view: C) -> MountedView<C> {
        let cell = Rc::new(RefCell::new(view));
        let shared: ViewCell = cell.clone();
        let frame = self.frames.register(&shared);
        let input = self.input.register(&shared);
        tracing::debug!(frame = frame.id(), input = input.id(), "view mounted");
        MountedView {
            view: cell,
            _frame: frame,
            _input: input,
        }
    }

    /// Route one input event. Returns [`InputDisposition::Consumed`] when the host should
    /// suppress the native default.
    pub fn dispatch(&mut self, event: &InputEvent) -> InputDisposition {
        self.input.dispatch(event, self.clock)
    }

    /// Run one frame at the current clock, then advance the clock by one interval.
    pub fn run_frame(&mut self, sink: &mut dyn FrameSink) -> VitrineResult<FrameIndex> {
        let idx = FrameIndex(self.next_frame);
        self.next_frame += 1;
        let now = self.clock;
        self.clock += self.interval;
        self.frames.tick(idx, now, sink)?;
        Ok(idx)
    }
}

/// Handle to a mounted controller. Dropping it unmounts and frees the controller.
#[derive(Debug)]
pub struct MountedView<C> {
    view: Rc<RefCell<C>>,
    _frame: Subscription,
    _input: Subscription,
}

impl<C> MountedView<C> {
    /// Borrow the controller.
    pub fn view(&self) -> Ref<'_, C> {
        self.view.borrow()
    }

    /// Mutably borrow the controller.
    pub fn view_mut(&self) -> RefMut<'_, C> {
        self.view.borrow_mut()
    }

    /// Unregister the frame loop and listener.
    pub fn unmount(self) {}
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/stage.rs"]
mod tests;
