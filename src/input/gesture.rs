use crate::foundation::core::{Point, Vec2, Viewport};

/// Decides whether a full-viewport controller owns scrolling for a viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollPolicy {
    breakpoint: f64,
}

impl ScrollPolicy {
    /// Controllers are active at or above `breakpoint` logical pixels of width.
    pub fn new(breakpoint: f64) -> Self {
        Self { breakpoint }
    }

    /// Return `true` when the controller replaces native scrolling.
    pub fn owns_scrolling(self, viewport: Viewport) -> bool {
        !viewport.is_narrow(self.breakpoint)
    }
}

/// Wheel delta scaled into target units.
pub fn wheel_step(delta: f64, speed: f64) -> f64 {
    if delta.is_finite() { delta * speed } else { 0.0 }
}

/// Touch drag tracked from its start point.
///
/// Targets are recomputed from the gesture origin on every move so coalesced touch events
/// cannot accumulate drift.
#[derive(Clone, Copy, Debug, Default)]
pub struct TouchGesture<T> {
    origin: Option<(Point, T)>,
}

impl<T: Copy> TouchGesture<T> {
    /// Idle gesture.
    pub fn new() -> Self {
        Self { origin: None }
    }

    /// Record the touch origin and the target at gesture start.
    pub fn begin(&mut self, at: Point, baseline: T) {
        self.origin = Some((at, baseline));
    }

    /// Travel since the start (`start - current`, positive when swiping up/left) and the
    /// baseline target, or `None` when no gesture is active.
    pub fn travel(&self, at: Point) -> Option<(Vec2, T)> {
        self.origin.map(|(start, baseline)| (start - at, baseline))
    }

    /// Finish the gesture, returning the total travel.
    pub fn end(&mut self, at: Point) -> Option<Vec2> {
        self.origin.take().map(|(start, _)| start - at)
    }

    /// Return `true` while a finger is down.
    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }
}

/// Pointer drag on the grid canvas.
///
/// `was_dragging` outlives the release so that the click which follows a drag can be
/// recognized and suppressed.
#[derive(Clone, Copy, Debug)]
pub struct DragGesture {
    origin: Option<(Point, Vec2)>,
    was_dragging: bool,
    threshold: f64,
}

impl DragGesture {
    /// Idle gesture; travel beyond `threshold` pixels turns a press into a drag.
    pub fn new(threshold: f64) -> Self {
        Self {
            origin: None,
            was_dragging: false,
            threshold,
        }
    }

    /// Latch drag mode.
    pub fn press(&mut self, at: Point, target: Vec2) {
        self.origin = Some((at, target));
        self.was_dragging = false;
    }

    /// New absolute target while latched, `None` otherwise.
    pub fn drag(&mut self, at: Point, speed: f64) -> Option<Vec2> {
        let (start, start_target) = self.origin?;
        let moved = at - start;
        if moved.hypot() > self.threshold {
            self.was_dragging = true;
        }
        Some(start_target + moved * speed)
    }

    /// Unlatch drag mode.
    pub fn release(&mut self) {
        self.origin = None;
    }

    /// Return `true` while the button is held.
    pub fn is_pressed(&self) -> bool {
        self.origin.is_some()
    }

    /// Return `true` while a real drag is in progress (cursor styling).
    pub fn is_dragging(&self) -> bool {
        self.origin.is_some() && self.was_dragging
    }

    /// Return `true` when the last press travelled far enough to be a drag.
    pub fn was_dragging(&self) -> bool {
        self.was_dragging
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/gesture.rs"]
mod tests;
