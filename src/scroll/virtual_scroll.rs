use std::f64::consts::PI;
use std::time::Duration;

use crate::animation::smooth::smooth;
use crate::config::{MotionConfig, ScrollConfig};
use crate::foundation::core::{Point, Rect, Viewport};
use crate::input::event::{InputDisposition, InputEvent};
use crate::input::gesture::{ScrollPolicy, TouchGesture, wheel_step};
use crate::render::frame::{ScrollFrame, ScrollItemFrame, ViewFrame};
use crate::runtime::stage::View;

/// Lag below which the scroller counts as idle.
const IDLE_EPSILON: f64 = 0.01;

/// Scalar scroll state of the About page.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ScrollState {
    /// Smoothed offset in pixels.
    pub current: f64,
    /// Raw target, always inside `[0, max_scroll]`.
    pub target: f64,
    /// `target - current` after the last tick.
    pub delta: f64,
    /// `current` before the last tick.
    pub last: f64,
    /// Largest reachable offset.
    pub max_scroll: f64,
}

/// Virtual scroller that replaces native scrolling on wide viewports.
///
/// Items are laid out by the host in content space (`y` grows downward from the top of the
/// content); the scroller translates the container and bends visible items by the scroll lag.
#[derive(Debug)]
pub struct VirtualScroll {
    cfg: ScrollConfig,
    policy: ScrollPolicy,
    viewport: Viewport,
    content_height: f64,
    items: Vec<Rect>,
    state: ScrollState,
    touch: TouchGesture<f64>,
}

impl VirtualScroll {
    /// Mount a scroller for measured content.
    pub fn new(
        cfg: &MotionConfig,
        viewport: Viewport,
        content_height: f64,
        items: Vec<Rect>,
    ) -> Self {
        let mut scroll = Self {
            cfg: cfg.scroll.clone(),
            policy: ScrollPolicy::new(cfg.input.native_scroll_breakpoint),
            viewport,
            content_height: content_height.max(0.0),
            items,
            state: ScrollState::default(),
            touch: TouchGesture::new(),
        };
        scroll.state.max_scroll = scroll.compute_max_scroll();
        scroll
    }

    /// Current state snapshot.
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Return `true` when the smoothed offset has caught up with the target.
    pub fn is_idle(&self) -> bool {
        (self.state.target - self.state.current).abs() < IDLE_EPSILON
    }

    /// Return `true` when the scroller replaces native scrolling for the current viewport.
    pub fn is_active(&self) -> bool {
        self.policy.owns_scrolling(self.viewport)
    }

    fn compute_max_scroll(&self) -> f64 {
        if self.content_height <= self.viewport.height {
            return 0.0;
        }
        self.content_height - self.viewport.height + self.cfg.end_padding
    }

    fn set_target(&mut self, raw: f64) {
        let raw = if raw.is_finite() { raw } else { self.state.target };
        self.state.target = raw.clamp(0.0, self.state.max_scroll);
    }

    /// Apply a viewport change. Scroll position resets to the top.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reset();
    }

    /// Replace the measured content. Scroll position resets to the top.
    pub fn relayout(&mut self, content_height: f64, items: Vec<Rect>) {
        self.content_height = content_height.max(0.0);
        self.items = items;
        self.reset();
    }

    fn reset(&mut self) {
        self.touch = TouchGesture::new();
        self.state = ScrollState {
            max_scroll: self.compute_max_scroll(),
            ..ScrollState::default()
        };
        tracing::debug!(max_scroll = self.state.max_scroll, "virtual scroll reset");
    }

    /// Wheel input; returns whether the native default must be suppressed.
    pub fn wheel(&mut self, delta_y: f64) -> InputDisposition {
        if !self.is_active() {
            return InputDisposition::Passthrough;
        }
        self.set_target(self.state.target + wheel_step(delta_y, self.cfg.wheel_speed));
        InputDisposition::Consumed
    }

    /// Touch start at vertical position `y`.
    pub fn touch_start(&mut self, y: f64) -> InputDisposition {
        if !self.is_active() {
            return InputDisposition::Passthrough;
        }
        self.touch.begin(Point::new(0.0, y), self.state.target);
        InputDisposition::Consumed
    }

    /// Touch move to vertical position `y`.
    pub fn touch_move(&mut self, y: f64) -> InputDisposition {
        if !self.is_active() {
            return InputDisposition::Passthrough;
        }
        let Some((travel, baseline)) = self.touch.travel(Point::new(0.0, y)) else {
            return InputDisposition::Ignored;
        };
        self.set_target(baseline + travel.y * self.cfg.touch_sensitivity);
        InputDisposition::Consumed
    }

    /// Touch end.
    pub fn touch_end(&mut self, y: f64) -> InputDisposition {
        match self.touch.end(Point::new(0.0, y)) {
            Some(_) => InputDisposition::Consumed,
            None if self.is_active() => InputDisposition::Ignored,
            None => InputDisposition::Passthrough,
        }
    }

    /// Advance one frame.
    pub fn tick(&mut self) -> ScrollFrame {
        let s = &mut self.state;
        s.last = s.current;
        s.current = smooth(&s.current, &s.target, self.cfg.smoothing);
        s.delta = s.target - s.current;

        let items = self.item_effects();
        ScrollFrame {
            content_offset_y: -self.state.current,
            current: self.state.current,
            target: self.state.target,
            max_scroll: self.state.max_scroll,
            items,
        }
    }

    fn item_effects(&self) -> Vec<ScrollItemFrame> {
        let vh = self.viewport.height;
        let margin = self.cfg.visibility_margin;
        let delta = self.state.delta;

        let skew = (delta * self.cfg.skew_coefficient)
            .clamp(-self.cfg.max_skew_deg, self.cfg.max_skew_deg);
        let opacity = 1.0 - (delta.abs() * self.cfg.fade_sensitivity).min(self.cfg.max_fade);

        self.items
            .iter()
            .enumerate()
            .filter_map(|(index, rect)| {
                let top = rect.y0 - self.state.current;
                let height = rect.height();
                if top + height < -margin || top > vh + margin {
                    return None;
                }
                let progress = if vh > 0.0 {
                    ((top + height / 2.0) / vh).clamp(0.0, 1.0)
                } else {
                    0.5
                };
                Some(ScrollItemFrame {
                    index,
                    curve_x: (progress * PI).sin() * delta * self.cfg.curve_coefficient,
                    skew_deg: skew,
                    opacity,
                })
            })
            .collect()
    }
}

impl View for VirtualScroll {
    fn on_frame(&mut self, _now: Duration) -> Option<ViewFrame> {
        Some(ViewFrame::Scroll(self.tick()))
    }

    fn on_input(&mut self, event: &InputEvent, _now: Duration) -> InputDisposition {
        match *event {
            InputEvent::Wheel { delta_y, .. } => self.wheel(delta_y),
            InputEvent::TouchStart { at } => self.touch_start(at.y),
            InputEvent::TouchMove { at } => self.touch_move(at.y),
            InputEvent::TouchEnd { at } => self.touch_end(at.y),
            InputEvent::Resize { viewport } => {
                self.resize(viewport);
                InputDisposition::Ignored
            }
            _ => InputDisposition::Ignored,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/virtual_scroll.rs"]
mod tests;
