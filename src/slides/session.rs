use std::time::Duration;

use crate::config::{BrightnessConfig, MotionConfig, SlideConfig};
use crate::foundation::core::{ContentList, NavigationIntent, Point, Viewport};
use crate::input::event::{InputDisposition, InputEvent, Key};
use crate::input::gesture::{ScrollPolicy, TouchGesture};
use crate::render::frame::{SlideFrame, TransitionFrame, ViewFrame};
use crate::runtime::stage::View;
use crate::slides::sampler::BrightnessSampler;

/// Transition phase of the slideshow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No transition running.
    Idle,
    /// Cross-fade between two slides.
    Transitioning {
        /// Outgoing slide.
        from: usize,
        /// Incoming slide, already the active one.
        to: usize,
        /// Logical time the transition began.
        started_at: Duration,
    },
}

/// Where a navigation request came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavSource {
    /// Auto-advance timer.
    AutoAdvance,
    /// Mouse wheel or trackpad.
    Wheel,
    /// Vertical or horizontal swipe.
    Touch,
    /// Arrow keys.
    Key,
    /// Click on a slide indicator.
    Indicator,
}

impl NavSource {
    /// Every source except the timer is a person interacting.
    pub fn is_manual(self) -> bool {
        !matches!(self, Self::AutoAdvance)
    }
}

/// Requested move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavRequest {
    /// Following slide, wrapping at the end.
    Next,
    /// Preceding slide, wrapping at the start.
    Prev,
    /// Specific slide.
    Goto(usize),
}

/// Why a request did not start a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Fewer than two slides.
    TooFewSlides,
    /// A transition is already running.
    InFlight,
    /// `Goto` past the end.
    OutOfRange,
    /// `Goto` the slide already shown.
    AlreadyActive,
    /// Wheel event inside the debounce window.
    Debounced,
    /// Wheel delta or swipe too small.
    BelowThreshold,
}

/// Result of a navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// A transition began.
    Started {
        /// Slide shown before the request.
        from: usize,
        /// Slide the transition moves to.
        to: usize,
    },
    /// Nothing changed.
    Rejected(Rejection),
}

impl NavOutcome {
    /// Return `true` when a transition began.
    pub fn is_started(self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

/// Premium slideshow state machine.
///
/// Time is the logical clock passed in by the caller. At most one transition runs at a time;
/// requests arriving while one is in flight are dropped, not queued. Any manual interaction
/// turns auto-advance off for the rest of the session.
#[derive(Debug)]
pub struct SlideSession {
    cfg: SlideConfig,
    brightness_cfg: BrightnessConfig,
    policy: ScrollPolicy,
    viewport: Viewport,
    content: ContentList,
    active: usize,
    phase: Phase,
    auto_advance: bool,
    timer_from: Duration,
    last_wheel: Option<Duration>,
    touch: TouchGesture<()>,
    sampler: Option<BrightnessSampler>,
    sample_since: Option<Duration>,
    dark: bool,
}

impl SlideSession {
    /// Start a session at `now` showing the first slide.
    pub fn new(
        cfg: &MotionConfig,
        content: ContentList,
        viewport: Viewport,
        now: Duration,
    ) -> Self {
        Self {
            cfg: cfg.slides.clone(),
            brightness_cfg: cfg.brightness.clone(),
            policy: ScrollPolicy::new(cfg.input.native_scroll_breakpoint),
            viewport,
            content,
            active: 0,
            phase: Phase::Idle,
            auto_advance: true,
            timer_from: now,
            last_wheel: None,
            touch: TouchGesture::new(),
            sampler: None,
            sample_since: None,
            dark: true,
        }
    }

    /// Attach a brightness sampler and sample the active slide.
    pub fn with_brightness(mut self, sampler: BrightnessSampler, now: Duration) -> Self {
        self.sampler = Some(sampler);
        self.request_sample(now);
        self
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Return `true` for a show without slides.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Active slide, `None` for an empty show.
    pub fn active_index(&self) -> Option<usize> {
        (!self.content.is_empty()).then_some(self.active)
    }

    /// Current transition phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Return `false` once a manual interaction has stopped the timer.
    pub fn auto_advance_enabled(&self) -> bool {
        self.auto_advance
    }

    /// Background classification of the active slide; dark until a sample says otherwise.
    pub fn is_dark_background(&self) -> bool {
        self.dark
    }

    /// Eased progress of the running transition, `None` when idle.
    pub fn transition_progress(&self, now: Duration) -> Option<f64> {
        let Phase::Transitioning { started_at, .. } = self.phase else {
            return None;
        };
        Some(
            self.cfg
                .ease
                .progress(now.saturating_sub(started_at), self.cfg.transition()),
        )
    }

    /// Intent to open the active slide's work.
    pub fn open_active(&self) -> Option<NavigationIntent> {
        let item = self.content.get(self.active)?;
        Some(NavigationIntent {
            content_id: item.id.clone(),
        })
    }

    /// Handle one navigation request.
    pub fn navigate(
        &mut self,
        request: NavRequest,
        source: NavSource,
        now: Duration,
    ) -> NavOutcome {
        if source.is_manual() {
            self.latch_manual(source);
        }
        self.settle(now);

        let len = self.content.len();
        if len <= 1 {
            return self.reject(request, source, Rejection::TooFewSlides);
        }
        if let Phase::Transitioning { .. } = self.phase {
            return self.reject(request, source, Rejection::InFlight);
        }
        let to = match request {
            NavRequest::Next => (self.active + 1) % len,
            NavRequest::Prev => (self.active + len - 1) % len,
            NavRequest::Goto(i) if i >= len => {
                return self.reject(request, source, Rejection::OutOfRange);
            }
            NavRequest::Goto(i) if i == self.active => {
                return self.reject(request, source, Rejection::AlreadyActive);
            }
            NavRequest::Goto(i) => i,
        };

        let from = self.active;
        self.active = to;
        self.phase = Phase::Transitioning {
            from,
            to,
            started_at: now,
        };
        tracing::debug!(from, to, ?source, "slide transition started");
        self.request_sample(now);
        NavOutcome::Started { from, to }
    }

    /// Wheel navigation: noise filtered, then debounced; positive deltas go forward.
    pub fn wheel(&mut self, delta_y: f64, now: Duration) -> NavOutcome {
        self.latch_manual(NavSource::Wheel);
        if !delta_y.is_finite() || delta_y.abs() < self.cfg.wheel_min_delta {
            return NavOutcome::Rejected(Rejection::BelowThreshold);
        }
        if let Some(last) = self.last_wheel
            && now.saturating_sub(last) < self.cfg.wheel_debounce()
        {
            return NavOutcome::Rejected(Rejection::Debounced);
        }
        self.last_wheel = Some(now);
        let request = if delta_y > 0.0 {
            NavRequest::Next
        } else {
            NavRequest::Prev
        };
        self.navigate(request, NavSource::Wheel, now)
    }

    /// Finger down.
    pub fn touch_start(&mut self, at: Point) {
        self.latch_manual(NavSource::Touch);
        self.touch.begin(at, ());
    }

    /// Finger up: a long enough swipe up or left goes forward.
    pub fn touch_end(&mut self, at: Point, now: Duration) -> NavOutcome {
        self.latch_manual(NavSource::Touch);
        let Some(travel) = self.touch.end(at) else {
            return NavOutcome::Rejected(Rejection::BelowThreshold);
        };
        let along = if travel.y.abs() >= travel.x.abs() {
            travel.y
        } else {
            travel.x
        };
        if along.abs() < self.cfg.swipe_min_distance {
            return NavOutcome::Rejected(Rejection::BelowThreshold);
        }
        let request = if along > 0.0 {
            NavRequest::Next
        } else {
            NavRequest::Prev
        };
        self.navigate(request, NavSource::Touch, now)
    }

    /// Arrow keys; other keys are not navigation.
    pub fn key(&mut self, key: Key, now: Duration) -> Option<NavOutcome> {
        let request = match key {
            Key::ArrowDown | Key::ArrowRight => NavRequest::Next,
            Key::ArrowUp | Key::ArrowLeft => NavRequest::Prev,
            Key::Other => return None,
        };
        Some(self.navigate(request, NavSource::Key, now))
    }

    /// Indicator dot selection.
    pub fn select(&mut self, index: usize, now: Duration) -> NavOutcome {
        self.navigate(NavRequest::Goto(index), NavSource::Indicator, now)
    }

    /// Advance the clock: finish the running transition, fire auto-advance, apply samples.
    pub fn advance_clock(&mut self, now: Duration) {
        self.settle(now);

        let interval = self.cfg.auto_advance();
        if self.auto_advance
            && !interval.is_zero()
            && now.saturating_sub(self.timer_from) >= interval
        {
            self.timer_from = now;
            let outcome = self.navigate(NavRequest::Next, NavSource::AutoAdvance, now);
            tracing::debug!(?outcome, "auto-advance tick");
        }

        self.poll_brightness(now);
    }

    /// Snapshot for the host.
    pub fn frame(&self, now: Duration) -> SlideFrame {
        let transition = match self.phase {
            Phase::Transitioning { from, to, .. } => Some(TransitionFrame {
                from,
                to,
                progress: self.transition_progress(now).unwrap_or(1.0),
            }),
            Phase::Idle => None,
        };
        SlideFrame {
            active_index: self.active_index(),
            transition,
            dark_background: self.dark,
            auto_advance: self.auto_advance,
        }
    }

    fn settle(&mut self, now: Duration) {
        if let Phase::Transitioning { from, to, started_at } = self.phase
            && now.saturating_sub(started_at) >= self.cfg.transition()
        {
            self.phase = Phase::Idle;
            tracing::debug!(from, to, "slide transition finished");
        }
    }

    fn latch_manual(&mut self, source: NavSource) {
        if self.auto_advance {
            self.auto_advance = false;
            tracing::debug!(?source, "auto-advance disabled by manual input");
        }
    }

    fn reject(&self, request: NavRequest, source: NavSource, why: Rejection) -> NavOutcome {
        tracing::debug!(?request, ?source, ?why, "slide navigation rejected");
        NavOutcome::Rejected(why)
    }

    fn request_sample(&mut self, now: Duration) {
        let Some(sampler) = self.sampler.as_mut() else {
            return;
        };
        let Some(item) = self.content.get(self.active) else {
            return;
        };
        sampler.request(&item.image_url);
        self.sample_since = Some(now);
    }

    fn poll_brightness(&mut self, now: Duration) {
        let Some(sampler) = self.sampler.as_mut() else {
            return;
        };
        if let Some(b) = sampler.poll() {
            self.dark = b.dark;
            self.sample_since = None;
            return;
        }
        if let Some(since) = self.sample_since
            && now.saturating_sub(since) >= self.brightness_cfg.timeout()
        {
            tracing::warn!(
                generation = sampler.generation(),
                "brightness sample overdue; assuming dark"
            );
            self.dark = true;
            self.sample_since = None;
        }
    }
}

impl View for SlideSession {
    fn on_frame(&mut self, now: Duration) -> Option<ViewFrame> {
        self.advance_clock(now);
        Some(ViewFrame::Slides(self.frame(now)))
    }

    fn on_input(&mut self, event: &InputEvent, now: Duration) -> InputDisposition {
        let owns_scrolling = self.policy.owns_scrolling(self.viewport);
        match *event {
            InputEvent::Wheel { delta_y, .. } if owns_scrolling => {
                self.wheel(delta_y, now);
                InputDisposition::Consumed
            }
            InputEvent::TouchStart { at } if owns_scrolling => {
                self.touch_start(at);
                InputDisposition::Consumed
            }
            InputEvent::TouchEnd { at } if owns_scrolling => {
                self.touch_end(at, now);
                InputDisposition::Consumed
            }
            InputEvent::TouchMove { .. } if owns_scrolling => InputDisposition::Consumed,
            InputEvent::Wheel { .. }
            | InputEvent::TouchStart { .. }
            | InputEvent::TouchMove { .. }
            | InputEvent::TouchEnd { .. } => InputDisposition::Passthrough,
            InputEvent::Key { key } => match self.key(key, now) {
                Some(_) => InputDisposition::Consumed,
                None => InputDisposition::Ignored,
            },
            InputEvent::Activate { index } => {
                self.select(index, now);
                InputDisposition::Consumed
            }
            InputEvent::Resize { viewport } => {
                self.viewport = viewport;
                InputDisposition::Ignored
            }
            InputEvent::PointerDown { .. }
            | InputEvent::PointerMove { .. }
            | InputEvent::PointerUp { .. } => InputDisposition::Ignored,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/slides/session.rs"]
mod tests;
