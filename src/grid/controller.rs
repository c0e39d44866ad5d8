use std::time::Duration;

use crate::animation::smooth::Smoothed;
use crate::config::{GridConfig, MotionConfig};
use crate::foundation::core::{ContentList, NavigationIntent, Point, Size, Vec2, Viewport};
use crate::foundation::math::{Rng64, periods_to_cover};
use crate::grid::layout::{GridItem, GridLayout, build_layout};
use crate::input::event::{InputDisposition, InputEvent};
use crate::input::gesture::{DragGesture, TouchGesture, wheel_step};
use crate::render::frame::{GridFrame, GridItemFrame, ViewFrame};
use crate::runtime::stage::View;

/// Drag-and-drift parallax canvas behind the work index.
///
/// The scroll offset is unbounded; items stay on screen by jumping whole periods of the
/// replicated field whenever they leave the viewport on the trailing edge.
#[derive(Debug)]
pub struct InfiniteGrid {
    cfg: GridConfig,
    content: ContentList,
    viewport: Viewport,
    layout: GridLayout,
    rng: Rng64,
    scroll: Smoothed<Vec2>,
    pointer: Smoothed<Vec2>,
    press: Smoothed<f64>,
    drag: DragGesture,
    touch: TouchGesture<Vec2>,
    intents: Vec<NavigationIntent>,
}

impl InfiniteGrid {
    /// Mount the grid for `content`.
    pub fn new(cfg: &MotionConfig, content: ContentList, viewport: Viewport) -> Self {
        let grid_cfg = cfg.grid.clone();
        let mut rng = match grid_cfg.seed {
            Some(seed) => Rng64::new(seed),
            None => Rng64::from_entropy(),
        };
        let layout = build_layout(content.len(), viewport, &grid_cfg, &mut rng);
        Self {
            scroll: Smoothed::new(Vec2::ZERO, grid_cfg.scroll_smoothing),
            pointer: Smoothed::new(Vec2::new(0.5, 0.5), grid_cfg.pointer_smoothing),
            press: Smoothed::new(0.0, grid_cfg.pointer_smoothing),
            drag: DragGesture::new(grid_cfg.drag_threshold),
            touch: TouchGesture::new(),
            intents: Vec::new(),
            cfg: grid_cfg,
            content,
            viewport,
            layout,
            rng,
        }
    }

    /// Current item set.
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Smoothed scroll offset.
    pub fn offset(&self) -> Vec2 {
        self.scroll.current()
    }

    /// Raw scroll target.
    pub fn target(&self) -> Vec2 {
        self.scroll.target()
    }

    /// Return `true` while a pointer drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Navigation intents emitted since the last call.
    pub fn take_intents(&mut self) -> Vec<NavigationIntent> {
        std::mem::take(&mut self.intents)
    }

    /// Apply a viewport change; the item set is rebuilt from scratch.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.rebuild();
    }

    /// Replace the content list; the item set is rebuilt from scratch.
    pub fn set_content(&mut self, content: ContentList) {
        self.content = content;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.layout = build_layout(self.content.len(), self.viewport, &self.cfg, &mut self.rng);
        self.settle_wraps();
    }

    /// Give fresh items the wrap that puts them in the period starting at the viewport's
    /// leading edge, whatever the accumulated offset is.
    fn settle_wraps(&mut self) {
        let period = self.layout.period;
        let offset = self.scroll.current();
        for item in &mut self.layout.items {
            let right = item.base.x + offset.x + item.size.width;
            let bottom = item.base.y + offset.y + item.size.height;
            item.wrap = Vec2::new(
                -(right / period.width).floor() * period.width,
                -(bottom / period.height).floor() * period.height,
            );
        }
    }

    /// Wheel pans the canvas; scrolling down moves content up.
    pub fn wheel(&mut self, delta_x: f64, delta_y: f64) -> InputDisposition {
        let step = Vec2::new(
            wheel_step(delta_x, self.cfg.wheel_speed),
            wheel_step(delta_y, self.cfg.wheel_speed),
        );
        self.scroll.set_target(self.scroll.target() - step);
        InputDisposition::Consumed
    }

    /// Primary button down.
    pub fn pointer_down(&mut self, at: Point) -> InputDisposition {
        self.drag.press(at, self.scroll.target());
        InputDisposition::Consumed
    }

    /// Pointer moved; updates the parallax ratio and, while latched, the drag target.
    pub fn pointer_move(&mut self, at: Point) -> InputDisposition {
        if self.viewport.width > 0.0 && self.viewport.height > 0.0 {
            self.pointer.set_target(Vec2::new(
                (at.x / self.viewport.width).clamp(0.0, 1.0),
                (at.y / self.viewport.height).clamp(0.0, 1.0),
            ));
        }
        match self.drag.drag(at, self.cfg.drag_speed) {
            Some(target) => {
                self.scroll.set_target(target);
                InputDisposition::Consumed
            }
            None => InputDisposition::Ignored,
        }
    }

    /// Primary button up.
    pub fn pointer_up(&mut self) -> InputDisposition {
        self.drag.release();
        InputDisposition::Consumed
    }

    /// Touch pans the canvas with the finger.
    pub fn touch_start(&mut self, at: Point) -> InputDisposition {
        self.touch.begin(at, self.scroll.target());
        InputDisposition::Consumed
    }

    /// Touch moved.
    pub fn touch_move(&mut self, at: Point) -> InputDisposition {
        let Some((travel, baseline)) = self.touch.travel(at) else {
            return InputDisposition::Ignored;
        };
        self.scroll.set_target(baseline - travel * self.cfg.drag_speed);
        InputDisposition::Consumed
    }

    /// Touch lifted.
    pub fn touch_end(&mut self, at: Point) -> InputDisposition {
        match self.touch.end(at) {
            Some(_) => InputDisposition::Consumed,
            None => InputDisposition::Ignored,
        }
    }

    /// Click on item `index`. Suppressed when the click ends a drag.
    pub fn activate(&mut self, index: usize) -> Option<NavigationIntent> {
        if self.drag.was_dragging() {
            tracing::debug!(index, "click after drag suppressed");
            return None;
        }
        let item = self.layout.items.get(index)?;
        let content = self.content.get(item.content_index)?;
        let intent = NavigationIntent {
            content_id: content.id.clone(),
        };
        self.intents.push(intent.clone());
        Some(intent)
    }

    /// Advance one frame.
    pub fn tick(&mut self) -> GridFrame {
        self.scroll.set_target(self.scroll.target() + self.cfg.drift);
        let prev = self.scroll.current();
        let offset = self.scroll.tick();
        let lag = self.scroll.lag();
        let direction = offset - prev;

        let pointer = self.pointer.tick();
        self.press.set_target(if self.drag.is_pressed() { 1.0 } else { 0.0 });
        let press = self.press.tick();

        let ctx = FrameCtx {
            offset,
            lag,
            direction,
            pointer,
            press,
            viewport: self.viewport.size(),
            period: self.layout.period,
        };

        let items = self
            .layout
            .items
            .iter_mut()
            .enumerate()
            .map(|(index, item)| place_item(&self.cfg, &ctx, index, item))
            .collect();

        GridFrame {
            offset,
            dragging: self.drag.is_dragging(),
            items,
        }
    }
}

/// Per-frame values shared by every item.
struct FrameCtx {
    offset: Vec2,
    lag: Vec2,
    direction: Vec2,
    pointer: Vec2,
    press: f64,
    viewport: Size,
    period: Size,
}

fn render_position(item: &GridItem, offset: Vec2, parallax: Vec2) -> Point {
    item.base + offset + item.wrap + parallax
}

fn place_item(
    cfg: &GridConfig,
    ctx: &FrameCtx,
    index: usize,
    item: &mut GridItem,
) -> GridItemFrame {
    let centered = ctx.pointer - Vec2::new(0.5, 0.5);
    let parallax = ctx.lag * item.ease
        + Vec2::new(
            centered.x * item.size.width * cfg.parallax_strength,
            centered.y * item.size.height * cfg.parallax_strength,
        );

    let pos = render_position(item, ctx.offset, parallax);
    item.wrap.x += wrap_axis(
        pos.x,
        item.size.width,
        ctx.viewport.width,
        ctx.direction.x,
        ctx.period.width,
    );
    item.wrap.y += wrap_axis(
        pos.y,
        item.size.height,
        ctx.viewport.height,
        ctx.direction.y,
        ctx.period.height,
    );
    let pos = render_position(item, ctx.offset, parallax);

    let on_screen = pos.x < ctx.viewport.width
        && pos.x + item.size.width > 0.0
        && pos.y < ctx.viewport.height
        && pos.y + item.size.height > 0.0;
    if on_screen && !item.caption_revealed {
        item.caption_revealed = true;
    }

    GridItemFrame {
        index,
        content_index: item.content_index,
        position: pos,
        size: item.size,
        image_scale: 1.0 + cfg.image_zoom - ctx.press * cfg.press_zoom,
        image_offset: Vec2::new(
            -centered.x * item.size.width * cfg.image_counter_parallax,
            -centered.y * item.size.height * cfg.image_counter_parallax,
        ),
        caption_visible: item.caption_revealed,
    }
}

/// Wrap correction along one axis for an item spanning `[pos, pos + extent]`.
///
/// Only the trailing edge of the current direction of travel is checked, so an item sitting
/// just outside the leading edge is never bounced back and forth. Items that ease-weighted lag
/// carried more than a full period away on either side are pulled back regardless.
fn wrap_axis(pos: f64, extent: f64, viewport: f64, direction: f64, period: f64) -> f64 {
    let trailing = if direction < 0.0 {
        periods_to_cover(-(pos + extent), period) * period
    } else if direction > 0.0 {
        -periods_to_cover(pos - viewport, period) * period
    } else {
        0.0
    };
    let pos = pos + trailing;
    let guard = periods_to_cover(-period - pos, period) * period
        - periods_to_cover(pos - (viewport + period), period) * period;
    trailing + guard
}

impl View for InfiniteGrid {
    fn on_frame(&mut self, _now: Duration) -> Option<ViewFrame> {
        Some(ViewFrame::Grid(self.tick()))
    }

    fn on_input(&mut self, event: &InputEvent, _now: Duration) -> InputDisposition {
        match *event {
            InputEvent::Wheel { delta_x, delta_y } => self.wheel(delta_x, delta_y),
            InputEvent::PointerDown { at } => self.pointer_down(at),
            InputEvent::PointerMove { at } => self.pointer_move(at),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::TouchStart { at } => self.touch_start(at),
            InputEvent::TouchMove { at } => self.touch_move(at),
            InputEvent::TouchEnd { at } => self.touch_end(at),
            InputEvent::Activate { index } => match self.activate(index) {
                Some(_) => InputDisposition::Consumed,
                None => InputDisposition::Ignored,
            },
            InputEvent::Resize { viewport } => {
                self.resize(viewport);
                InputDisposition::Ignored
            }
            InputEvent::Key { .. } => InputDisposition::Ignored,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/controller.rs"]
mod tests;
