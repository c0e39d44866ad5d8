use crate::foundation::core::{Point, Size, Vec2};

/// Per-item effect written by the virtual scroller.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollItemFrame {
    /// Index into the scroller's item list.
    pub index: usize,
    /// Horizontal bow offset in pixels.
    pub curve_x: f64,
    /// Vertical skew in degrees.
    pub skew_deg: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

/// One frame of the About page scroller.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScrollFrame {
    /// Vertical translation of the content container (`-current`).
    pub content_offset_y: f64,
    /// Smoothed offset.
    pub current: f64,
    /// Raw clamped target.
    pub target: f64,
    /// Upper bound of the target.
    pub max_scroll: f64,
    /// Effects for items inside the visibility margin, in item order.
    pub items: Vec<ScrollItemFrame>,
}

/// Placement of one replicated grid item.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GridItemFrame {
    /// Index into the grid's item list.
    pub index: usize,
    /// Index of the content record shown by this item.
    pub content_index: usize,
    /// Top-left corner in viewport space.
    pub position: Point,
    /// Rendered size.
    pub size: Size,
    /// Image-only zoom.
    pub image_scale: f64,
    /// Image-only counter-parallax translation.
    pub image_offset: Vec2,
    /// Caption reveal latch.
    pub caption_visible: bool,
}

/// One frame of the infinite work grid.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GridFrame {
    /// Smoothed scroll offset.
    pub offset: Vec2,
    /// `true` while a pointer drag is in progress (grab cursor).
    pub dragging: bool,
    /// Every item, in layout order.
    pub items: Vec<GridItemFrame>,
}

/// In-flight slide transition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TransitionFrame {
    /// Outgoing slide.
    pub from: usize,
    /// Incoming slide.
    pub to: usize,
    /// Eased progress in `[0, 1]`.
    pub progress: f64,
}

/// One frame of the slideshow.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SlideFrame {
    /// Active slide, `None` for an empty show.
    pub active_index: Option<usize>,
    /// Transition in flight, if any.
    pub transition: Option<TransitionFrame>,
    /// Background luminance classification of the active slide.
    pub dark_background: bool,
    /// Whether the timer may still advance slides.
    pub auto_advance: bool,
}

/// Anything a mounted view emits on a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewFrame {
    /// About page scroller.
    Scroll(ScrollFrame),
    /// Infinite work grid.
    Grid(GridFrame),
    /// Slideshow.
    Slides(SlideFrame),
}
