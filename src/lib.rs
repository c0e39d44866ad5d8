//! Vitrine is the motion core of a portfolio front end.
//!
//! It owns the per-frame state of three views and emits frames a host applies to its own
//! scene graph:
//!
//! - [`VirtualScroll`]: smoothed, clamped vertical scroller with lag-driven item effects
//! - [`InfiniteGrid`]: drifting, draggable parallax canvas that wraps toroidally
//! - [`SlideSession`]: single-flight slideshow with auto-advance and brightness sampling
//!
//! Controllers are mounted on a [`Stage`], which drives their frame loops on a logical clock
//! and routes input; dropping the returned [`MountedView`] unmounts the controller.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod grid;
pub(crate) mod input;
pub(crate) mod render;
pub(crate) mod runtime;
pub(crate) mod scroll;
pub(crate) mod slides;

pub use crate::foundation::core::{
    ContentItem, ContentList, FrameIndex, NavigationIntent, Point, Rect, Size, Vec2, Viewport,
    content_from_json,
};
pub use crate::foundation::error::{VitrineError, VitrineResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::smooth::{Lerp, Smoothed, smooth};
pub use crate::config::{
    BrightnessConfig, GridConfig, InputConfig, MotionConfig, ScrollConfig, SlideConfig,
};
pub use crate::grid::controller::InfiniteGrid;
pub use crate::grid::layout::{GridItem, GridLayout, SLOT_COUNT};
pub use crate::input::event::{InputDisposition, InputEvent, Key};
pub use crate::input::gesture::{DragGesture, ScrollPolicy, TouchGesture, wheel_step};
pub use crate::render::frame::{
    GridFrame, GridItemFrame, ScrollFrame, ScrollItemFrame, SlideFrame, TransitionFrame,
    ViewFrame,
};
pub use crate::render::sink::{FrameSink, InMemorySink, JsonLinesSink};
pub use crate::runtime::registry::{SubId, Subscription};
pub use crate::runtime::stage::{
    DEFAULT_FRAME_INTERVAL, FrameScheduler, InputRouter, MountedView, Stage, View,
};
pub use crate::scroll::virtual_scroll::{ScrollState, VirtualScroll};
pub use crate::slides::brightness::{Brightness, average_luma, classify, luma, measure};
pub use crate::slides::preload::{PreloadGate, preload_content};
pub use crate::slides::sampler::{BrightnessSampler, FsImageLoader, ImageLoader};
pub use crate::slides::session::{
    NavOutcome, NavRequest, NavSource, Phase, Rejection, SlideSession,
};
