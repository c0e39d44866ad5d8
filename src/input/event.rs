use crate::foundation::core::{Point, Viewport};

/// Keyboard keys the motion core reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Any other key.
    Other,
}

/// Host input, already translated into logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Mouse wheel or trackpad scroll.
    Wheel {
        /// Horizontal delta.
        delta_x: f64,
        /// Vertical delta, positive when scrolling down.
        delta_y: f64,
    },
    /// First finger down.
    TouchStart {
        /// Touch position.
        at: Point,
    },
    /// Finger moved.
    TouchMove {
        /// Touch position.
        at: Point,
    },
    /// Finger lifted.
    TouchEnd {
        /// Last touch position.
        at: Point,
    },
    /// Primary button pressed.
    PointerDown {
        /// Pointer position.
        at: Point,
    },
    /// Pointer moved, pressed or not.
    PointerMove {
        /// Pointer position.
        at: Point,
    },
    /// Primary button released.
    PointerUp {
        /// Pointer position.
        at: Point,
    },
    /// Key pressed.
    Key {
        /// Which key.
        key: Key,
    },
    /// Click on an item or indicator, by position in the view's item list.
    Activate {
        /// Item index.
        index: usize,
    },
    /// Host surface resized.
    Resize {
        /// New viewport.
        viewport: Viewport,
    },
}

/// What the host should do with the native default of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum InputDisposition {
    /// The controller used the event; suppress the native default.
    Consumed,
    /// The controller is inactive for this event; keep native behavior.
    Passthrough,
    /// Not relevant to this controller.
    Ignored,
}

impl InputDisposition {
    /// Merge two listener answers; `Consumed` wins, then `Passthrough`.
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Consumed, _) | (_, Self::Consumed) => Self::Consumed,
            (Self::Passthrough, _) | (_, Self::Passthrough) => Self::Passthrough,
            _ => Self::Ignored,
        }
    }
}
