use std::time::Duration;

/// Progress curves for slide transitions.
///
/// Every curve maps `[0, 1]` onto `[0, 1]` monotonically with fixed endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Quadratic acceleration.
    InQuad,
    /// Quadratic deceleration.
    OutQuad,
    /// Quadratic, slow at both ends.
    InOutQuad,
    /// Cubic acceleration.
    InCubic,
    /// Cubic deceleration.
    OutCubic,
    /// Cubic, slow at both ends.
    #[default]
    InOutCubic,
}

#[derive(Clone, Copy)]
enum Shape {
    In,
    Out,
    InOut,
}

impl Ease {
    fn parts(self) -> (i32, Shape) {
        match self {
            Self::Linear => (1, Shape::In),
            Self::InQuad => (2, Shape::In),
            Self::OutQuad => (2, Shape::Out),
            Self::InOutQuad => (2, Shape::InOut),
            Self::InCubic => (3, Shape::In),
            Self::OutCubic => (3, Shape::Out),
            Self::InOutCubic => (3, Shape::InOut),
        }
    }

    /// Shape normalized progress `t`; values outside `[0, 1]` are clamped first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let (power, shape) = self.parts();
        match shape {
            Shape::In => t.powi(power),
            Shape::Out => 1.0 - (1.0 - t).powi(power),
            // Mirrored halves meet at (0.5, 0.5).
            Shape::InOut if t < 0.5 => (2.0 * t).powi(power) / 2.0,
            Shape::InOut => 1.0 - (2.0 - 2.0 * t).powi(power) / 2.0,
        }
    }

    /// Eased progress after `elapsed` of a `duration`-long animation. A zero duration is done.
    pub fn progress(self, elapsed: Duration, duration: Duration) -> f64 {
        if duration.is_zero() {
            return 1.0;
        }
        self.apply(elapsed.as_secs_f64() / duration.as_secs_f64())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
