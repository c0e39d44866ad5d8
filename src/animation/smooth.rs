use crate::foundation::core::{Point, Vec2};

/// Interpolation contract for smoothed channel types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// One exponential smoothing step: move `current` a fraction `factor` of the way to `target`.
///
/// `factor` is expected in `(0, 1]`; with `factor == 1` the result is exactly `target`.
pub fn smooth<T: Lerp>(current: &T, target: &T, factor: f64) -> T {
    T::lerp(current, target, factor)
}

/// A value that chases its target by one smoothing step per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothed<T> {
    current: T,
    target: T,
    factor: f64,
}

impl<T: Lerp + Copy> Smoothed<T> {
    /// Start at rest on `value`. `factor` is clamped into `(0, 1]`.
    pub fn new(value: T, factor: f64) -> Self {
        let factor = if factor.is_finite() {
            factor.clamp(f64::EPSILON, 1.0)
        } else {
            1.0
        };
        Self {
            current: value,
            target: value,
            factor,
        }
    }

    /// Smoothed value as of the last tick.
    pub fn current(&self) -> T {
        self.current
    }

    /// Raw target.
    pub fn target(&self) -> T {
        self.target
    }

    /// Smoothing factor in use.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Replace the raw target. Only input handlers call this.
    pub fn set_target(&mut self, target: T) {
        self.target = target;
    }

    /// Advance one frame and return the new smoothed value.
    pub fn tick(&mut self) -> T {
        self.current = smooth(&self.current, &self.target, self.factor);
        self.current
    }

    /// Jump both current and target to `value`.
    pub fn snap(&mut self, value: T) {
        self.current = value;
        self.target = value;
    }
}

impl Smoothed<f64> {
    /// Remaining lag `target - current`.
    pub fn lag(&self) -> f64 {
        self.target - self.current
    }
}

impl Smoothed<Vec2> {
    /// Remaining lag `target - current` per axis.
    pub fn lag(&self) -> Vec2 {
        self.target - self.current
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/smooth.rs"]
mod tests;
