//! Tunable motion parameters.
//!
//! Every value here is an aesthetic default rather than a behavioral contract. Configs are
//! JSON documents; omitted fields keep their defaults and unknown fields are rejected.

use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;

use crate::animation::ease::Ease;
use crate::foundation::core::Vec2;
use crate::foundation::error::{VitrineError, VitrineResult};

/// Root motion configuration shared by every controller of a stage.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Input normalization settings.
    pub input: InputConfig,
    /// About page virtual scroller.
    pub scroll: ScrollConfig,
    /// Infinite work grid.
    pub grid: GridConfig,
    /// Premium slideshow.
    pub slides: SlideConfig,
    /// Slide background luminance sampling.
    pub brightness: BrightnessConfig,
}

/// Input normalization settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Viewports narrower than this keep native scrolling.
    pub native_scroll_breakpoint: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            native_scroll_breakpoint: 768.0,
        }
    }
}

/// Virtual scroller tuning.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    /// Per-frame smoothing factor in `(0, 1]`.
    pub smoothing: f64,
    /// Multiplier applied to wheel `deltaY`.
    pub wheel_speed: f64,
    /// Multiplier applied to touch travel.
    pub touch_sensitivity: f64,
    /// Extra scroll room past the end of the content.
    pub end_padding: f64,
    /// Items further than this outside the viewport are skipped.
    pub visibility_margin: f64,
    /// Horizontal bow per pixel of lag.
    pub curve_coefficient: f64,
    /// Skew degrees per pixel of lag.
    pub skew_coefficient: f64,
    /// Absolute skew limit in degrees.
    pub max_skew_deg: f64,
    /// Opacity lost per pixel of lag.
    pub fade_sensitivity: f64,
    /// Maximum opacity lost while scrolling.
    pub max_fade: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.08,
            wheel_speed: 1.0,
            touch_sensitivity: 2.0,
            end_padding: 100.0,
            visibility_margin: 200.0,
            curve_coefficient: 0.35,
            skew_coefficient: 0.03,
            max_skew_deg: 8.0,
            fade_sensitivity: 0.002,
            max_fade: 0.4,
        }
    }
}

/// Infinite grid tuning.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Per-frame smoothing of the scroll offset.
    pub scroll_smoothing: f64,
    /// Per-frame smoothing of pointer ratio and press level.
    pub pointer_smoothing: f64,
    /// Ambient motion added to the target every frame.
    pub drift: Vec2,
    /// Multiplier applied to wheel deltas.
    pub wheel_speed: f64,
    /// Multiplier applied to drag travel.
    pub drag_speed: f64,
    /// Pointer travel after which a press counts as a drag.
    pub drag_threshold: f64,
    /// Tile size as a multiple of the viewport.
    pub tile_scale: f64,
    /// Range `[min, max)` of the per-item parallax ease.
    pub ease_range: [f64; 2],
    /// Pointer parallax as a fraction of item size.
    pub parallax_strength: f64,
    /// Resting image zoom above 1.0.
    pub image_zoom: f64,
    /// Zoom removed while pressed.
    pub press_zoom: f64,
    /// Image counter-parallax as a fraction of item size.
    pub image_counter_parallax: f64,
    /// Fixed layout seed; `None` draws one from the clock.
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            scroll_smoothing: 0.05,
            pointer_smoothing: 0.05,
            drift: Vec2::new(-0.35, -0.2),
            wheel_speed: 0.8,
            drag_speed: 1.0,
            drag_threshold: 4.0,
            tile_scale: 1.0,
            ease_range: [0.6, 1.4],
            parallax_strength: 0.05,
            image_zoom: 0.1,
            press_zoom: 0.06,
            image_counter_parallax: 0.03,
            seed: None,
        }
    }
}

/// Slideshow timing and gesture thresholds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlideConfig {
    /// Auto-advance interval in milliseconds.
    pub auto_advance_ms: u64,
    /// Transition duration in milliseconds.
    pub transition_ms: u64,
    /// Minimum spacing between accepted wheel navigations.
    pub wheel_debounce_ms: u64,
    /// Wheel deltas below this magnitude are trackpad noise.
    pub wheel_min_delta: f64,
    /// Minimum swipe travel in pixels.
    pub swipe_min_distance: f64,
    /// Easing applied to transition progress.
    pub ease: Ease,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            auto_advance_ms: 3000,
            transition_ms: 1200,
            wheel_debounce_ms: 1500,
            wheel_min_delta: 30.0,
            swipe_min_distance: 50.0,
            ease: Ease::InOutCubic,
        }
    }
}

impl SlideConfig {
    /// Auto-advance interval.
    pub fn auto_advance(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }

    /// Transition duration.
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Wheel debounce spacing.
    pub fn wheel_debounce(&self) -> Duration {
        Duration::from_millis(self.wheel_debounce_ms)
    }
}

/// Luminance sampling settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrightnessConfig {
    /// Side of the square the image is downsampled to.
    pub sample_size: u32,
    /// Average luminance below this is a dark background.
    pub dark_threshold: f64,
    /// How long a consumer waits before settling on the dark default.
    pub timeout_ms: u64,
}

impl Default for BrightnessConfig {
    fn default() -> Self {
        Self {
            sample_size: 50,
            dark_threshold: 128.0,
            timeout_ms: 5000,
        }
    }
}

impl BrightnessConfig {
    /// Sampling timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl MotionConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> VitrineResult<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| VitrineError::config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> VitrineResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read motion config '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> VitrineResult<()> {
        fn factor(name: &str, v: f64) -> VitrineResult<()> {
            if !(v > 0.0 && v <= 1.0) {
                return Err(VitrineError::config(format!("{name} must be in (0, 1]")));
            }
            Ok(())
        }
        fn non_negative(name: &str, v: f64) -> VitrineResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(VitrineError::config(format!(
                    "{name} must be finite and >= 0"
                )));
            }
            Ok(())
        }

        factor("scroll.smoothing", self.scroll.smoothing)?;
        factor("grid.scroll_smoothing", self.grid.scroll_smoothing)?;
        factor("grid.pointer_smoothing", self.grid.pointer_smoothing)?;
        factor("scroll.max_fade", self.scroll.max_fade)?;

        non_negative("input.native_scroll_breakpoint", self.input.native_scroll_breakpoint)?;
        non_negative("scroll.end_padding", self.scroll.end_padding)?;
        non_negative("scroll.visibility_margin", self.scroll.visibility_margin)?;
        non_negative("scroll.max_skew_deg", self.scroll.max_skew_deg)?;
        non_negative("grid.drag_threshold", self.grid.drag_threshold)?;
        non_negative("slides.wheel_min_delta", self.slides.wheel_min_delta)?;
        non_negative("slides.swipe_min_distance", self.slides.swipe_min_distance)?;

        if !self.grid.drift.is_finite() {
            return Err(VitrineError::config("grid.drift must be finite"));
        }
        if !(self.grid.tile_scale.is_finite() && self.grid.tile_scale >= 1.0) {
            return Err(VitrineError::config("grid.tile_scale must be >= 1"));
        }
        let [lo, hi] = self.grid.ease_range;
        if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
            return Err(VitrineError::config(
                "grid.ease_range must be finite with min <= max",
            ));
        }

        if self.slides.auto_advance_ms == 0 {
            return Err(VitrineError::config("slides.auto_advance_ms must be > 0"));
        }
        if self.slides.wheel_debounce_ms <= self.slides.transition_ms {
            return Err(VitrineError::config(
                "slides.wheel_debounce_ms must be longer than slides.transition_ms",
            ));
        }

        if self.brightness.sample_size == 0 {
            return Err(VitrineError::config("brightness.sample_size must be > 0"));
        }
        non_negative("brightness.dark_threshold", self.brightness.dark_threshold)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
