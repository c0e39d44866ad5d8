//! Background luminance classification of slide images.
//!
//! The image is decoded, downsampled to a small square with a triangle filter, and reduced to
//! the mean of per-pixel Rec. 601 luma. Callers that must never fail use [`classify`], which
//! settles on the dark default and logs instead of returning an error.

use anyhow::Context as _;
use image::imageops::FilterType;

use crate::config::BrightnessConfig;
use crate::foundation::error::{VitrineError, VitrineResult};

/// Result of sampling one image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Brightness {
    /// Mean luma in `[0, 255]`; `None` when the image could not be sampled.
    pub average: Option<f64>,
    /// Dark background classification.
    pub dark: bool,
}

impl Brightness {
    /// Safe default used whenever sampling fails.
    pub const FALLBACK: Self = Self {
        average: None,
        dark: true,
    };

    fn from_average(average: f64, threshold: f64) -> Self {
        Self {
            average: Some(average),
            dark: average < threshold,
        }
    }
}

/// Rec. 601 luma of one pixel.
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)
}

/// Mean luma over an RGBA buffer. Alpha is ignored.
pub fn average_luma(rgba: &image::RgbaImage) -> Option<f64> {
    let count = u64::from(rgba.width()) * u64::from(rgba.height());
    if count == 0 {
        return None;
    }
    let sum: f64 = rgba
        .pixels()
        .map(|px| {
            let [r, g, b, _] = px.0;
            luma(r, g, b)
        })
        .sum();
    Some(sum / count as f64)
}

/// Decode `bytes` and measure their brightness.
#[tracing::instrument(skip(bytes, cfg), fields(len = bytes.len()))]
pub fn measure(bytes: &[u8], cfg: &BrightnessConfig) -> VitrineResult<Brightness> {
    if cfg.sample_size == 0 {
        return Err(VitrineError::sampling("sample size must be > 0"));
    }
    let img = image::load_from_memory(bytes).context("decode slide image")?;
    let small = img
        .resize_exact(cfg.sample_size, cfg.sample_size, FilterType::Triangle)
        .to_rgba8();
    let average =
        average_luma(&small).ok_or_else(|| VitrineError::sampling("image has no pixels"))?;
    tracing::debug!(average, "sampled slide brightness");
    Ok(Brightness::from_average(average, cfg.dark_threshold))
}

/// Like [`measure`], but never fails: errors settle on [`Brightness::FALLBACK`].
pub fn classify(bytes: &[u8], cfg: &BrightnessConfig) -> Brightness {
    match measure(bytes, cfg) {
        Ok(b) => b,
        Err(err) => {
            tracing::warn!(error = %err, "brightness sampling failed; assuming dark");
            Brightness::FALLBACK
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/slides/brightness.rs"]
mod tests;
