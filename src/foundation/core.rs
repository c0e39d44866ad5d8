use std::sync::Arc;

use crate::foundation::error::{VitrineError, VitrineResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Monotonic 0-based frame counter of a [`Stage`](crate::Stage).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Visible area of the host surface in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport with finite, non-negative dimensions.
    pub fn new(width: f64, height: f64) -> VitrineResult<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(VitrineError::validation(
                "viewport dimensions must be finite and >= 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Viewport as a `kurbo` size.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Return `true` when the viewport is narrower than `breakpoint`.
    ///
    /// Full-viewport controllers hand scrolling back to the host below this width.
    pub fn is_narrow(self, breakpoint: f64) -> bool {
        self.width < breakpoint
    }

    /// Parse `"WIDTHxHEIGHT"` (e.g. `1440x900`).
    pub fn parse(s: &str) -> VitrineResult<Self> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| VitrineError::validation(format!("viewport '{s}' must be WxH")))?;
        let width = w
            .trim()
            .parse::<f64>()
            .map_err(|_| VitrineError::validation(format!("invalid viewport width '{w}'")))?;
        let height = h
            .trim()
            .parse::<f64>()
            .map_err(|_| VitrineError::validation(format!("invalid viewport height '{h}'")))?;
        Self::new(width, height)
    }
}

/// One portfolio work as delivered by the content source.
///
/// Field names follow the CMS payload (`imageUrl`, `thumbnailUrl`); snake_case spellings are
/// accepted too.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Stable content identifier, emitted in navigation intents.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Year of the work, if known. Accepts a number or a numeric string.
    #[serde(default, deserialize_with = "deserialize_year")]
    pub year: Option<u16>,
    /// Full-size image location.
    #[serde(alias = "image_url")]
    pub image_url: String,
    /// Thumbnail image location.
    #[serde(default, alias = "thumbnail_url")]
    pub thumbnail_url: Option<String>,
}

fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(u16),
        Str(String),
    }

    let v = <Option<Repr> as serde::Deserialize>::deserialize(deserializer)?;
    match v {
        None => Ok(None),
        Some(Repr::Num(year)) => Ok(Some(year)),
        Some(Repr::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(Repr::Str(s)) => s
            .trim()
            .parse::<u16>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid year \"{s}\""))),
    }
}

/// Ordered, read-only content snapshot shared by every controller of one mount.
pub type ContentList = Arc<[ContentItem]>;

/// Parse a content list from its JSON array form.
pub fn content_from_json(json: &str) -> VitrineResult<ContentList> {
    let items: Vec<ContentItem> = serde_json::from_str(json)?;
    Ok(items.into())
}

/// Request for the external router to open a work.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NavigationIntent {
    /// Identifier of the activated content item.
    pub content_id: String,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
