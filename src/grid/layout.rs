use crate::config::GridConfig;
use crate::foundation::core::{Point, Size, Vec2, Viewport};
use crate::foundation::math::Rng64;

/// Authored slot boxes `[x, y, w, h]` as fractions of one tile.
const SLOTS: [[f64; 4]; 11] = [
    [0.04, 0.06, 0.16, 0.22],
    [0.28, 0.02, 0.12, 0.18],
    [0.50, 0.10, 0.18, 0.24],
    [0.78, 0.04, 0.14, 0.20],
    [0.10, 0.40, 0.14, 0.20],
    [0.34, 0.36, 0.20, 0.26],
    [0.64, 0.44, 0.12, 0.16],
    [0.84, 0.34, 0.12, 0.22],
    [0.06, 0.72, 0.18, 0.22],
    [0.42, 0.70, 0.14, 0.20],
    [0.70, 0.72, 0.16, 0.22],
];

/// Number of authored slots in one tile.
pub const SLOT_COUNT: usize = SLOTS.len();

/// One replicated item of the infinite grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridItem {
    /// Index of the content record shown here.
    pub content_index: usize,
    /// Top-left corner inside the replicated field, before scrolling.
    pub base: Point,
    /// Item size.
    pub size: Size,
    /// Parallax multiplier, fixed for the life of the layout.
    pub ease: f64,
    /// Accumulated wrap correction, always a whole number of periods.
    pub wrap: Vec2,
    /// Set once the caption has been on screen.
    pub caption_revealed: bool,
}

/// Item set for one mount/resize of the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    /// Size of one authored tile.
    pub tile: Size,
    /// Size of the 2×2 replicated field; items wrap by this amount.
    pub period: Size,
    /// Replicated items, tile-major.
    pub items: Vec<GridItem>,
}

impl GridLayout {
    /// Layout with no items, used for empty content.
    pub fn empty(tile: Size) -> Self {
        Self {
            tile,
            period: Size::new(tile.width * 2.0, tile.height * 2.0),
            items: Vec::new(),
        }
    }

    /// Return `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Build the replicated item set for `content_len` works.
///
/// Each authored slot is scaled to the tile, mapped to content by `slot % content_len`, and
/// copied into the four tiles of a 2×2 field. Every copy draws its own ease once.
#[tracing::instrument(skip(cfg, rng))]
pub(crate) fn build_layout(
    content_len: usize,
    viewport: Viewport,
    cfg: &GridConfig,
    rng: &mut Rng64,
) -> GridLayout {
    let tile = Size::new(
        viewport.width * cfg.tile_scale,
        viewport.height * cfg.tile_scale,
    );
    let mut layout = GridLayout::empty(tile);
    if content_len == 0 || tile.is_zero_area() {
        return layout;
    }

    let [ease_lo, ease_hi] = cfg.ease_range;
    let offsets = [
        Vec2::new(0.0, 0.0),
        Vec2::new(tile.width, 0.0),
        Vec2::new(0.0, tile.height),
        Vec2::new(tile.width, tile.height),
    ];

    layout.items.reserve(offsets.len() * SLOT_COUNT);
    for offset in offsets {
        for (slot, [x, y, w, h]) in SLOTS.iter().copied().enumerate() {
            layout.items.push(GridItem {
                content_index: slot % content_len,
                base: Point::new(x * tile.width, y * tile.height) + offset,
                size: Size::new(w * tile.width, h * tile.height),
                ease: rng.range(ease_lo, ease_hi),
                wrap: Vec2::ZERO,
                caption_revealed: false,
            });
        }
    }

    tracing::debug!(items = layout.items.len(), "grid layout built");
    layout
}

#[cfg(test)]
#[path = "../../tests/unit/grid/layout.rs"]
mod tests;
