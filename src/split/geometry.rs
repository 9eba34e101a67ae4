use super::state::{Dp, DEFAULT_BAR};

/// A size in physical pixels. Either extent may be negative when a pane has
/// been pushed past its edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PxSize {
    pub width: i32,
    pub height: i32,
}

impl PxSize {
    pub const ZERO: Self = Self { width: 0, height: 0 };

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// A pixel position, used for paint offsets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PxPoint {
    pub x: i32,
    pub y: i32,
}

impl PxPoint {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, other: PxPoint) -> Self {
        Self::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }
}

/// Half-open pixel rectangle: `min` inclusive, `max` exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PxRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl PxRect {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn width(&self) -> i32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub fn height(&self) -> i32 {
        self.max_y.saturating_sub(self.min_y)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x as f32 && x < self.max_x as f32 && y >= self.min_y as f32 && y < self.max_y as f32
    }

    pub fn translate(self, by: PxPoint) -> Self {
        Self {
            min_x: self.min_x.saturating_add(by.x),
            min_y: self.min_y.saturating_add(by.y),
            max_x: self.max_x.saturating_add(by.x),
            max_y: self.max_y.saturating_add(by.y),
        }
    }
}

/// Minimum and maximum extents a widget has to lay out within.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Constraints {
    pub min: PxSize,
    pub max: PxSize,
}

impl Constraints {
    /// Constraints with a zero minimum.
    pub const fn loose(max: PxSize) -> Self {
        Self { min: PxSize::ZERO, max }
    }

    /// Whether `x` lies within `[min.width, max.width]`.
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.min.width as f32 && x <= self.max.width as f32
    }
}

/// Turn the configured bar thickness into pixels, falling back to
/// [`DEFAULT_BAR`] when it would be 1px or thinner.
pub fn resolve_bar_px(bar: Dp, px_per_dp: f32) -> i32 {
    let px = dp_to_px(bar, px_per_dp);
    if px <= 1 {
        dp_to_px(DEFAULT_BAR, px_per_dp)
    } else {
        px
    }
}

pub(crate) fn dp_to_px(dp: Dp, px_per_dp: f32) -> i32 {
    // `as` saturates and maps NaN to zero.
    (dp.0 * px_per_dp).round() as i32
}

/// Pixel boundaries of both panes and the divider for one frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SplitGeometry {
    pub left_width: i32,
    pub right_offset: i32,
    pub right_width: i32,
    pub bar: PxRect,
}

impl SplitGeometry {
    /// Derive the split from `ratio`.
    ///
    /// Nothing is clamped: a ratio near -1 gives the left pane a negative
    /// width, one near 1 does the same to the right pane. It is up to the
    /// children's host to treat negative extents as empty.
    pub fn compute(ratio: f32, bar_px: i32, width: i32, height: i32) -> Self {
        let proportion = (ratio + 1.0) / 2.0;
        let left_width = (proportion * width as f32 - bar_px as f32).round() as i32;
        let right_offset = left_width.saturating_add(bar_px);
        let right_width = width.saturating_sub(right_offset);

        Self {
            left_width,
            right_offset,
            right_width,
            bar: PxRect::new(left_width, 0, right_offset, height),
        }
    }

    pub fn left_size(&self) -> PxSize {
        PxSize::new(self.left_width, self.bar.max_y)
    }

    pub fn right_size(&self) -> PxSize {
        PxSize::new(self.right_width, self.bar.max_y)
    }
}
