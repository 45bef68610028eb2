use serde::{Deserialize, Serialize};

/// Integer rectangle in frame pixel coordinates.
///
/// `x`/`y` is the top-left corner. A rectangle with zero or negative
/// width/height has no area and means "no selection".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: i32,
    /// Top-left y coordinate
    pub y: i32,
    /// Width of the rectangle
    pub width: i32,
    /// Height of the rectangle
    pub height: i32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect spanning two opposite corners given in any order.
    ///
    /// This is how a drag gesture becomes a selection: the top-left is the
    /// minimum of both points, the size their absolute difference (saturating).
    #[inline]
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: saturate((x1 as i64 - x2 as i64).abs()),
            height: saturate((y1 as i64 - y2 as i64).abs()),
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2), exclusive bottom-right.
    #[inline]
    pub fn to_tlbr(&self) -> [i64; 4] {
        [self.x as i64, self.y as i64, self.right(), self.bottom()]
    }

    /// Exclusive right edge. Widened so far-off rectangles cannot overflow.
    #[inline]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Center of the covered pixel span.
    ///
    /// For a window starting at `x` with width `w` the covered pixel indices
    /// are `x..=x + w - 1`, so the center lies at `x + (w - 1) / 2`.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + (self.width - 1) as f64 / 2.0,
            self.y as f64 + (self.height - 1) as f64 / 2.0,
        )
    }

    /// Get the area of the rectangle, zero when degenerate.
    #[inline]
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Move the rectangle by `(dx, dy)` keeping its size.
    #[inline]
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Whether the whole rectangle lies inside a `width x height` frame.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        !self.is_empty()
            && self.x >= 0
            && self.y >= 0
            && self.right() <= width as i64
            && self.bottom() <= height as i64
    }

    /// Intersection with a `width x height` frame anchored at the origin.
    ///
    /// Returns an empty rectangle when there is no overlap.
    pub fn clip_to(&self, width: usize, height: usize) -> Self {
        let frame_w = width.min(i32::MAX as usize) as i64;
        let frame_h = height.min(i32::MAX as usize) as i64;
        let x1 = (self.x as i64).clamp(0, frame_w);
        let y1 = (self.y as i64).clamp(0, frame_h);
        let x2 = self.right().clamp(0, frame_w);
        let y2 = self.bottom().clamp(0, frame_h);
        Self::new(
            x1 as i32,
            y1 as i32,
            (x2 - x1).max(0) as i32,
            (y2 - y1).max(0) as i32,
        )
    }

    /// Move the origin so the rectangle fits a `width x height` frame.
    ///
    /// The size is preserved. Returns `None` if the rectangle is empty or
    /// larger than the frame in either dimension.
    pub fn clamp_into(&self, width: usize, height: usize) -> Option<Self> {
        if self.is_empty()
            || self.width as i64 > width as i64
            || self.height as i64 > height as i64
        {
            return None;
        }
        let max_x = width as i64 - self.width as i64;
        let max_y = height as i64 - self.height as i64;
        let x = (self.x as i64).clamp(0, max_x) as i32;
        let y = (self.y as i64).clamp(0, max_y) as i32;
        Some(Self::new(x, y, self.width, self.height))
    }
}

#[inline]
fn saturate(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
