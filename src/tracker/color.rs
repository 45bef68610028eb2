//! RGB to HSV conversion and saturation/value masking.
//!
//! Hue uses the 8-bit convention: degrees halved so the full circle fits in
//! `[0, 180)`. Saturation and value are scaled to `[0, 255]`.

use ndarray::{Array2, ArrayView3, Axis, Zip};

/// Number of distinct hue values.
pub const HUE_RANGE: u8 = 180;

/// One HSV pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hsv {
    /// Hue in `[0, 180)`
    pub h: u8,
    /// Saturation in `[0, 255]`
    pub s: u8,
    /// Value in `[0, 255]`
    pub v: u8,
}

impl Hsv {
    /// Convert one RGB triple.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let (ri, gi, bi) = (r as i32, g as i32, b as i32);
        let v = ri.max(gi).max(bi);
        let min = ri.min(gi).min(bi);
        let diff = v - min;

        let s = if v == 0 { 0 } else { (255 * diff + v / 2) / v };

        let h = if diff == 0 {
            0
        } else {
            let d = diff as f32;
            let mut deg = if v == ri {
                60.0 * (gi - bi) as f32 / d
            } else if v == gi {
                120.0 + 60.0 * (bi - ri) as f32 / d
            } else {
                240.0 + 60.0 * (ri - gi) as f32 / d
            };
            if deg < 0.0 {
                deg += 360.0;
            }
            // 359.x degrees rounds up to 180, which is hue 0 again.
            let half = (deg / 2.0).round() as i32;
            half % HUE_RANGE as i32
        };

        Self {
            h: h as u8,
            s: s as u8,
            v: v as u8,
        }
    }
}

/// HSV image, indexed `[[y, x]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HsvImage {
    pixels: Array2<Hsv>,
}

impl HsvImage {
    pub fn from_array(pixels: Array2<Hsv>) -> Self {
        Self { pixels }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// `(height, width)`
    #[inline]
    pub fn dim(&self) -> (usize, usize) {
        self.pixels.dim()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Hsv {
        self.pixels[[y, x]]
    }

    #[inline]
    pub fn pixels(&self) -> &Array2<Hsv> {
        &self.pixels
    }
}

/// Convert an RGBA view of shape `(height, width, 4)` to HSV. Alpha is ignored.
pub fn to_hsv(rgba: ArrayView3<'_, u8>) -> HsvImage {
    let (h, w, _) = rgba.dim();
    let mut pixels = Array2::from_elem((h, w), Hsv::default());
    Zip::from(&mut pixels)
        .and(rgba.lanes(Axis(2)))
        .for_each(|out, px| *out = Hsv::from_rgb(px[0], px[1], px[2]));
    HsvImage { pixels }
}

/// Per-pixel selection over an HSV image.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    selected: Array2<bool>,
}

impl Mask {
    pub fn from_array(selected: Array2<bool>) -> Self {
        Self { selected }
    }

    /// `(height, width)`
    #[inline]
    pub fn dim(&self) -> (usize, usize) {
        self.selected.dim()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.selected[[y, x]]
    }

    /// Number of selected pixels.
    pub fn count(&self) -> usize {
        self.selected.iter().filter(|&&m| m).count()
    }

    #[inline]
    pub fn as_array(&self) -> &Array2<bool> {
        &self.selected
    }
}

/// Select pixels whose saturation and value both lie in `[low_s, high_s]`.
pub fn threshold(hsv: &HsvImage, low_s: u8, high_s: u8) -> Mask {
    let range = low_s..=high_s;
    Mask {
        selected: hsv
            .pixels
            .map(|p| range.contains(&p.s) && range.contains(&p.v)),
    }
}
