//! Histogram back-projection.

use ndarray::{Array2, ArrayView2, s};

use crate::tracker::color::HsvImage;
use crate::tracker::histogram::Histogram;
use crate::tracker::rect::Rect;

/// Per-pixel likelihood that a pixel belongs to the tracked color distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityMap {
    values: Array2<u8>,
}

impl ProbabilityMap {
    pub fn from_array(values: Array2<u8>) -> Self {
        Self { values }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.values.nrows()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.values[[y, x]]
    }

    #[inline]
    pub fn as_array(&self) -> &Array2<u8> {
        &self.values
    }

    /// Values under `rect`, or `None` unless it lies fully inside the map.
    pub fn window(&self, rect: &Rect) -> Option<ArrayView2<'_, u8>> {
        if !rect.fits_within(self.width(), self.height()) {
            return None;
        }
        let (x, y) = (rect.x as usize, rect.y as usize);
        let (w, h) = (rect.width as usize, rect.height as usize);
        Some(self.values.slice(s![y..y + h, x..x + w]))
    }
}

/// Look up every pixel's hue bucket in `histogram`.
pub fn back_project(hsv: &HsvImage, histogram: &Histogram) -> ProbabilityMap {
    ProbabilityMap {
        values: hsv.pixels().map(|p| histogram.likelihood(p.h)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::color::Hsv;

    #[test]
    fn test_back_project_gathers_bins() {
        let mut values = vec![0.0; 180];
        values[60] = 4.0;
        values[90] = 2.0;
        let hist = Histogram::from_bins(&values).unwrap();

        let hues = [[60u8, 90, 0], [179, 60, 90]];
        let hsv = HsvImage::from_array(Array2::from_shape_fn((2, 3), |(y, x)| Hsv {
            h: hues[y][x],
            s: 0,
            v: 0,
        }));
        let map = back_project(&hsv, &hist);

        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert_eq!(map.as_array(), &ndarray::arr2(&[[255u8, 128, 0], [0, 255, 128]]));
    }

    #[test]
    fn test_out_of_range_hue_is_clamped() {
        let mut values = vec![0.0; 180];
        values[179] = 1.0;
        let hist = Histogram::from_bins(&values).unwrap();
        let hsv = HsvImage::from_array(Array2::from_elem((1, 1), Hsv { h: 200, s: 0, v: 0 }));
        assert_eq!(back_project(&hsv, &hist).get(0, 0), 255);
    }

    #[test]
    fn test_window_view() {
        let map =
            ProbabilityMap::from_array(Array2::from_shape_fn((4, 4), |(y, x)| (y * 4 + x) as u8));
        let view = map.window(&Rect::new(1, 2, 2, 2)).unwrap();
        assert_eq!(view, ndarray::arr2(&[[9u8, 10], [13, 14]]));
        assert!(map.window(&Rect::new(3, 3, 2, 2)).is_none());
    }
}
