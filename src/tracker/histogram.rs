//! Hue histogram learned from the selected region.

use ndarray::Zip;

use crate::error::TrackingError;
use crate::tracker::color::{HUE_RANGE, HsvImage, Mask};

/// Value of the largest bin after normalization.
pub const HISTOGRAM_MAX: f32 = 255.0;

/// Normalized 1-D hue histogram.
///
/// Bins are non-negative and the largest bin is exactly [`HISTOGRAM_MAX`].
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bins: Vec<f32>,
}

impl Histogram {
    /// Accumulate the hue of every masked pixel and min-max normalize to `[0, 255]`.
    ///
    /// `bins` splits the hue range `[0, 180)` into equally sized buckets and
    /// must lie in `1..=180`. Fails with [`TrackingError::DegenerateRegion`] if
    /// the mask selects nothing.
    pub fn build(hsv: &HsvImage, mask: &Mask, bins: usize) -> Result<Self, TrackingError> {
        if bins == 0 || bins > HUE_RANGE as usize {
            return Err(TrackingError::InvalidConfig(format!(
                "histogram bin count {bins} outside 1..={HUE_RANGE}"
            )));
        }
        if mask.dim() != hsv.dim() {
            return Err(TrackingError::ShapeMismatch {
                mask: mask.dim(),
                image: hsv.dim(),
            });
        }

        let mut counts = vec![0u64; bins];
        let mut total = 0u64;
        Zip::from(hsv.pixels())
            .and(mask.as_array())
            .for_each(|p, &selected| {
                if selected {
                    counts[bucket(p.h, bins)] += 1;
                    total += 1;
                }
            });

        if total == 0 {
            return Err(TrackingError::DegenerateRegion);
        }

        let min = counts.iter().copied().min().unwrap_or(0) as f64;
        let max = counts.iter().copied().max().unwrap_or(0) as f64;
        let bins = if max > min {
            counts
                .iter()
                .map(|&c| ((c as f64 - min) * HISTOGRAM_MAX as f64 / (max - min)) as f32)
                .collect()
        } else {
            // Only reachable with a single bin.
            vec![HISTOGRAM_MAX; counts.len()]
        };
        Ok(Self { bins })
    }

    /// Build directly from bin values, rescaling so the largest bin is 255.
    ///
    /// Negative values are floored at zero. Returns `DegenerateRegion` when no
    /// bin is positive.
    pub fn from_bins(values: &[f32]) -> Result<Self, TrackingError> {
        if values.is_empty() || values.len() > HUE_RANGE as usize {
            return Err(TrackingError::InvalidConfig(format!(
                "histogram bin count {} outside 1..={HUE_RANGE}",
                values.len()
            )));
        }
        let max = values.iter().copied().fold(0.0f32, f32::max);
        if max <= 0.0 || !max.is_finite() {
            return Err(TrackingError::DegenerateRegion);
        }
        let bins = values
            .iter()
            .map(|&v| (v.max(0.0) as f64 * HISTOGRAM_MAX as f64 / max as f64) as f32)
            .collect();
        Ok(Self { bins })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    #[inline]
    pub fn bins(&self) -> &[f32] {
        &self.bins
    }

    /// Likelihood for `hue`, rounded to a byte. Hues past 179 are clamped.
    #[inline]
    pub fn likelihood(&self, hue: u8) -> u8 {
        let hue = hue.min(HUE_RANGE - 1);
        self.bins[bucket(hue, self.bins.len())].round() as u8
    }

    /// Largest bin value.
    pub fn peak(&self) -> f32 {
        self.bins.iter().copied().fold(0.0, f32::max)
    }
}

#[inline]
fn bucket(hue: u8, bins: usize) -> usize {
    (hue as usize * bins / HUE_RANGE as usize).min(bins - 1)
}
