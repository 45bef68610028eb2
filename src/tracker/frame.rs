//! RGBA video frame.

use std::time::Duration;

use ndarray::{Array3, ArrayView3, Axis, aview1, s};

use crate::error::TrackingError;
use crate::tracker::rect::Rect;

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// One decoded video frame: dense row-major RGBA with a presentation timestamp.
///
/// The pixel array has shape `(height, width, 4)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pixels: Array3<u8>,
    timestamp: Duration,
}

impl Frame {
    /// Wrap a raw RGBA buffer.
    ///
    /// Fails with [`TrackingError::InvalidFrame`] when a dimension is zero or the
    /// buffer length is not `width * height * 4`. A size that does not fit in
    /// `usize` reports `expected` as `usize::MAX`.
    pub fn from_rgba(
        width: usize,
        height: usize,
        data: Vec<u8>,
        timestamp: Duration,
    ) -> Result<Self, TrackingError> {
        let got = data.len();
        let expected = buffer_len(width, height);
        let invalid = TrackingError::InvalidFrame {
            width,
            height,
            expected: expected.unwrap_or(usize::MAX),
            got,
        };
        if width == 0 || height == 0 || expected != Some(got) {
            return Err(invalid);
        }
        let pixels =
            Array3::from_shape_vec((height, width, CHANNELS), data).map_err(|_| invalid)?;
        Ok(Self { pixels, timestamp })
    }

    /// A frame filled with one RGBA color, under the same checks as [`Frame::from_rgba`].
    pub fn filled(
        width: usize,
        height: usize,
        rgba: [u8; 4],
        timestamp: Duration,
    ) -> Result<Self, TrackingError> {
        let len = buffer_len(width, height).unwrap_or(0);
        Self::from_rgba(width, height, rgba.repeat(len / CHANNELS), timestamp)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    #[inline]
    pub fn timestamp(&self) -> Duration {
        self.timestamp
    }

    /// Full pixel view, shape `(height, width, 4)`.
    #[inline]
    pub fn pixels(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    /// RGBA value at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let p = self.pixels.slice(s![y, x, ..]);
        [p[0], p[1], p[2], p[3]]
    }

    /// View of the pixels under `rect`, or `None` unless it lies fully inside.
    pub fn region(&self, rect: &Rect) -> Option<ArrayView3<'_, u8>> {
        if !rect.fits_within(self.width(), self.height()) {
            return None;
        }
        let (x, y) = (rect.x as usize, rect.y as usize);
        let (w, h) = (rect.width as usize, rect.height as usize);
        Some(self.pixels.slice(s![y..y + h, x..x + w, ..]))
    }

    /// Overwrite every pixel inside `rect` (clipped to the frame) with `rgba`.
    pub fn fill_rect(&mut self, rect: &Rect, rgba: [u8; 4]) {
        let clipped = rect.clip_to(self.width(), self.height());
        if clipped.is_empty() {
            return;
        }
        let (x, y) = (clipped.x as usize, clipped.y as usize);
        let (w, h) = (clipped.width as usize, clipped.height as usize);
        let rgba = aview1(&rgba);
        let mut block = self.pixels.slice_mut(s![y..y + h, x..x + w, ..]);
        for mut px in block.lanes_mut(Axis(2)) {
            px.assign(&rgba);
        }
    }

    /// Consume the frame and return the raw RGBA buffer.
    pub fn into_rgba(self) -> Vec<u8> {
        let (data, _) = self.pixels.into_raw_vec_and_offset();
        data
    }
}

fn buffer_len(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height)?.checked_mul(CHANNELS)
}
