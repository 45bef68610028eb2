//! Error types shared by the tracking pipeline.

use thiserror::Error;

use crate::tracker::Rect;

/// Why a tracking session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LossReason {
    /// The window no longer fits inside the frame.
    #[error("window {window:?} does not fit a {frame_width}x{frame_height} frame")]
    OutOfFrame {
        window: Rect,
        frame_width: usize,
        frame_height: usize,
    },
    /// The probability map has no mass under the window.
    #[error("no probability mass under window {0:?}")]
    EmptyWindow(Rect),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackingError {
    /// Selection lies outside the frame or has no area.
    #[error("invalid ROI {roi:?} for a {frame_width}x{frame_height} frame")]
    InvalidRoi {
        roi: Rect,
        frame_width: usize,
        frame_height: usize,
    },
    /// No pixel of the selected region passed the saturation/value mask.
    #[error("selected region has no pixels inside the saturation/value mask")]
    DegenerateRegion,
    #[error("tracking lost: {0}")]
    TrackingLost(LossReason),
    #[error("frame buffer holds {got} bytes, expected {expected} for {width}x{height} RGBA")]
    InvalidFrame {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// `track` was called without an active window.
    #[error("no active tracking window")]
    NotTracking,
    #[error("mask is {mask:?} but image is {image:?}")]
    ShapeMismatch {
        mask: (usize, usize),
        image: (usize, usize),
    },
}
