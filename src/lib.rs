//! Mean-shift tracking of a selected region across video frames.
//!
//! A hue histogram is learned once from the selected region of interest.
//! Every later frame is back-projected through that histogram and a
//! fixed-size window is shifted toward the centroid of the resulting
//! probability map.

mod error;
pub mod integration;
pub mod tracker;

pub use error::{LossReason, TrackingError};
pub use integration::{
    FrameSource, Outline, RenderSink, SelectionBuilder, TickHandle, TickOutcome, TrackerPipeline,
    draw_outline,
};
pub use tracker::{
    Frame, Histogram, Hsv, HsvImage, Mask, MeanShiftOutcome, MeanShiftTracker, ProbabilityMap,
    Rect, TerminationCriteria, TrackState, TrackerConfig, TrackingSession, back_project,
    mean_shift, threshold, to_hsv,
};
