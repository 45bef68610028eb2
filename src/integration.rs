//! Glue between the tracker and its surroundings.
//!
//! This module provides the frame source and render sink traits, a helper
//! turning drag gestures into selections, window annotation, and the
//! cancellable per-frame loop that ties them to a [`TrackingSession`].
//!
//! [`TrackingSession`]: crate::tracker::TrackingSession

mod annotate;
mod builder;
mod pipeline;
mod source;

pub use annotate::{Outline, draw_outline};
pub use builder::SelectionBuilder;
pub use pipeline::{TickHandle, TickOutcome, TrackerPipeline};
pub use source::{FrameSource, RenderSink};
