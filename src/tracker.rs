mod back_project;
mod color;
mod frame;
mod histogram;
mod mean_shift;
mod rect;
mod session;
mod track_state;

pub use back_project::{ProbabilityMap, back_project};
pub use color::{HUE_RANGE, Hsv, HsvImage, Mask, threshold, to_hsv};
pub use frame::Frame;
pub use histogram::{HISTOGRAM_MAX, Histogram};
pub use mean_shift::{MeanShiftOutcome, MeanShiftTracker, TerminationCriteria, mean_shift};
pub use rect::Rect;
pub use session::{TrackerConfig, TrackingSession};
pub use track_state::TrackState;
