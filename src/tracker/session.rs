//! Tracking session: ROI validation, histogram learning and per-frame tracking.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{LossReason, TrackingError};
use crate::tracker::back_project::back_project;
use crate::tracker::color::{HUE_RANGE, threshold, to_hsv};
use crate::tracker::frame::Frame;
use crate::tracker::histogram::Histogram;
use crate::tracker::mean_shift::{MeanShiftOutcome, MeanShiftTracker, TerminationCriteria};
use crate::tracker::rect::Rect;
use crate::tracker::track_state::TrackState;

/// Configuration for a [`TrackingSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Lower bound for saturation and value of pixels that feed the histogram.
    pub low_s: u8,
    /// Upper bound for saturation and value of pixels that feed the histogram.
    pub high_s: u8,
    /// Number of hue buckets, at most 180.
    pub bins: usize,
    pub criteria: TerminationCriteria,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            low_s: 30,
            high_s: 180,
            bins: HUE_RANGE as usize,
            criteria: TerminationCriteria::default(),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), TrackingError> {
        if self.low_s > self.high_s {
            return Err(TrackingError::InvalidConfig(format!(
                "low_s {} is above high_s {}",
                self.low_s, self.high_s
            )));
        }
        if self.bins == 0 || self.bins > HUE_RANGE as usize {
            return Err(TrackingError::InvalidConfig(format!(
                "bins {} outside 1..={HUE_RANGE}",
                self.bins
            )));
        }
        if self.criteria.max_iterations == 0 {
            return Err(TrackingError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.criteria.min_shift.is_finite() || self.criteria.min_shift < 0.0 {
            return Err(TrackingError::InvalidConfig(format!(
                "min_shift {} must be finite and non-negative",
                self.criteria.min_shift
            )));
        }
        Ok(())
    }
}

/// One tracking run: a histogram learned from the selected region and the
/// window that follows it.
///
/// The histogram is only ever built by [`TrackingSession::select`]; tracking
/// never re-learns it.
#[derive(Debug)]
pub struct TrackingSession {
    config: TrackerConfig,
    histogram: Option<Histogram>,
    tracker: MeanShiftTracker,
    frames_tracked: u64,
}

impl TrackingSession {
    pub fn new(config: TrackerConfig) -> Result<Self, TrackingError> {
        config.validate()?;
        Ok(Self {
            tracker: MeanShiftTracker::new(config.criteria),
            config,
            histogram: None,
            frames_tracked: 0,
        })
    }

    pub fn with_default_config() -> Self {
        Self {
            tracker: MeanShiftTracker::default(),
            config: TrackerConfig::default(),
            histogram: None,
            frames_tracked: 0,
        }
    }

    /// Start tracking `roi` on `frame`.
    ///
    /// Any previous run is discarded first, so on failure the session is idle.
    pub fn select(&mut self, frame: &Frame, roi: Rect) -> Result<(), TrackingError> {
        self.reset();

        let region = frame.region(&roi).ok_or_else(|| {
            warn!(
                "rejecting ROI {:?} on {}x{} frame",
                roi,
                frame.width(),
                frame.height()
            );
            TrackingError::InvalidRoi {
                roi,
                frame_width: frame.width(),
                frame_height: frame.height(),
            }
        })?;

        let hsv = to_hsv(region);
        let mask = threshold(&hsv, self.config.low_s, self.config.high_s);
        let histogram = Histogram::build(&hsv, &mask, self.config.bins).inspect_err(|err| {
            warn!("cannot learn histogram for ROI {:?}: {}", roi, err);
        })?;

        info!(
            "tracking ROI {:?} at {:?} ({} of {} pixels masked in)",
            roi,
            frame.timestamp(),
            mask.count(),
            roi.area()
        );
        self.histogram = Some(histogram);
        self.tracker.seed(roi);
        Ok(())
    }

    /// Track the window into `frame`.
    ///
    /// A window that no longer fits the frame or covers no probability mass
    /// ends the run with [`TrackingError::TrackingLost`]; a new selection is
    /// needed afterwards.
    pub fn track(&mut self, frame: &Frame) -> Result<MeanShiftOutcome, TrackingError> {
        let histogram = self.histogram.as_ref().ok_or(TrackingError::NotTracking)?;

        let hsv = to_hsv(frame.pixels());
        let map = back_project(&hsv, histogram);

        let outcome = match self.tracker.update(&map) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("tracking lost at {:?}: {}", frame.timestamp(), err);
                self.reset();
                return Err(err);
            }
        };

        if outcome.mass == 0 {
            warn!(
                "tracking lost at {:?}: no mass under {:?}",
                frame.timestamp(),
                outcome.window
            );
            self.reset();
            return Err(TrackingError::TrackingLost(LossReason::EmptyWindow(
                outcome.window,
            )));
        }

        self.frames_tracked += 1;
        debug!(
            "frame {:?}: window {:?} after {} iterations",
            frame.timestamp(),
            outcome.window,
            outcome.iterations
        );
        Ok(outcome)
    }

    /// Drop the histogram and window.
    pub fn reset(&mut self) {
        if self.histogram.is_some() {
            info!("tracking session reset after {} frames", self.frames_tracked);
        }
        self.histogram = None;
        self.tracker.reset();
        self.frames_tracked = 0;
    }

    #[inline]
    pub fn state(&self) -> TrackState {
        self.tracker.state()
    }

    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.tracker.state().is_active()
    }

    #[inline]
    pub fn window(&self) -> Option<Rect> {
        self.tracker.window()
    }

    #[inline]
    pub fn histogram(&self) -> Option<&Histogram> {
        self.histogram.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Frames tracked since the current ROI was selected.
    #[inline]
    pub fn frames_tracked(&self) -> u64 {
        self.frames_tracked
    }
}
