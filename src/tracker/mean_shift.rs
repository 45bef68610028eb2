//! Fixed-size mean-shift over a probability map.
//!
//! Each iteration moves the window so its center lands on the weighted
//! centroid of the probability mass it currently covers. The window size never
//! changes and the window never leaves the map.

use log::{debug, trace};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{LossReason, TrackingError};
use crate::tracker::back_project::ProbabilityMap;
use crate::tracker::rect::Rect;
use crate::tracker::track_state::TrackState;

/// Stopping rule for the mean-shift iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminationCriteria {
    /// Hard cap on iterations per frame.
    pub max_iterations: u32,
    /// Converged once a step moves the window by at most this many pixels.
    pub min_shift: f64,
}

impl Default for TerminationCriteria {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            min_shift: 1.0,
        }
    }
}

/// Result of running mean-shift on one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanShiftOutcome {
    /// Window after the last step, always fully inside the map.
    pub window: Rect,
    /// Iterations performed, never more than `max_iterations`.
    pub iterations: u32,
    /// Whether the last step moved by at most `min_shift`.
    pub converged: bool,
    /// Probability mass under the window at the last centroid evaluation.
    pub mass: u64,
}

struct Centroid {
    position: Vector2<f64>,
    mass: u64,
}

/// Weighted centroid of the map values under `window`, in frame coordinates.
fn centroid(map: &ProbabilityMap, window: &Rect) -> Option<Centroid> {
    let view = map.window(window)?;
    let (mut m00, mut m10, mut m01) = (0u64, 0u64, 0u64);
    for ((row, col), &v) in view.indexed_iter() {
        let v = v as u64;
        m00 += v;
        m10 += col as u64 * v;
        m01 += row as u64 * v;
    }
    if m00 == 0 {
        return None;
    }
    let local = Vector2::new(m10 as f64, m01 as f64) / m00 as f64;
    Some(Centroid {
        position: Vector2::new(window.x as f64, window.y as f64) + local,
        mass: m00,
    })
}

/// Shift `window` toward the local mode of `map`.
///
/// The window is first clamped into the map. Fails with
/// [`TrackingError::TrackingLost`] only when it cannot fit at all. If the
/// window covers no mass it is returned unchanged with `converged = false`
/// and `mass = 0`.
pub fn mean_shift(
    map: &ProbabilityMap,
    window: Rect,
    criteria: &TerminationCriteria,
) -> Result<MeanShiftOutcome, TrackingError> {
    let (width, height) = (map.width(), map.height());
    let lost = |window: Rect| {
        TrackingError::TrackingLost(LossReason::OutOfFrame {
            window,
            frame_width: width,
            frame_height: height,
        })
    };

    let mut window = window.clamp_into(width, height).ok_or_else(|| lost(window))?;
    let mut outcome = MeanShiftOutcome {
        window,
        iterations: 0,
        converged: false,
        mass: 0,
    };

    while outcome.iterations < criteria.max_iterations {
        outcome.iterations += 1;

        let Some(Centroid { position, mass }) = centroid(map, &window) else {
            outcome.mass = 0;
            outcome.converged = false;
            break;
        };
        outcome.mass = mass;

        let (cx, cy) = window.center();
        let shift = position - Vector2::new(cx, cy);
        let moved = window
            .translate(shift.x.round() as i32, shift.y.round() as i32)
            .clamp_into(width, height)
            .ok_or_else(|| lost(window))?;
        let applied = Vector2::new((moved.x - window.x) as f64, (moved.y - window.y) as f64);
        trace!(
            "mean-shift step {}: {:?} -> {:?} (centroid {:.2}, {:.2})",
            outcome.iterations, window, moved, position.x, position.y
        );
        window = moved;
        outcome.window = window;

        if applied.norm() <= criteria.min_shift {
            outcome.converged = true;
            break;
        }
    }

    Ok(outcome)
}

/// Owns the tracking window and runs [`mean_shift`] once per frame.
#[derive(Debug, Clone)]
pub struct MeanShiftTracker {
    window: Option<Rect>,
    state: TrackState,
    criteria: TerminationCriteria,
}

impl Default for MeanShiftTracker {
    fn default() -> Self {
        Self::new(TerminationCriteria::default())
    }
}

impl MeanShiftTracker {
    pub fn new(criteria: TerminationCriteria) -> Self {
        Self {
            window: None,
            state: TrackState::Idle,
            criteria,
        }
    }

    /// Start tracking from `window`.
    pub fn seed(&mut self, window: Rect) {
        self.window = Some(window);
        self.state = TrackState::Seeded;
    }

    /// Run one frame's worth of iterations.
    ///
    /// On [`TrackingError::TrackingLost`] the tracker drops back to idle.
    pub fn update(&mut self, map: &ProbabilityMap) -> Result<MeanShiftOutcome, TrackingError> {
        let window = self.window.ok_or(TrackingError::NotTracking)?;
        self.state = TrackState::Seeded;

        match mean_shift(map, window, &self.criteria) {
            Ok(outcome) => {
                debug!(
                    "mean-shift {:?} -> {:?} in {} iterations (converged: {})",
                    window, outcome.window, outcome.iterations, outcome.converged
                );
                self.window = Some(outcome.window);
                self.state = TrackState::Converged;
                Ok(outcome)
            }
            Err(err) => {
                self.reset();
                Err(err)
            }
        }
    }

    pub fn reset(&mut self) {
        self.window = None;
        self.state = TrackState::Idle;
    }

    #[inline]
    pub fn state(&self) -> TrackState {
        self.state
    }

    #[inline]
    pub fn window(&self) -> Option<Rect> {
        self.window
    }
}
