//! TrackerPipeline driving a tracking session from a frame source.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};

use crate::error::TrackingError;
use crate::tracker::{MeanShiftOutcome, Rect, TrackerConfig, TrackingSession};

use super::{FrameSource, RenderSink};

/// Cancellation handle for the tick loop.
///
/// Each new selection or source issues a fresh handle and cancels the old
/// one, so a loop started under a stale handle stops before its next tick.
/// Clones share the same flag and can be sent to other threads.
#[derive(Debug, Clone, Default)]
pub struct TickHandle {
    cancelled: Arc<AtomicBool>,
}

impl TickHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop any pending or future tick issued under this handle.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// A queued selection started a new session on this frame.
    Seeded(Rect),
    /// The window was tracked into this frame.
    Tracked(MeanShiftOutcome),
    /// A queued selection was rejected; the session stays idle.
    Rejected(TrackingError),
    /// The active session lost its window and went idle.
    Lost(TrackingError),
    /// No session is active.
    Idle,
    /// The source has no more frames.
    EndOfStream,
    /// The current handle was cancelled; no frame was read.
    Cancelled,
}

impl TickOutcome {
    /// Whether the loop should stop after this tick.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::EndOfStream | TickOutcome::Cancelled)
    }
}

/// A frame source bundled with a tracking session.
///
/// Each [`tick`](TrackerPipeline::tick) reads one frame, runs the whole
/// pipeline on it and hands the result to a [`RenderSink`]. Ticks are strictly
/// sequential; the window produced by one tick is the input of the next.
pub struct TrackerPipeline<S: FrameSource> {
    source: Option<S>,
    session: TrackingSession,
    pending: Option<Rect>,
    handle: TickHandle,
    frames: u64,
}

impl<S: FrameSource> TrackerPipeline<S> {
    /// Create a new pipeline reading from `source`.
    pub fn new(source: S, config: TrackerConfig) -> Result<Self, TrackingError> {
        Ok(Self {
            source: Some(source),
            session: TrackingSession::new(config)?,
            pending: None,
            handle: TickHandle::new(),
            frames: 0,
        })
    }

    /// Create a new pipeline with default tracker configuration.
    pub fn with_default_config(source: S) -> Self {
        Self {
            source: Some(source),
            session: TrackingSession::with_default_config(),
            pending: None,
            handle: TickHandle::new(),
            frames: 0,
        }
    }

    fn restart(&mut self) -> TickHandle {
        self.handle.cancel();
        self.handle = TickHandle::new();
        self.handle.clone()
    }

    /// Queue a new selection for the next frame read.
    ///
    /// The running session is discarded and the current handle cancelled.
    pub fn select(&mut self, roi: Rect) -> TickHandle {
        debug!("selection {:?} queued", roi);
        self.session.reset();
        self.pending = Some(roi);
        self.restart()
    }

    /// Replace the frame source, tearing down the session.
    pub fn set_source(&mut self, source: S) -> TickHandle {
        self.session.reset();
        self.pending = None;
        self.source = Some(source);
        self.frames = 0;
        self.restart()
    }

    /// Remove the frame source, tearing down the session and cancelling the loop.
    pub fn remove_source(&mut self) -> Option<S> {
        self.handle.cancel();
        self.session.reset();
        self.pending = None;
        self.source.take()
    }

    /// Handle for the current loop.
    pub fn handle(&self) -> TickHandle {
        self.handle.clone()
    }

    /// Run the pipeline on one frame.
    ///
    /// Tracking failures are reported in the outcome; only source errors are
    /// returned as `Err`.
    pub fn tick<R: RenderSink>(&mut self, sink: &mut R) -> Result<TickOutcome, S::Error> {
        if self.handle.is_cancelled() {
            return Ok(TickOutcome::Cancelled);
        }
        let Some(source) = self.source.as_mut() else {
            return Ok(TickOutcome::EndOfStream);
        };
        let Some(frame) = source.next_frame()? else {
            if self.session.is_tracking() || self.pending.is_some() {
                info!("end of stream after {} frames", self.frames);
            }
            self.session.reset();
            self.pending = None;
            return Ok(TickOutcome::EndOfStream);
        };
        self.frames += 1;

        if let Some(roi) = self.pending.take() {
            return Ok(match self.session.select(&frame, roi) {
                Ok(()) => {
                    sink.window(&frame, roi);
                    TickOutcome::Seeded(roi)
                }
                Err(err) => {
                    sink.no_window(&frame);
                    TickOutcome::Rejected(err)
                }
            });
        }

        if !self.session.is_tracking() {
            sink.no_window(&frame);
            return Ok(TickOutcome::Idle);
        }

        Ok(match self.session.track(&frame) {
            Ok(outcome) => {
                sink.window(&frame, outcome.window);
                TickOutcome::Tracked(outcome)
            }
            Err(err) => {
                sink.no_window(&frame);
                TickOutcome::Lost(err)
            }
        })
    }

    /// Tick until the stream ends or the handle is cancelled.
    ///
    /// Returns the terminal outcome.
    pub fn run<R: RenderSink>(&mut self, sink: &mut R) -> Result<TickOutcome, S::Error> {
        loop {
            let outcome = self.tick(sink)?;
            if outcome.is_terminal() {
                return Ok(outcome);
            }
        }
    }

    /// Get a reference to the underlying session.
    pub fn session(&self) -> &TrackingSession {
        &self.session
    }

    /// Get a reference to the frame source, if any.
    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Get a mutable reference to the frame source, if any.
    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }

    /// Frames read from the current source.
    pub fn frames_processed(&self) -> u64 {
        self.frames
    }
}
