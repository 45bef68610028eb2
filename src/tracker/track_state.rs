/// Lifecycle of the mean-shift tracking window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// No active window
    #[default]
    Idle,
    /// Window and histogram set, not yet iterated on the current frame
    Seeded,
    /// Iteration finished for the current frame
    Converged,
}

impl TrackState {
    /// Whether a window is held, i.e. tracking can continue on the next frame.
    #[inline]
    pub fn is_active(&self) -> bool {
        !matches!(self, TrackState::Idle)
    }
}
