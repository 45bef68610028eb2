//! Traits for the collaborators around the tracker: where frames come from
//! and where tracked windows go.

use std::convert::Infallible;

use crate::tracker::{Frame, Rect};

/// Supplies decoded frames in presentation order.
///
/// Implement this to connect any video decoder or capture device.
///
/// # Example
///
/// ```ignore
/// use meanshift_track::{Frame, FrameSource};
///
/// struct MyDecoder {
///     // Your decoder here
/// }
///
/// impl FrameSource for MyDecoder {
///     type Error = std::io::Error;
///
///     fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error> {
///         // Decode the next frame, or return Ok(None) at end of stream
///         Ok(None)
///     }
/// }
/// ```
pub trait FrameSource {
    /// Error type for decoding failures.
    type Error;

    /// Return the next frame, or `None` once the stream has ended.
    fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error>;
}

impl FrameSource for std::vec::IntoIter<Frame> {
    type Error = Infallible;

    fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error> {
        Ok(self.next())
    }
}

/// Receives the result of every tick for display.
pub trait RenderSink {
    /// A window is being tracked on `frame`.
    fn window(&mut self, frame: &Frame, window: Rect);

    /// There is no active window on `frame`.
    fn no_window(&mut self, frame: &Frame);
}
