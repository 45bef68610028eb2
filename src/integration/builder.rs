//! Builder turning a drag gesture into a frame-space selection.

use crate::tracker::Rect;

/// Builder for creating a selection `Rect` from a drag gesture.
///
/// Points are given in display coordinates (e.g. client pixels of the canvas
/// showing the video). The builder subtracts the canvas origin and rescales
/// from the displayed size to the frame size.
#[derive(Debug, Clone)]
pub struct SelectionBuilder {
    start: (f32, f32),
    end: (f32, f32),
    origin: (f32, f32),
    scale: (f32, f32),
}

impl Default for SelectionBuilder {
    fn default() -> Self {
        Self {
            start: (0.0, 0.0),
            end: (0.0, 0.0),
            origin: (0.0, 0.0),
            scale: (1.0, 1.0),
        }
    }
}

impl SelectionBuilder {
    /// Create a new selection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point where the drag started.
    pub fn start(mut self, x: f32, y: f32) -> Self {
        self.start = (x, y);
        self
    }

    /// Point where the drag currently is or ended.
    pub fn end(mut self, x: f32, y: f32) -> Self {
        self.end = (x, y);
        self
    }

    /// Top-left corner of the canvas in the same coordinates as the drag.
    pub fn origin(mut self, x: f32, y: f32) -> Self {
        self.origin = (x, y);
        self
    }

    /// Map a canvas shown at `display_w x display_h` onto a `frame_w x frame_h` frame.
    ///
    /// Zero display sizes are ignored and leave the scale unchanged.
    pub fn display_size(
        mut self,
        display_w: f32,
        display_h: f32,
        frame_w: usize,
        frame_h: usize,
    ) -> Self {
        if display_w > 0.0 && display_h > 0.0 {
            self.scale = (frame_w as f32 / display_w, frame_h as f32 / display_h);
        }
        self
    }

    fn to_frame(&self, (x, y): (f32, f32)) -> (i32, i32) {
        (
            ((x - self.origin.0) * self.scale.0).round() as i32,
            ((y - self.origin.1) * self.scale.1).round() as i32,
        )
    }

    /// Build the final `Rect` in frame coordinates.
    ///
    /// The result is not validated against any frame; a zero-length drag
    /// yields an empty rectangle.
    pub fn build(self) -> Rect {
        let (x1, y1) = self.to_frame(self.start);
        let (x2, y2) = self.to_frame(self.end);
        Rect::from_corners(x1, y1, x2, y2)
    }
}
