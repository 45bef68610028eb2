//! Drawing the tracked window onto a frame.

use serde::{Deserialize, Serialize};

use crate::tracker::{Frame, Rect};

/// Rectangle outline style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Outline {
    /// RGBA color
    pub color: [u8; 4],
    /// Line thickness in pixels, drawn inward from the window edge
    pub thickness: u32,
}

impl Default for Outline {
    fn default() -> Self {
        Self {
            color: [255, 0, 0, 255],
            thickness: 2,
        }
    }
}

/// Copy of `frame` with `window` outlined. Parts outside the frame are clipped.
pub fn draw_outline(frame: &Frame, window: Rect, outline: &Outline) -> Frame {
    let mut out = frame.clone();
    if window.is_empty() || outline.thickness == 0 {
        return out;
    }
    let t = (outline.thickness.min(i32::MAX as u32) as i32)
        .min(window.width)
        .min(window.height);

    let edges = [
        Rect::new(window.x, window.y, window.width, t),
        Rect::new(window.x, window.y.saturating_add(window.height - t), window.width, t),
        Rect::new(window.x, window.y, t, window.height),
        Rect::new(window.x.saturating_add(window.width - t), window.y, t, window.height),
    ];
    for edge in &edges {
        out.fill_rect(edge, outline.color);
    }
    out
}
