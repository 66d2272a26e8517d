//! Pixel geometry shared by actors, sprite regions and the canvas.
//!
//! All overlap and containment tests use open intervals: two rectangles that
//! only share an edge do not overlap, and a point lying exactly on an edge is
//! outside. Gameplay code relies on this so that sprites placed flush against
//! each other never register a hit.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Negative sizes are clamped to zero.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && other.y < self.bottom()
            && self.y < other.bottom()
    }

    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px > self.x && px < self.right() && py > self.y && py < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// The canvas rectangle anchored at the origin.
    pub fn as_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.w as f32, self.h as f32)
    }
}

/// Clamp a requested canvas dimension into an inclusive `(min, max)` range.
///
/// Without a range the request is taken verbatim. A range with `min > max`
/// resolves to `min` instead of panicking like `u32::clamp` would.
pub fn clamp_dimension(requested: u32, range: Option<(u32, u32)>) -> u32 {
    match range {
        Some((min, max)) => requested.min(max).max(min),
        None => requested,
    }
}
