//! Screen space <-> level space
//!
//! Screen space: origin top-left, Y down, pixels.
//! Level space: origin at the viewport centre, Y up.
//! No clamping; points outside the viewport map just as well.

use serde::{Deserialize, Serialize};
use super::Point;

/// Fixed viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }

    /// Screen pixel -> level space
    pub fn to_level(&self, screen_x: f32, screen_y: f32) -> Point {
        Point::new(screen_x - self.half_width(), self.half_height() - screen_y)
    }

    /// Level space -> screen pixel (exact inverse of `to_level`)
    pub fn to_screen(&self, point: Point) -> (f32, f32) {
        (point.x + self.half_width(), self.half_height() - point.y)
    }
}
