//! Level Editor
//!
//! Stroke-based 2D editing on top of a level loaded from disk:
//! - Left drag draws a polyline
//! - Right click drops a star, middle click moves the spawn
//! - Separate undo for lines and stars
//!
//! Geometry already on disk is never modified; new geometry is appended
//! when the session finishes.

mod actions;
mod compose;
mod render;
mod state;

pub use actions::*;
pub use compose::*;
pub use render::*;
pub use state::*;
