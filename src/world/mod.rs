//! World module - 2D stroke-based levels
//!
//! - Polylines the player rolls along
//! - Star markers to collect
//! - At most one player spawn point
//!
//! Everything here is stored in level space (origin at the viewport
//! centre, Y up). Screen space only appears at the input and render edges.

mod geometry;
mod level;
mod transform;

pub use geometry::*;
pub use level::*;
pub use transform::*;
