//! Level geometry types
//!
//! Plain value types. A `Level` is the unit of persistence; the editor
//! session builds one up and hands it to the codec in `level.rs`.

/// A point in level space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A collectible star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: Point,
}

impl Marker {
    pub fn new(position: Point) -> Self {
        Self { position }
    }
}

/// The player start point. A level holds at most one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub position: Point,
}

impl Spawn {
    pub fn new(position: Point) -> Self {
        Self { position }
    }
}

/// An open polyline, vertices in drawing order
///
/// Never empty. A single-vertex polyline is a stub left by a click without
/// a drag: it is not drawable, but it is kept and saved as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyLine {
    vertices: Vec<Point>,
}

impl PolyLine {
    /// Start a polyline at its first vertex
    pub fn start(first: Point) -> Self {
        Self { vertices: vec![first] }
    }

    /// Build from a vertex list. Returns None for an empty list.
    pub fn from_vertices(vertices: Vec<Point>) -> Option<Self> {
        if vertices.is_empty() {
            None
        } else {
            Some(Self { vertices })
        }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Last recorded vertex (always present)
    pub fn last(&self) -> Point {
        self.vertices[self.vertices.len() - 1]
    }

    pub fn push(&mut self, point: Point) {
        self.vertices.push(point);
    }

    /// Needs at least one segment to be drawn
    pub fn is_drawable(&self) -> bool {
        self.vertices.len() >= 2
    }
}

/// Complete geometry for one stage
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Level {
    pub lines: Vec<PolyLine>,
    pub markers: Vec<Marker>,
    pub spawn: Option<Spawn>,
}

impl Level {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.markers.is_empty() && self.spawn.is_none()
    }

    /// Short summary for logs, e.g. "3 polylines, 2 stars, spawn"
    pub fn summary(&self) -> String {
        format!(
            "{} polylines, {} stars, {}",
            self.lines.len(),
            self.markers.len(),
            if self.spawn.is_some() { "spawn" } else { "no spawn" }
        )
    }
}
