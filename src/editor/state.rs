//! Editing session state
//!
//! Holds the level loaded from disk (`base`, read-only) and everything
//! added on top of it during this run. Lines and stars have independent
//! undo stacks; undo only ever pops from what this session added.
//!
//! Stroke lifecycle:
//! - Idle -> primary press -> Drawing (stroke seeded with the press point)
//! - Drawing -> motion -> Drawing (vertex appended past the threshold)
//! - Drawing -> primary release -> Idle (stroke moved to pending lines)
//!
//! A stroke that is never released is dropped when the session finishes.

use crate::input::{InputEvent, PointerButton};
use crate::world::{Level, Marker, Point, PolyLine, Spawn, Viewport};
use super::{action_for_key, EditorAction};

/// Minimum level-space distance between recorded stroke vertices
pub const DEFAULT_VERTEX_THRESHOLD: f32 = 5.0;

/// Whether the frame loop should keep going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFlow {
    Continue,
    Quit,
}

/// One editing session, from load to save
#[derive(Debug, Clone)]
pub struct EditSession {
    base: Level,
    pending_lines: Vec<PolyLine>,
    pending_markers: Vec<Marker>,
    /// Overrides the base spawn once set
    spawn: Option<Spawn>,
    /// Stroke being drawn; Some while Drawing
    stroke: Option<PolyLine>,
    viewport: Viewport,
    vertex_threshold: f32,
}

impl EditSession {
    pub fn new(base: Level, viewport: Viewport) -> Self {
        Self {
            base,
            pending_lines: Vec::new(),
            pending_markers: Vec::new(),
            spawn: None,
            stroke: None,
            viewport,
            vertex_threshold: DEFAULT_VERTEX_THRESHOLD,
        }
    }

    pub fn with_vertex_threshold(mut self, threshold: f32) -> Self {
        self.vertex_threshold = threshold;
        self
    }

    pub fn base(&self) -> &Level {
        &self.base
    }

    pub fn pending_lines(&self) -> &[PolyLine] {
        &self.pending_lines
    }

    pub fn pending_markers(&self) -> &[Marker] {
        &self.pending_markers
    }

    /// Spawn that will be saved: this session's, else the base level's
    pub fn effective_spawn(&self) -> Option<Spawn> {
        self.spawn.or(self.base.spawn)
    }

    pub fn stroke(&self) -> Option<&PolyLine> {
        self.stroke.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Apply one input event
    pub fn handle(&mut self, event: InputEvent) -> SessionFlow {
        match event {
            InputEvent::PointerDown { button, x, y } => {
                let at = self.viewport.to_level(x, y);
                match button {
                    PointerButton::Primary => self.begin_stroke(at),
                    PointerButton::Secondary => self.place_marker(at),
                    PointerButton::Tertiary => self.place_spawn(at),
                }
            }
            InputEvent::PointerMove { x, y } => {
                if self.is_drawing() {
                    let to = self.viewport.to_level(x, y);
                    self.extend_stroke(to);
                }
            }
            InputEvent::PointerUp { button: PointerButton::Primary } => self.end_stroke(),
            InputEvent::PointerUp { .. } => {}
            InputEvent::KeyDown(key) => match action_for_key(key) {
                EditorAction::UndoLine => {
                    self.undo_line();
                }
                EditorAction::UndoMarker => {
                    self.undo_marker();
                }
                EditorAction::Quit => return SessionFlow::Quit,
            },
            InputEvent::Quit => return SessionFlow::Quit,
        }
        SessionFlow::Continue
    }

    /// Start a new stroke. An unreleased previous stroke is dropped.
    pub fn begin_stroke(&mut self, at: Point) {
        if self.stroke.is_some() {
            tracing::debug!("stroke restarted before release, dropping previous");
        }
        self.stroke = Some(PolyLine::start(at));
    }

    /// Record a motion sample. Returns true if a vertex was appended.
    pub fn extend_stroke(&mut self, to: Point) -> bool {
        let threshold = self.vertex_threshold;
        match &mut self.stroke {
            Some(stroke) if stroke.last().distance(to) > threshold => {
                stroke.push(to);
                true
            }
            _ => false,
        }
    }

    /// Commit the stroke in progress, if any
    pub fn end_stroke(&mut self) {
        if let Some(stroke) = self.stroke.take() {
            tracing::debug!(vertices = stroke.len(), "line committed");
            self.pending_lines.push(stroke);
        }
    }

    pub fn place_marker(&mut self, at: Point) {
        tracing::debug!(x = at.x, y = at.y, "star placed");
        self.pending_markers.push(Marker::new(at));
    }

    /// Set the spawn; only the latest placement is kept
    pub fn place_spawn(&mut self, at: Point) {
        tracing::debug!(x = at.x, y = at.y, "spawn placed");
        self.spawn = Some(Spawn::new(at));
    }

    /// Pop the last line added this session. No effect while drawing.
    pub fn undo_line(&mut self) -> Option<PolyLine> {
        if self.is_drawing() {
            return None;
        }
        let line = self.pending_lines.pop();
        if line.is_some() {
            tracing::debug!(remaining = self.pending_lines.len(), "undo line");
        }
        line
    }

    /// Pop the last star added this session
    pub fn undo_marker(&mut self) -> Option<Marker> {
        let marker = self.pending_markers.pop();
        if marker.is_some() {
            tracing::debug!(remaining = self.pending_markers.len(), "undo star");
        }
        marker
    }

    /// Base geometry followed by this session's additions
    pub fn merged(&self) -> Level {
        let mut lines = self.base.lines.clone();
        lines.extend(self.pending_lines.iter().cloned());

        let mut markers = self.base.markers.clone();
        markers.extend(self.pending_markers.iter().copied());

        Level {
            lines,
            markers,
            spawn: self.effective_spawn(),
        }
    }

    /// End the session. An unreleased stroke is discarded.
    pub fn finish(self) -> Level {
        if self.stroke.is_some() {
            tracing::debug!("discarding unreleased stroke");
        }
        self.merged()
    }
}
