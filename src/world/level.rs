//! Level loading and saving
//!
//! Levels are plain UTF-8 text, one record per line:
//!
//! ```text
//! l <x1>,<y1> <x2>,<y2> ...   polyline
//! s <x>,<y>                   star marker
//! p <x>,<y>                   player spawn
//! ```
//!
//! Coordinates are level space with one decimal digit. Blank lines and
//! `#` comments are ignored, unknown tags are skipped. Malformed
//! coordinates fail the whole decode: a damaged level must never load as
//! truncated geometry.
//!
//! Output order is fixed (lines, then stars, then spawn); the game runtime
//! reads it in that order.

use std::fmt;
use super::{Level, Marker, Point, PolyLine, Spawn};
use crate::storage::{LocalStorage, StorageError};

/// Validation limits to reject garbage coordinates
pub mod limits {
    /// Maximum coordinate magnitude
    pub const MAX_COORD: f32 = 1_000_000.0;
}

/// Extension of level files inside the levels directory
pub const LEVEL_EXTENSION: &str = "txt";

/// Error type for level loading and saving
#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    /// Malformed level text. `line` is 1-based; 0 means the whole input.
    Format { line: usize, message: String },
    /// Reading or writing the level file failed
    Storage(StorageError),
}

impl From<StorageError> for LevelError {
    fn from(e: StorageError) -> Self {
        LevelError::Storage(e)
    }
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Format { line: 0, message } => write!(f, "Format error: {}", message),
            LevelError::Format { line, message } => {
                write!(f, "Format error on line {}: {}", line, message)
            }
            LevelError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for LevelError {}

/// Non-fatal conditions found while decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeWarning {
    /// A second `p` record; only the first spawn is kept
    DuplicateSpawn { line: usize },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeWarning::DuplicateSpawn { line } => {
                write!(f, "line {}: multiple player start points found, ignored", line)
            }
        }
    }
}

/// Result of a successful decode
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedLevel {
    pub level: Level,
    pub warnings: Vec<DecodeWarning>,
}

/// Record kinds, keyed by their two-character tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    Polyline,
    Marker,
    Spawn,
}

impl RecordKind {
    const fn tag(self) -> &'static str {
        match self {
            RecordKind::Polyline => "l ",
            RecordKind::Marker => "s ",
            RecordKind::Spawn => "p ",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "l " => Some(RecordKind::Polyline),
            "s " => Some(RecordKind::Marker),
            "p " => Some(RecordKind::Spawn),
            _ => None,
        }
    }
}

/// One decoded line of a level file
#[derive(Debug, Clone, PartialEq)]
enum Record {
    Polyline(PolyLine),
    Markers(Vec<Point>),
    Spawn(Point),
}

fn format_error(line: usize, message: impl Into<String>) -> LevelError {
    LevelError::Format { line, message: message.into() }
}

/// Check if a coordinate is usable (not NaN/Inf, within limits)
fn is_valid_coord(v: f32) -> bool {
    v.is_finite() && v.abs() <= limits::MAX_COORD
}

/// Parse one `x,y` token
fn parse_pair(token: &str, line: usize) -> Result<Point, LevelError> {
    let mut parts = token.split(',');
    let (Some(xs), Some(ys), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format_error(line, format!("expected `x,y`, found `{}`", token)));
    };

    let parse = |s: &str| -> Result<f32, LevelError> {
        let v: f32 = s
            .parse()
            .map_err(|_| format_error(line, format!("invalid number `{}` in `{}`", s, token)))?;
        if !is_valid_coord(v) {
            return Err(format_error(line, format!("coordinate out of range: `{}`", s)));
        }
        Ok(v)
    };

    Ok(Point::new(parse(xs)?, parse(ys)?))
}

/// Classify and parse a single line. `Ok(None)` means the line is skipped.
fn parse_record(raw: &str, line: usize) -> Result<Option<Record>, LevelError> {
    let text = raw.trim();
    if text.is_empty() || text.starts_with('#') || text.len() < 3 {
        return Ok(None);
    }

    let Some(kind) = text.get(..2).and_then(RecordKind::from_tag) else {
        tracing::debug!(line, "skipping record with unknown tag");
        return Ok(None);
    };

    let points = text[2..]
        .split_whitespace()
        .map(|token| parse_pair(token, line))
        .collect::<Result<Vec<_>, _>>()?;

    let record = match kind {
        RecordKind::Polyline => match PolyLine::from_vertices(points) {
            Some(polyline) => Record::Polyline(polyline),
            None => return Ok(None),
        },
        RecordKind::Marker => Record::Markers(points),
        RecordKind::Spawn => match points.as_slice() {
            [position] => Record::Spawn(*position),
            _ => {
                return Err(format_error(
                    line,
                    format!("spawn needs exactly one coordinate pair, found {}", points.len()),
                ))
            }
        },
    };
    Ok(Some(record))
}

/// Decode level file bytes
pub fn decode_level(bytes: &[u8]) -> Result<DecodedLevel, LevelError> {
    let contents = std::str::from_utf8(bytes)
        .map_err(|e| format_error(0, format!("invalid UTF-8: {}", e)))?;

    let mut decoded = DecodedLevel::default();

    for (idx, raw) in contents.split('\n').enumerate() {
        let line = idx + 1;
        match parse_record(raw, line)? {
            None => {}
            Some(Record::Polyline(polyline)) => decoded.level.lines.push(polyline),
            Some(Record::Markers(points)) => {
                decoded.level.markers.extend(points.into_iter().map(Marker::new));
            }
            Some(Record::Spawn(position)) => {
                if decoded.level.spawn.is_some() {
                    let warning = DecodeWarning::DuplicateSpawn { line };
                    tracing::warn!("{}", warning);
                    decoded.warnings.push(warning);
                } else {
                    decoded.level.spawn = Some(Spawn::new(position));
                }
            }
        }
    }

    Ok(decoded)
}

/// Format a coordinate to the file's one-decimal precision
fn format_coord(v: f32) -> String {
    let s = format!("{:.1}", v);
    // Values that round to zero from below would otherwise print as "-0.0"
    if s == "-0.0" {
        "0.0".to_string()
    } else {
        s
    }
}

fn format_point(p: Point) -> String {
    format!("{},{}", format_coord(p.x), format_coord(p.y))
}

/// Encode a level to file bytes
///
/// Precision beyond one decimal digit is dropped.
pub fn encode_level(level: &Level) -> Vec<u8> {
    let mut out = String::new();

    for line in &level.lines {
        out.push_str(RecordKind::Polyline.tag());
        let coords: Vec<String> = line.vertices().iter().map(|v| format_point(*v)).collect();
        out.push_str(&coords.join(" "));
        out.push('\n');
    }

    for marker in &level.markers {
        out.push_str(RecordKind::Marker.tag());
        out.push_str(&format_point(marker.position));
        out.push('\n');
    }

    if let Some(spawn) = &level.spawn {
        out.push_str(RecordKind::Spawn.tag());
        out.push_str(&format_point(spawn.position));
        out.push('\n');
    }

    out.into_bytes()
}

// ─────────────────────────────────────────────────────────────────────────────
// Storage-aware methods
// ─────────────────────────────────────────────────────────────────────────────

/// A level opened for editing
#[derive(Debug, Clone, PartialEq)]
pub struct OpenedLevel {
    pub level: Level,
    pub warnings: Vec<DecodeWarning>,
    /// The file did not exist and an empty placeholder was written
    pub created: bool,
}

/// Open a level file, creating an empty placeholder if it does not exist
///
/// Any failure other than "not found" is returned untouched; in particular
/// a corrupt file is reported and never replaced here.
pub fn open_level(path: &str, storage: &LocalStorage) -> Result<OpenedLevel, LevelError> {
    match storage.read(path) {
        Ok(bytes) => {
            let decoded = decode_level(&bytes)?;
            tracing::info!(path, "loaded level: {}", decoded.level.summary());
            Ok(OpenedLevel {
                level: decoded.level,
                warnings: decoded.warnings,
                created: false,
            })
        }
        Err(e) if e.is_not_found() => {
            tracing::info!(path, "level not found, creating a new one");
            storage.write(path, b"")?;
            Ok(OpenedLevel {
                level: Level::new(),
                warnings: Vec::new(),
                created: true,
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Save already-encoded level bytes
pub fn save_level_bytes(
    data: &[u8],
    path: &str,
    storage: &LocalStorage,
    atomic: bool,
) -> Result<(), LevelError> {
    if atomic {
        storage.write_atomic(path, data)?;
    } else {
        storage.write(path, data)?;
    }
    Ok(())
}

/// Path of a named level inside the levels directory
pub fn level_path(levels_dir: &str, name: &str) -> String {
    if levels_dir.is_empty() {
        return format!("{}.{}", name, LEVEL_EXTENSION);
    }
    // The filesystem root keeps its single slash
    let dir = levels_dir.trim_end_matches('/');
    format!("{}/{}.{}", dir, name, LEVEL_EXTENSION)
}

/// Validate a level name typed by the user, returning it trimmed
pub fn validate_level_name(name: &str) -> Result<&str, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("level name cannot be empty".to_string());
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(format!("level name `{}` must not contain a path", name));
    }
    Ok(name)
}
