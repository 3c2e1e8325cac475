//! Editor configuration
//!
//! Optional RON file in the user config directory. Anything missing falls
//! back to the defaults below, which match the game's 1280x720 stage.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::editor::DEFAULT_VERTEX_THRESHOLD;
use crate::world::Viewport;

/// Application directory name under the user config directory
const APP_DIR: &str = "moon-level-editor";
const CONFIG_FILE: &str = "config.ron";

/// RGB color, 0-255 per channel
pub type Rgb = [u8; 3];

/// Renderer styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub background: Rgb,
    pub line_color: Rgb,
    pub line_width: f32,
    pub star_color: Rgb,
    pub star_radius: f32,
    pub spawn_color: Rgb,
    pub spawn_radius: f32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            background: [0, 0, 0],
            line_color: [255, 255, 255],
            line_width: 6.0,
            star_color: [255, 255, 0],
            star_radius: 10.0,
            spawn_color: [255, 0, 0],
            spawn_radius: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub viewport: Viewport,
    /// Directory holding `<level-name>.txt` files
    pub levels_dir: String,
    /// Minimum distance between recorded stroke vertices (level units)
    pub vertex_threshold: f32,
    /// Save through a temporary file and rename
    pub atomic_save: bool,
    pub debug_logging: bool,
    pub appearance: Appearance,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            levels_dir: "./src/levels".to_string(),
            vertex_threshold: DEFAULT_VERTEX_THRESHOLD,
            atomic_save: true,
            debug_logging: false,
            appearance: Appearance::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_ron_str(s: &str) -> Result<Self, String> {
        ron::from_str(s).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Location of the config file, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`. A missing or unreadable file gives the defaults.
    ///
    /// Runs before logging is set up, so problems go to stderr.
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_ron_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{} ({}), using defaults", e, path.display());
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                eprintln!("Failed to read config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from the default location
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }
}
