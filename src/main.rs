//! Simple Level Editor for the moon browser game
//!
//! Draw the polylines the player rolls on, drop stars to collect, and pick
//! the player start point. Levels are saved as line-oriented text under the
//! levels directory, ready for the game runtime to embed.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod config;
mod editor;
mod input;
mod logging;
mod storage;
mod world;

use macroquad::prelude::Conf;
use std::io::{BufRead, Write};
use app::SaveTarget;
use config::EditorConfig;
use editor::{controls_help, EditSession, MacroquadRenderer};
use storage::LocalStorage;
use world::{level_path, open_level, validate_level_name, LevelError};

fn window_conf(config: &EditorConfig, level_name: &str) -> Conf {
    Conf {
        window_title: format!("Simple Level Editor - {}", level_name),
        window_width: config.viewport.width as i32,
        window_height: config.viewport.height as i32,
        // Level space is tied to a fixed viewport
        window_resizable: false,
        ..Default::default()
    }
}

/// Ask for a level name until a valid one is given. None on EOF.
fn prompt_level_name() -> Option<String> {
    let stdin = std::io::stdin();
    loop {
        print!("Enter the name of the level: ");
        let _ = std::io::stdout().flush();

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }
        match validate_level_name(&input) {
            Ok(name) => return Some(name.to_string()),
            Err(msg) => eprintln!("<!> {}", msg),
        }
    }
}

fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = EditorConfig::load();
    logging::init(config.debug_logging);

    println!("=== Simple Level Editor v{} ===", VERSION);
    print!("{}", controls_help());

    let Some(name) = prompt_level_name() else {
        eprintln!("No level name given, exiting");
        std::process::exit(1);
    };
    let path = level_path(&config.levels_dir, &name);
    let storage = LocalStorage::new();

    let opened = match open_level(&path, &storage) {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("Cannot open {}: {}", path, e);
            if matches!(e, LevelError::Format { .. }) {
                eprintln!("The file looks corrupt and was left untouched.");
            }
            std::process::exit(1);
        }
    };
    if opened.created {
        println!("<!> File {} not found, creating a new one", path);
    }
    for warning in &opened.warnings {
        println!("<!> {}", warning);
    }

    let session = EditSession::new(opened.level, config.viewport)
        .with_vertex_threshold(config.vertex_threshold);
    let renderer = MacroquadRenderer::new(config.appearance.clone());
    let target = SaveTarget {
        path,
        storage,
        atomic: config.atomic_save,
    };

    macroquad::Window::from_config(window_conf(&config, &name), app::run(session, renderer, target));
}
