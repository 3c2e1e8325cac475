//! Application loop
//!
//! One frame: drain input events into the session, compose, draw. On quit
//! the session is consumed, encoded once, and written; a failed write can
//! be retried with the same bytes.

use macroquad::prelude::next_frame;
use std::io::{BufRead, Write};
use crate::editor::{compose, EditSession, Renderer, SessionFlow};
use crate::input::{InputEvent, InputState};
use crate::storage::LocalStorage;
use crate::world::{encode_level, save_level_bytes, LevelError};

/// Where and how the finished level is written
#[derive(Debug, Clone)]
pub struct SaveTarget {
    pub path: String,
    pub storage: LocalStorage,
    pub atomic: bool,
}

/// Apply events in arrival order, stopping at the first quit
pub fn drain_events<I>(session: &mut EditSession, events: I) -> SessionFlow
where
    I: IntoIterator<Item = InputEvent>,
{
    for event in events {
        if session.handle(event) == SessionFlow::Quit {
            return SessionFlow::Quit;
        }
    }
    SessionFlow::Continue
}

/// Write `data`, asking `retry` after each failure whether to try again
pub fn save_with_retry<F>(data: &[u8], target: &SaveTarget, mut retry: F) -> Result<(), LevelError>
where
    F: FnMut(&LevelError) -> bool,
{
    loop {
        match save_level_bytes(data, &target.path, &target.storage, target.atomic) {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::error!(path = %target.path, "save failed: {}", e);
                if !retry(&e) {
                    return Err(e);
                }
            }
        }
    }
}

/// Ask a yes/no question on the terminal. EOF or read errors mean no.
pub fn confirm(question: &str) -> bool {
    print!("{} [y/N] ", question);
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(0) | Err(_) => false,
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
    }
}

/// Run the editor until quit, then save
pub async fn run<R: Renderer>(mut session: EditSession, mut renderer: R, target: SaveTarget) {
    let mut input = InputState::new();

    loop {
        if drain_events(&mut session, input.poll()) == SessionFlow::Quit {
            break;
        }
        renderer.draw(&compose(&session));
        next_frame().await;
    }

    let level = session.finish();
    if level.is_empty() {
        tracing::warn!(path = %target.path, "saving an empty level");
    }
    let data = encode_level(&level);
    if target.storage.exists(&target.path) {
        tracing::debug!(path = %target.path, "overwriting existing level");
    }

    match save_with_retry(&data, &target, |e| {
        eprintln!("Could not save {}: {}", target.path, e);
        confirm("Retry saving?")
    }) {
        Ok(()) => tracing::info!(path = %target.path, "saved level: {}", level.summary()),
        Err(_) => eprintln!("Level NOT saved; {} is unchanged", target.path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, PointerButton};
    use crate::world::{Level, Viewport};
    use tempfile::TempDir;

    fn target(dir: &TempDir, path: &str) -> SaveTarget {
        SaveTarget {
            path: path.to_string(),
            storage: LocalStorage::with_base_dir(dir.path()),
            atomic: true,
        }
    }

    #[test]
    fn test_end_to_end_session() {
        let mut session = EditSession::new(Level::new(), Viewport::new(1280.0, 720.0));
        let events = vec![
            InputEvent::PointerDown { button: PointerButton::Primary, x: 640.0, y: 360.0 },
            InputEvent::PointerMove { x: 640.0, y: 340.0 },
            InputEvent::PointerUp { button: PointerButton::Primary },
            InputEvent::PointerDown { button: PointerButton::Tertiary, x: 700.0, y: 360.0 },
            InputEvent::Quit,
        ];

        assert_eq!(drain_events(&mut session, events), SessionFlow::Quit);
        let bytes = encode_level(&session.finish());
        assert_eq!(String::from_utf8(bytes).unwrap(), "l 0.0,0.0 0.0,20.0\np 60.0,0.0\n");
    }

    #[test]
    fn test_drain_stops_at_quit() {
        let mut session = EditSession::new(Level::new(), Viewport::default());
        let events = vec![
            InputEvent::KeyDown(Key::Escape),
            InputEvent::PointerDown { button: PointerButton::Secondary, x: 0.0, y: 0.0 },
        ];

        assert_eq!(drain_events(&mut session, events), SessionFlow::Quit);
        assert!(session.pending_markers().is_empty());
    }

    #[test]
    fn test_drain_continues_without_quit() {
        let mut session = EditSession::new(Level::new(), Viewport::default());
        let events = vec![InputEvent::PointerDown { button: PointerButton::Secondary, x: 0.0, y: 0.0 }];

        assert_eq!(drain_events(&mut session, events), SessionFlow::Continue);
        assert_eq!(session.pending_markers().len(), 1);
    }

    #[test]
    fn test_save_with_retry_writes() {
        let dir = TempDir::new().unwrap();
        let target = target(&dir, "levels/a.txt");

        save_with_retry(b"s 1.0,1.0\n", &target, |_| panic!("no retry expected")).unwrap();
        assert_eq!(target.storage.read("levels/a.txt").unwrap(), b"s 1.0,1.0\n");
    }

    #[test]
    fn test_save_failure_reported_when_declined() {
        let dir = TempDir::new().unwrap();
        // A directory where the level file should go makes every write fail
        std::fs::create_dir_all(dir.path().join("levels/a.txt/child")).unwrap();
        let target = target(&dir, "levels/a.txt");

        let mut asked = 0;
        let result = save_with_retry(b"p 0.0,0.0\n", &target, |_| {
            asked += 1;
            false
        });
        assert!(matches!(result, Err(LevelError::Storage(_))));
        assert_eq!(asked, 1);
    }

    #[test]
    fn test_save_retry_succeeds_after_fix() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("levels/a.txt");
        std::fs::create_dir_all(blocker.join("child")).unwrap();
        let target = target(&dir, "levels/a.txt");

        let result = save_with_retry(b"p 0.0,0.0\n", &target, |_| {
            std::fs::remove_dir_all(&blocker).unwrap();
            true
        });
        assert!(result.is_ok());
        assert_eq!(target.storage.read("levels/a.txt").unwrap(), b"p 0.0,0.0\n");
    }
}
