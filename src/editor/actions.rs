//! Editor Action Definitions
//!
//! Fixed keyboard bindings and the controls banner shown at startup.

use crate::input::Key;

/// Everything a key press can ask the editor to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorAction {
    /// Remove the most recent line drawn this session
    UndoLine,
    /// Remove the most recent star placed this session
    UndoMarker,
    /// Save and exit
    Quit,
}

impl EditorAction {
    pub fn label(&self) -> &'static str {
        match self {
            EditorAction::UndoLine => "Undo the last line drawn",
            EditorAction::UndoMarker => "Undo the last star drawn",
            EditorAction::Quit => "Exit the program",
        }
    }
}

/// Key binding for each action
pub fn action_for_key(key: Key) -> EditorAction {
    match key {
        Key::Z => EditorAction::UndoLine,
        Key::X => EditorAction::UndoMarker,
        Key::Escape => EditorAction::Quit,
    }
}

/// Controls banner, one control per line
pub fn controls_help() -> String {
    let mut text = String::from("Controls:\n");
    text.push_str("    Left mouse button: Draw a line\n");
    text.push_str("    Middle mouse button: Draw player start point\n");
    text.push_str("    Right mouse button: Draw a star\n");
    for (key_name, key) in [("Z", Key::Z), ("X", Key::X), ("Esc", Key::Escape)] {
        text.push_str(&format!("    {}: {}\n", key_name, action_for_key(key).label()));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(action_for_key(Key::Z), EditorAction::UndoLine);
        assert_eq!(action_for_key(Key::X), EditorAction::UndoMarker);
        assert_eq!(action_for_key(Key::Escape), EditorAction::Quit);
    }

    #[test]
    fn test_controls_help_lists_keys() {
        let help = controls_help();
        assert!(help.contains("Z: Undo the last line drawn"));
        assert!(help.contains("X: Undo the last star drawn"));
        assert!(help.contains("Esc: Exit the program"));
        assert_eq!(help.lines().count(), 7);
    }
}
