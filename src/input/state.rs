//! Input state polling
//!
//! macroquad exposes input as per-frame state, not an event queue. This
//! turns each frame's state into `InputEvent`s in a fixed order: motion,
//! pointer buttons, keys, quit.
//!
//! A frame can hold both a press and a release of the same button. Which
//! came first is recovered from whether the button was held at the end of
//! the previous frame: held means release then re-press, otherwise it was a
//! quick tap (press then release).

use macroquad::prelude::*;
use super::{InputEvent, Key, PointerButton};

const BUTTONS: [(MouseButton, PointerButton); 3] = [
    (MouseButton::Left, PointerButton::Primary),
    (MouseButton::Right, PointerButton::Secondary),
    (MouseButton::Middle, PointerButton::Tertiary),
];

const KEYS: [(KeyCode, Key); 3] = [
    (KeyCode::Z, Key::Z),
    (KeyCode::X, Key::X),
    (KeyCode::Escape, Key::Escape),
];

/// One pointer button as seen during a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonFrame {
    pub button: PointerButton,
    /// Held at the end of the previous frame
    pub was_down: bool,
    pub pressed: bool,
    pub released: bool,
}

/// Order one frame's button transitions into events
pub fn button_events(frames: &[ButtonFrame], x: f32, y: f32) -> Vec<InputEvent> {
    let mut events = Vec::new();

    // Releases of held buttons happened before any press this frame
    for frame in frames {
        if frame.was_down && frame.released {
            events.push(InputEvent::PointerUp { button: frame.button });
        }
    }
    for frame in frames {
        if frame.pressed {
            events.push(InputEvent::PointerDown { button: frame.button, x, y });
        }
    }
    // Quick taps
    for frame in frames {
        if !frame.was_down && frame.released {
            events.push(InputEvent::PointerUp { button: frame.button });
        }
    }

    events
}

/// Polls macroquad once per frame and emits events
pub struct InputState {
    last_mouse: Option<(f32, f32)>,
    buttons_down: [bool; BUTTONS.len()],
}

impl InputState {
    /// Takes over the window close button so the session can save first
    pub fn new() -> Self {
        prevent_quit();
        Self {
            last_mouse: None,
            buttons_down: [false; BUTTONS.len()],
        }
    }

    /// Collect this frame's events
    pub fn poll(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let (x, y) = mouse_position();

        if self.last_mouse != Some((x, y)) {
            self.last_mouse = Some((x, y));
            events.push(InputEvent::PointerMove { x, y });
        }

        let mut frames = Vec::with_capacity(BUTTONS.len());
        for (i, (mouse_button, button)) in BUTTONS.into_iter().enumerate() {
            frames.push(ButtonFrame {
                button,
                was_down: self.buttons_down[i],
                pressed: is_mouse_button_pressed(mouse_button),
                released: is_mouse_button_released(mouse_button),
            });
            self.buttons_down[i] = is_mouse_button_down(mouse_button);
        }
        events.extend(button_events(&frames, x, y));

        for (code, key) in KEYS {
            if is_key_pressed(code) {
                events.push(InputEvent::KeyDown(key));
            }
        }

        if is_quit_requested() {
            events.push(InputEvent::Quit);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{EditSession, SessionFlow};
    use crate::world::{Level, Point, PolyLine, Viewport};

    fn primary(was_down: bool, pressed: bool, released: bool) -> ButtonFrame {
        ButtonFrame {
            button: PointerButton::Primary,
            was_down,
            pressed,
            released,
        }
    }

    #[test]
    fn test_quick_tap_is_press_then_release() {
        let events = button_events(&[primary(false, true, true)], 10.0, 20.0);
        assert_eq!(
            events,
            vec![
                InputEvent::PointerDown { button: PointerButton::Primary, x: 10.0, y: 20.0 },
                InputEvent::PointerUp { button: PointerButton::Primary },
            ]
        );
    }

    #[test]
    fn test_held_button_releases_before_repress() {
        let events = button_events(&[primary(true, true, true)], 10.0, 20.0);
        assert_eq!(
            events,
            vec![
                InputEvent::PointerUp { button: PointerButton::Primary },
                InputEvent::PointerDown { button: PointerButton::Primary, x: 10.0, y: 20.0 },
            ]
        );
    }

    #[test]
    fn test_no_transition_no_events() {
        assert!(button_events(&[primary(true, false, false)], 0.0, 0.0).is_empty());
        assert!(button_events(&[primary(false, false, false)], 0.0, 0.0).is_empty());
    }

    #[test]
    fn test_release_and_repress_in_one_frame_keeps_stroke() {
        let mut session = EditSession::new(Level::new(), Viewport::new(1280.0, 720.0));

        // Frame 1: press and drag
        let mut frame1 = button_events(&[primary(false, true, false)], 640.0, 360.0);
        frame1.push(InputEvent::PointerMove { x: 700.0, y: 360.0 });
        for event in frame1 {
            assert_eq!(session.handle(event), SessionFlow::Continue);
        }

        // Frame 2: release and press again before the frame ends
        for event in button_events(&[primary(true, true, true)], 700.0, 360.0) {
            assert_eq!(session.handle(event), SessionFlow::Continue);
        }

        let expected =
            PolyLine::from_vertices(vec![Point::new(0.0, 0.0), Point::new(60.0, 0.0)]).unwrap();
        assert_eq!(session.pending_lines(), &[expected][..]);
        assert!(session.is_drawing());
    }
}
