//! Abstract input events consumed by the editing session

/// Pointer buttons, by role rather than physical position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button - draws strokes
    Primary,
    /// Right mouse button - places stars
    Secondary,
    /// Middle mouse button - places the spawn point
    Tertiary,
}

/// Keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Z,
    X,
    Escape,
}

/// One discrete input event, positions in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { button: PointerButton, x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { button: PointerButton },
    KeyDown(Key),
    /// Window close request; ends the session
    Quit,
}
