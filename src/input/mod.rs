//! Input handling
//!
//! The editor core only sees `InputEvent`s. The macroquad-backed poller in
//! `state.rs` turns per-frame device state into that event stream.

mod events;
mod state;

pub use events::*;
pub use state::*;
