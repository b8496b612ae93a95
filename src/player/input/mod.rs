//! Input handling for the player.
//!
//! This module handles terminal events, dispatching them to the
//! appropriate handlers and returning control flow signals.

mod keyboard;

pub use keyboard::handle_key_event;

use crossterm::event::Event;

use crate::player::state::{InputResult, ViewerState};

/// Handle any input event, dispatching to the appropriate handler.
///
/// # Arguments
/// * `event` - The crossterm event to handle
/// * `viewer` - Mutable reference to the terminal-side viewer state
///
/// # Returns
/// `InputResult` indicating whether to continue, replay, or quit
pub fn handle_event(event: Event, viewer: &mut ViewerState) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, viewer),
        Event::Resize(new_cols, new_rows) => {
            viewer.handle_resize(new_cols, new_rows);
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore mouse, focus events, etc.
    }
}
