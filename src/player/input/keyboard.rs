//! Keyboard input handling for the player.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::player::state::{InputResult, ViewerState};

/// Handle a keyboard event.
///
/// While the help overlay is open any key closes it and nothing else
/// happens. Key releases (reported on some platforms) are ignored.
pub fn handle_key_event(key: KeyEvent, viewer: &mut ViewerState) -> InputResult {
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    // Ctrl+C always quits, even with help open
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputResult::Quit;
    }

    if viewer.show_help {
        viewer.show_help = false;
        viewer.needs_render = true;
        return InputResult::Continue;
    }

    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,

        // === Playback ===
        KeyCode::Char('r') | KeyCode::Enter => InputResult::Replay,

        // === Overlays ===
        KeyCode::Char('?') => {
            viewer.toggle_help();
            InputResult::Continue
        }

        _ => InputResult::Continue,
    }
}
