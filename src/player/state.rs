//! Player state management
//!
//! Contains the `PlaybackState` owned by the controller, the read-only
//! `ViewState` handed to renderers, and the `ViewerState` that tracks
//! terminal-side concerns (size, help overlay, redraw flag).

use crate::catalog::SceneDescriptor;

/// Result of processing an input event.
///
/// This enum is returned by input handlers to signal control flow
/// decisions to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Restart the vignette from the first scene
    Replay,
    /// Exit the player
    Quit,
}

/// Coarse playback phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// Playing the scene at this index
    Playing(usize),
    /// Reached the end (or nothing to play)
    Stopped,
}

/// Mutable playback state, owned by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Index of the active scene
    pub current_index: usize,
    /// Elapsed time across the whole vignette, in milliseconds
    pub elapsed_global_ms: f64,
    /// Whether playback is running
    pub is_playing: bool,
}

impl PlaybackState {
    /// State at mount and after replay: first scene, nothing elapsed, playing.
    pub fn initial() -> Self {
        Self {
            current_index: 0,
            elapsed_global_ms: 0.0,
            is_playing: true,
        }
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> PlaybackPhase {
        if self.is_playing {
            PlaybackPhase::Playing(self.current_index)
        } else {
            PlaybackPhase::Stopped
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Render-ready snapshot of the controller.
///
/// Renderers read this and nothing else; it carries no raw timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState<'a> {
    /// Scene on screen, `None` only for an empty catalog
    pub active_scene: Option<&'a SceneDescriptor>,
    /// Fraction of the vignette completed, in `[0, 1]`
    pub global_progress: f64,
    /// Whether playback is running
    pub is_playing: bool,
    /// Position of the active scene
    pub scene_index: usize,
    /// Number of scenes in the catalog
    pub scene_count: usize,
}

/// Terminal-side state for the interactive player.
#[derive(Debug)]
pub struct ViewerState {
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Current terminal width
    pub term_cols: u16,
    /// Current terminal height
    pub term_rows: u16,
    /// True when screen needs to be redrawn
    pub needs_render: bool,
}

impl ViewerState {
    /// Create a new ViewerState for a terminal of the given size.
    pub fn new(term_cols: u16, term_rows: u16) -> Self {
        Self {
            show_help: false,
            term_cols,
            term_rows,
            needs_render: true,
        }
    }

    /// Handle terminal resize event.
    pub fn handle_resize(&mut self, new_cols: u16, new_rows: u16) {
        self.term_cols = new_cols;
        self.term_rows = new_rows;
        self.needs_render = true;
    }

    /// Toggle help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.needs_render = true;
    }
}
