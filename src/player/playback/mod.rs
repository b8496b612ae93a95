//! Playback logic for the player.
//!
//! This module handles scene sequencing, per-frame time sampling and
//! progress aggregation.

mod clock;
mod progress;
mod sequencer;

pub use clock::PlaybackClock;
pub use progress::{cumulative_duration_before, global_progress};
pub use sequencer::{Advance, SceneSequencer};
