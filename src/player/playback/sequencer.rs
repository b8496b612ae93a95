//! Scene sequencer.
//!
//! Owns the coarse scene-advance timer: exactly one outstanding timeout per
//! active scene, armed for that scene's duration.

use crate::player::schedule::{Scheduler, Ticket, TimerId};
use crate::player::state::PlaybackState;

/// Outcome of a scene timer elapsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the scene at this index
    Next(usize),
    /// Already on the last scene; nothing changed
    Hold,
}

/// Decides when playback moves to the next scene.
#[derive(Debug, Default)]
pub struct SceneSequencer {
    pending: Option<TimerId>,
}

impl SceneSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the advance timer for the active scene, replacing any pending one.
    pub fn arm(&mut self, duration_ms: u64, ticket: Ticket, scheduler: &mut dyn Scheduler) {
        self.cancel(scheduler);
        self.pending = Some(scheduler.set_timeout(duration_ms as f64, ticket));
    }

    /// Cancel the pending advance timer, if any.
    pub fn cancel(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(id) = self.pending.take() {
            scheduler.clear_timeout(id);
        }
    }

    /// True while an advance timer is outstanding.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle the advance timer for the active scene.
    ///
    /// Moves `current_index` forward by exactly one, or holds on the last
    /// scene. The caller re-arms the timer after a move.
    pub fn on_timer_elapsed(&mut self, state: &mut PlaybackState, scene_count: usize) -> Advance {
        self.pending = None;
        if state.current_index + 1 >= scene_count {
            return Advance::Hold;
        }
        state.current_index += 1;
        Advance::Next(state.current_index)
    }
}
