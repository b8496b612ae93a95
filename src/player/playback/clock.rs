//! Playback clock.
//!
//! Samples host time once per display refresh and turns it into elapsed time
//! for the whole vignette. Each scene gets a fresh sampling loop; the
//! previous loop is cancelled before a new one starts.

use crate::player::schedule::{FrameId, Scheduler, Ticket};

/// Per-scene frame sampler.
#[derive(Debug, Default)]
pub struct PlaybackClock {
    pending: Option<FrameId>,
    scene_start_ms: f64,
    base_elapsed_ms: f64,
    scene_duration_ms: f64,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start sampling a scene.
    ///
    /// `base_elapsed_ms` is the cumulative duration of every earlier scene.
    /// Any sampling loop still outstanding is cancelled first.
    pub fn start(
        &mut self,
        now_ms: f64,
        base_elapsed_ms: f64,
        scene_duration_ms: u64,
        ticket: Ticket,
        scheduler: &mut dyn Scheduler,
    ) {
        self.stop(scheduler);
        self.scene_start_ms = now_ms;
        self.base_elapsed_ms = base_elapsed_ms;
        self.scene_duration_ms = scene_duration_ms as f64;
        self.pending = Some(scheduler.request_frame(ticket));
    }

    /// Cancel the outstanding frame request, if any.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel_frame(id);
        }
    }

    /// True while a frame request is outstanding.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Global elapsed time at `now_ms`.
    ///
    /// Scene time is clamped to `[0, scene duration]`, so a late frame never
    /// overshoots the scene and an early one never undershoots its start.
    pub fn sample(&self, now_ms: f64) -> f64 {
        let scene_elapsed = (now_ms - self.scene_start_ms).clamp(0.0, self.scene_duration_ms);
        self.base_elapsed_ms + scene_elapsed
    }

    /// Keep the sampling loop going for another refresh.
    pub fn request_next(&mut self, ticket: Ticket, scheduler: &mut dyn Scheduler) {
        self.pending = Some(scheduler.request_frame(ticket));
    }
}
