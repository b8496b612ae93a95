//! Playback controller
//!
//! Composition root of the player: wires the scene sequencer, the frame
//! clock and the progress aggregator around one `PlaybackState`, and owns
//! the termination policy.
//!
//! # Sessions and tickets
//!
//! Every activation (mount, scene advance, replay) bumps a session
//! generation and schedules one scene timer plus one frame loop under a
//! [`Ticket`] carrying that generation. Stopping and unmounting bump it too.
//! Outstanding callbacks are cancelled on each bump, and any callback that
//! still arrives with an old ticket is ignored, so a superseded scene can
//! never advance or rewind playback.
//!
//! # State machine
//!
//! ```text
//! Playing(0) -> Playing(1) -> ... -> Playing(N-1) -> Stopped
//!      ^                                                |
//!      +------------------- replay() -------------------+
//! ```

use crate::catalog::{SceneCatalog, SceneDescriptor};
use crate::player::playback::{
    cumulative_duration_before, global_progress, Advance, PlaybackClock, SceneSequencer,
};
use crate::player::schedule::{ScheduledCallbacks, Scheduler, Ticket};
use crate::player::state::{PlaybackPhase, PlaybackState, ViewState};

/// Drives a vignette through its scenes.
#[derive(Debug)]
pub struct PlaybackController {
    catalog: SceneCatalog,
    state: PlaybackState,
    generation: u64,
    sequencer: SceneSequencer,
    clock: PlaybackClock,
}

impl PlaybackController {
    /// Create a controller for `catalog`. Nothing is scheduled until [`mount`].
    ///
    /// [`mount`]: PlaybackController::mount
    pub fn new(catalog: SceneCatalog) -> Self {
        let mut state = PlaybackState::initial();
        state.is_playing = !catalog.is_empty();
        Self {
            catalog,
            state,
            generation: 0,
            sequencer: SceneSequencer::new(),
            clock: PlaybackClock::new(),
        }
    }

    /// Start the first session.
    pub fn mount(&mut self, scheduler: &mut dyn Scheduler) {
        self.restart(scheduler);
    }

    /// Cancel everything outstanding and invalidate every issued ticket.
    pub fn unmount(&mut self, scheduler: &mut dyn Scheduler) {
        self.cancel_outstanding(scheduler);
        self.generation = self.generation.wrapping_add(1);
        tracing::debug!(generation = self.generation, "playback unmounted");
    }

    /// Restart from the first scene. Safe to call in any state.
    pub fn replay(&mut self, scheduler: &mut dyn Scheduler) {
        tracing::debug!(from = ?self.state.phase(), "replay requested");
        self.restart(scheduler);
    }

    /// The scenes being played.
    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    /// Current playback state.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> PlaybackPhase {
        self.state.phase()
    }

    /// Current session generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fraction of the vignette completed, in `[0, 1]`.
    pub fn global_progress(&self) -> f64 {
        global_progress(
            self.state.elapsed_global_ms,
            self.catalog.total_duration_ms(),
        )
    }

    /// Snapshot for the rendering backend.
    pub fn view(&self) -> ViewState<'_> {
        let active_scene: Option<&SceneDescriptor> =
            self.catalog.scene_or_last(self.state.current_index);
        ViewState {
            active_scene,
            global_progress: self.global_progress(),
            is_playing: self.state.is_playing,
            scene_index: self
                .state
                .current_index
                .min(self.catalog.last_index().unwrap_or(0)),
            scene_count: self.catalog.len(),
        }
    }

    fn restart(&mut self, scheduler: &mut dyn Scheduler) {
        self.cancel_outstanding(scheduler);
        self.state = PlaybackState::initial();
        if self.catalog.is_empty() {
            self.state.is_playing = false;
            self.generation = self.generation.wrapping_add(1);
            tracing::debug!("empty catalog, nothing to play");
            return;
        }
        self.activate(scheduler);
    }

    /// Open a new session for the current scene: one advance timer, one
    /// sampling loop, both under a fresh ticket.
    fn activate(&mut self, scheduler: &mut dyn Scheduler) {
        let Some(last) = self.catalog.last_index() else {
            return;
        };
        if self.state.current_index > last {
            tracing::error!(
                index = self.state.current_index,
                last,
                "current scene index out of range, clamping"
            );
            self.state.current_index = last;
        }

        self.generation = self.generation.wrapping_add(1);
        let index = self.state.current_index;
        let ticket = Ticket {
            generation: self.generation,
            scene_index: index,
        };
        let duration_ms = self
            .catalog
            .get(index)
            .map(|scene| scene.duration_ms)
            .unwrap_or(0);
        let base_ms = cumulative_duration_before(&self.catalog, index) as f64;

        self.sequencer.arm(duration_ms, ticket, scheduler);
        self.clock
            .start(scheduler.now_ms(), base_ms, duration_ms, ticket, scheduler);

        tracing::debug!(
            generation = self.generation,
            scene = index,
            duration_ms,
            "scene activated"
        );
    }

    fn cancel_outstanding(&mut self, scheduler: &mut dyn Scheduler) {
        self.sequencer.cancel(scheduler);
        self.clock.stop(scheduler);
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.state.is_playing
            && ticket.generation == self.generation
            && ticket.scene_index == self.state.current_index
    }

    /// Stop once the last scene has run its full length.
    fn check_termination(&mut self, scheduler: &mut dyn Scheduler) {
        let Some(last) = self.catalog.last_index() else {
            return;
        };
        let total_ms = self.catalog.total_duration_ms() as f64;
        if self.state.is_playing
            && self.state.current_index == last
            && self.state.elapsed_global_ms >= total_ms
        {
            self.state.is_playing = false;
            self.cancel_outstanding(scheduler);
            self.generation = self.generation.wrapping_add(1);
            tracing::debug!(elapsed_ms = self.state.elapsed_global_ms, "playback finished");
        }
    }
}

impl ScheduledCallbacks for PlaybackController {
    fn on_scene_timer(&mut self, ticket: Ticket, scheduler: &mut dyn Scheduler) {
        if !self.is_current(ticket) {
            tracing::trace!(?ticket, generation = self.generation, "ignoring stale scene timer");
            return;
        }

        match self
            .sequencer
            .on_timer_elapsed(&mut self.state, self.catalog.len())
        {
            Advance::Next(index) => {
                tracing::debug!(scene = index, "advancing to next scene");
                self.activate(scheduler);
            }
            Advance::Hold => {
                tracing::trace!(scene = self.state.current_index, "last scene, holding");
            }
        }
        self.check_termination(scheduler);
    }

    fn on_frame(&mut self, ticket: Ticket, now_ms: f64, scheduler: &mut dyn Scheduler) {
        if !self.is_current(ticket) {
            tracing::trace!(?ticket, generation = self.generation, "ignoring stale frame");
            return;
        }

        let total_ms = self.catalog.total_duration_ms() as f64;
        let sampled = self.clock.sample(now_ms).min(total_ms);
        if sampled > self.state.elapsed_global_ms {
            self.state.elapsed_global_ms = sampled;
        }

        self.clock.request_next(ticket, scheduler);
        self.check_termination(scheduler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SceneDescriptor;
    use crate::player::schedule::{FrameScheduler, ManualClock};
    use crate::player::simulate::Simulation;

    fn catalog(durations: &[u64]) -> SceneCatalog {
        let scenes = durations
            .iter()
            .enumerate()
            .map(|(i, &d)| SceneDescriptor::new(format!("s{i}"), format!("Scene {i}"), "", d))
            .collect();
        SceneCatalog::new(scenes).unwrap()
    }

    fn assert_progress(sim: &Simulation, expected: f64) {
        let actual = sim.controller().global_progress();
        assert!(
            (actual - expected).abs() < 0.001,
            "expected progress {expected}, got {actual}"
        );
    }

    #[test]
    fn two_scene_example_timeline() {
        let mut sim = Simulation::new(catalog(&[1000, 500]), 100.0);

        sim.advance_to(0.0);
        assert_eq!(sim.controller().phase(), PlaybackPhase::Playing(0));
        assert_progress(&sim, 0.0);

        sim.advance_to(999.0);
        assert_eq!(sim.controller().phase(), PlaybackPhase::Playing(0));

        sim.advance_to(1000.0);
        assert_eq!(sim.controller().phase(), PlaybackPhase::Playing(1));
        assert_progress(&sim, 0.667);

        sim.advance_to(1500.0);
        assert_eq!(sim.controller().phase(), PlaybackPhase::Stopped);
        assert_progress(&sim, 1.0);

        sim.replay();
        assert_eq!(sim.controller().phase(), PlaybackPhase::Playing(0));
        assert_progress(&sim, 0.0);
    }

    #[test]
    fn single_scene_goes_straight_to_stopped() {
        let mut sim = Simulation::new(catalog(&[1000]), 50.0);
        let mut seen = Vec::new();
        sim.advance_to_with(2000.0, |_, c| {
            if seen.last() != Some(&c.phase()) {
                seen.push(c.phase());
            }
        });
        assert_eq!(
            seen,
            vec![PlaybackPhase::Playing(0), PlaybackPhase::Stopped]
        );
    }

    #[test]
    fn empty_catalog_arms_nothing() {
        let mut scheduler = FrameScheduler::new(ManualClock::new());
        let mut controller = PlaybackController::new(catalog(&[]));
        controller.mount(&mut scheduler);

        assert!(scheduler.is_idle());
        assert_eq!(controller.global_progress(), 0.0);
        assert_eq!(controller.phase(), PlaybackPhase::Stopped);
        assert!(controller.view().active_scene.is_none());

        controller.replay(&mut scheduler);
        assert!(scheduler.is_idle());
        assert_eq!(controller.phase(), PlaybackPhase::Stopped);
    }

    #[test]
    fn elapsed_is_monotonic_and_bounded() {
        let cat = catalog(&[700, 300, 450]);
        let total = cat.total_duration_ms() as f64;
        let mut sim = Simulation::new(cat, 16.0);
        let mut last = 0.0;
        sim.advance_to_with(3000.0, |_, c| {
            let state = c.state();
            assert!(state.elapsed_global_ms >= last, "elapsed went backwards");
            assert!(state.elapsed_global_ms <= total);
            let progress = c.global_progress();
            assert!((0.0..=1.0).contains(&progress));
            last = state.elapsed_global_ms;
        });
        assert_eq!(sim.controller().state().elapsed_global_ms, total);
    }

    #[test]
    fn index_never_skips() {
        let mut sim = Simulation::new(catalog(&[100, 100, 100, 100]), 33.0);
        let mut last = 0usize;
        sim.advance_to_with(1000.0, |_, c| {
            let index = c.state().current_index;
            assert!(index == last || index == last + 1, "jumped {last} -> {index}");
            last = index;
        });
        assert_eq!(last, 3);
    }

    #[test]
    fn stays_stopped_until_replay() {
        let mut sim = Simulation::new(catalog(&[200, 200]), 20.0);
        sim.advance_to(400.0);
        assert_eq!(sim.controller().phase(), PlaybackPhase::Stopped);
        assert!(sim.scheduler().is_idle());

        sim.advance_to(5000.0);
        assert_eq!(sim.controller().phase(), PlaybackPhase::Stopped);
        assert_eq!(sim.controller().state().current_index, 1);
        assert_eq!(sim.controller().state().elapsed_global_ms, 400.0);
    }

    #[test]
    fn replay_resets_from_any_state() {
        let mut sim = Simulation::new(catalog(&[300, 300, 300]), 25.0);
        for stop_at in [0.0, 150.0, 450.0, 899.0, 2000.0] {
            sim.advance_to(sim.now_ms().max(stop_at));
            sim.replay();
            assert_eq!(sim.controller().state(), &PlaybackState::initial());
            assert_eq!(sim.scheduler().pending_timers(), 1);
            assert_eq!(sim.scheduler().pending_frames(), 1);
        }
    }

    #[test]
    fn replay_twice_is_equivalent_to_once() {
        let mut sim = Simulation::new(catalog(&[300, 300]), 25.0);
        sim.replay();
        sim.replay();
        assert_eq!(sim.controller().state(), &PlaybackState::initial());
        assert_eq!(sim.scheduler().pending_timers(), 1);
        assert_eq!(sim.scheduler().pending_frames(), 1);
    }

    #[test]
    fn replay_after_stop_plays_again() {
        let mut sim = Simulation::new(catalog(&[100, 100]), 10.0);
        sim.advance_to(200.0);
        assert_eq!(sim.controller().phase(), PlaybackPhase::Stopped);

        sim.replay();
        let replayed_at = sim.now_ms();
        sim.advance_to(replayed_at + 100.0);
        assert_eq!(sim.controller().phase(), PlaybackPhase::Playing(1));
        sim.advance_to(replayed_at + 200.0);
        assert_eq!(sim.controller().phase(), PlaybackPhase::Stopped);
    }

    #[test]
    fn stale_timer_from_previous_session_is_ignored() {
        let mut scheduler = FrameScheduler::new(ManualClock::new());
        let mut controller = PlaybackController::new(catalog(&[1000, 1000, 1000]));
        controller.mount(&mut scheduler);
        let stale = Ticket {
            generation: controller.generation(),
            scene_index: 0,
        };

        controller.replay(&mut scheduler);
        controller.on_scene_timer(stale, &mut scheduler);

        assert_eq!(controller.state(), &PlaybackState::initial());
    }

    #[test]
    fn stale_frame_for_other_scene_is_ignored() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(clock.clone());
        let mut controller = PlaybackController::new(catalog(&[1000, 1000]));
        controller.mount(&mut scheduler);
        let scene0 = Ticket {
            generation: controller.generation(),
            scene_index: 0,
        };

        clock.set(1000.0);
        scheduler.run_due_timers(&mut controller);
        assert_eq!(controller.phase(), PlaybackPhase::Playing(1));

        let before = controller.state().clone();
        controller.on_frame(scene0, 1500.0, &mut scheduler);
        controller.on_scene_timer(scene0, &mut scheduler);
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn callbacks_after_stop_do_not_resurrect_playback() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(clock.clone());
        let mut controller = PlaybackController::new(catalog(&[100]));
        controller.mount(&mut scheduler);
        let ticket = Ticket {
            generation: controller.generation(),
            scene_index: 0,
        };

        clock.set(100.0);
        scheduler.run_due_timers(&mut controller);
        scheduler.present_frame(&mut controller);
        assert_eq!(controller.phase(), PlaybackPhase::Stopped);

        controller.on_frame(ticket, 150.0, &mut scheduler);
        controller.on_scene_timer(ticket, &mut scheduler);
        assert_eq!(controller.phase(), PlaybackPhase::Stopped);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn unmount_cancels_everything() {
        let mut scheduler = FrameScheduler::new(ManualClock::new());
        let mut controller = PlaybackController::new(catalog(&[100, 100]));
        controller.mount(&mut scheduler);
        assert!(!scheduler.is_idle());

        let ticket = Ticket {
            generation: controller.generation(),
            scene_index: 0,
        };
        controller.unmount(&mut scheduler);
        assert!(scheduler.is_idle());

        controller.on_scene_timer(ticket, &mut scheduler);
        assert_eq!(controller.state().current_index, 0);
    }

    #[test]
    fn timer_on_last_scene_holds_until_sampler_catches_up() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(clock.clone());
        let mut controller = PlaybackController::new(catalog(&[100, 100]));
        controller.mount(&mut scheduler);

        clock.set(100.0);
        scheduler.run_due_timers(&mut controller);
        clock.set(200.0);
        scheduler.run_due_timers(&mut controller);

        // Timer held on the last scene; no frame has sampled the end yet
        assert_eq!(controller.phase(), PlaybackPhase::Playing(1));
        assert_eq!(scheduler.pending_timers(), 0);

        scheduler.present_frame(&mut controller);
        assert_eq!(controller.phase(), PlaybackPhase::Stopped);
    }

    #[test]
    fn late_frame_reaches_scene_end_before_advance() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(clock.clone());
        let mut controller = PlaybackController::new(catalog(&[1000, 500]));
        controller.mount(&mut scheduler);

        // Frame delivered late, after the scene timer's deadline but before it fires
        clock.set(1200.0);
        scheduler.present_frame(&mut controller);
        assert_eq!(controller.state().elapsed_global_ms, 1000.0);
        assert_eq!(controller.phase(), PlaybackPhase::Playing(0));

        scheduler.run_due_timers(&mut controller);
        assert_eq!(controller.phase(), PlaybackPhase::Playing(1));
    }

    #[test]
    fn view_exposes_active_scene_and_position() {
        let mut sim = Simulation::new(catalog(&[100, 100]), 10.0);
        sim.advance_to(150.0);
        let view = sim.controller().view();
        assert_eq!(view.active_scene.map(|s| s.id.as_str()), Some("s1"));
        assert_eq!(view.scene_index, 1);
        assert_eq!(view.scene_count, 2);
        assert!(view.is_playing);
        assert!((view.global_progress - 0.75).abs() < 0.001);
    }

    #[test]
    fn only_one_timer_and_frame_outstanding_while_playing() {
        let mut sim = Simulation::new(catalog(&[120, 80, 200]), 16.0);
        sim.advance_to_with(399.0, |scheduler, c| {
            if c.state().is_playing {
                assert!(scheduler.pending_timers() <= 1);
                assert!(scheduler.pending_frames() <= 1);
            }
        });
    }
}
