//! Headless playback on a virtual clock.
//!
//! Drives a [`PlaybackController`] with a [`ManualClock`]: display refreshes
//! happen on a fixed grid (`frame_interval_ms` apart) and timers fire at
//! their exact deadlines. When a timer and a refresh fall on the same
//! instant, the timer goes first. Used by `vignette simulate` and the tests.

use crate::catalog::SceneCatalog;
use crate::player::controller::PlaybackController;
use crate::player::schedule::{FrameScheduler, ManualClock, TimeSource};
use crate::player::state::PlaybackPhase;

/// Smallest allowed refresh interval.
const MIN_FRAME_INTERVAL_MS: f64 = 1.0;

/// A mounted controller on a virtual clock.
#[derive(Debug)]
pub struct Simulation {
    clock: ManualClock,
    scheduler: FrameScheduler<ManualClock>,
    controller: PlaybackController,
    frame_interval_ms: f64,
    next_frame_ms: f64,
}

impl Simulation {
    /// Mount `catalog` at time 0 with refreshes every `frame_interval_ms`.
    pub fn new(catalog: SceneCatalog, frame_interval_ms: f64) -> Self {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(clock.clone());
        let mut controller = PlaybackController::new(catalog);
        controller.mount(&mut scheduler);

        let frame_interval_ms = if frame_interval_ms.is_finite() {
            frame_interval_ms.max(MIN_FRAME_INTERVAL_MS)
        } else {
            MIN_FRAME_INTERVAL_MS
        };

        Self {
            clock,
            scheduler,
            controller,
            frame_interval_ms,
            next_frame_ms: 0.0,
        }
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn scheduler(&self) -> &FrameScheduler<ManualClock> {
        &self.scheduler
    }

    /// Press replay at the current virtual time.
    pub fn replay(&mut self) {
        self.controller.replay(&mut self.scheduler);
    }

    /// Run every timer and refresh up to and including `target_ms`.
    pub fn advance_to(&mut self, target_ms: f64) {
        self.advance_to_with(target_ms, |_, _| {});
    }

    /// Like [`advance_to`], calling `observe` after every timer batch and
    /// every refresh.
    ///
    /// [`advance_to`]: Simulation::advance_to
    pub fn advance_to_with<F>(&mut self, target_ms: f64, mut observe: F)
    where
        F: FnMut(&FrameScheduler<ManualClock>, &PlaybackController),
    {
        loop {
            let next_timer = self.scheduler.next_deadline().filter(|d| *d <= target_ms);
            let next_frame = Some(self.next_frame_ms).filter(|f| *f <= target_ms);

            match (next_timer, next_frame) {
                (Some(deadline), frame) if frame.map_or(true, |f| deadline <= f) => {
                    self.clock.set(deadline);
                    self.scheduler.run_due_timers(&mut self.controller);
                }
                (_, Some(frame)) => {
                    self.clock.set(frame);
                    self.scheduler.present_frame(&mut self.controller);
                    self.next_frame_ms = frame + self.frame_interval_ms;
                }
                _ => {
                    self.clock.set(target_ms);
                    return;
                }
            }
            observe(&self.scheduler, &self.controller);
        }
    }

    /// Advance until playback stops or `limit_ms` is reached.
    ///
    /// Returns true if playback stopped.
    pub fn run_until_stopped(&mut self, limit_ms: f64) -> bool {
        while self.controller.phase() != PlaybackPhase::Stopped {
            let now = self.now_ms();
            if now >= limit_ms {
                return false;
            }
            self.advance_to((now + self.frame_interval_ms).min(limit_ms));
        }
        true
    }

    /// Tear the controller down.
    pub fn unmount(&mut self) {
        self.controller.unmount(&mut self.scheduler);
    }

    /// True when the scheduler holds no callbacks.
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }
}

/// A phase change observed during a simulated run.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Virtual time of the change
    pub at_ms: f64,
    /// Phase entered
    pub phase: PlaybackPhase,
    /// Global progress right after the change
    pub progress: f64,
}

/// Play `catalog` headless and collect every phase change.
///
/// When `replay_at_ms` is set, replay is pressed at that time (and the run
/// continues until the second session stops). The initial phase is always
/// the first entry.
pub fn record_transitions(
    catalog: SceneCatalog,
    frame_interval_ms: f64,
    replay_at_ms: Option<f64>,
) -> Vec<Transition> {
    let total = catalog.total_duration_ms() as f64;
    let mut sim = Simulation::new(catalog, frame_interval_ms);
    let mut transitions = vec![Transition {
        at_ms: 0.0,
        phase: sim.controller().phase(),
        progress: sim.controller().global_progress(),
    }];

    let record = |sim: &mut Simulation, target_ms: f64, transitions: &mut Vec<Transition>| {
        let clock = sim.clock.clone();
        sim.advance_to_with(target_ms, |_, controller| {
            let now = clock.now_ms();
            let phase = controller.phase();
            let progress = controller.global_progress();
            match transitions.last_mut() {
                Some(last) if last.phase == phase => {
                    // A refresh at the same instant as the change settles its progress
                    if last.at_ms == now {
                        last.progress = progress;
                    }
                }
                _ => transitions.push(Transition {
                    at_ms: now,
                    phase,
                    progress,
                }),
            }
        });
    };

    // Headroom past the nominal end for the final refresh to land
    let slack = sim.frame_interval_ms * 2.0;
    match replay_at_ms {
        Some(replay_at) => {
            let replay_at = replay_at.max(0.0);
            record(&mut sim, replay_at, &mut transitions);
            sim.replay();
            let phase = sim.controller().phase();
            transitions.push(Transition {
                at_ms: sim.now_ms(),
                phase,
                progress: sim.controller().global_progress(),
            });
            record(&mut sim, replay_at + total + slack, &mut transitions);
        }
        None => record(&mut sim, total + slack, &mut transitions),
    }

    transitions
}
