//! Host scheduling for the player.
//!
//! The controller never sleeps or spawns anything itself. It asks a
//! [`Scheduler`] for two kinds of deferred callbacks:
//!
//! - one-shot timers (`set_timeout`), used for scene advances
//! - display-refresh frames (`request_frame`), used for progress sampling
//!
//! Every request carries a [`Ticket`] naming the session generation and
//! scene it was issued for, so a callback that outlives its scene can be
//! recognised and ignored on arrival.
//!
//! [`FrameScheduler`] is the single-threaded host queue. It is generic over a
//! [`TimeSource`]: the interactive player drives it with [`MonotonicClock`],
//! the `simulate` command and the tests drive it with [`ManualClock`].

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Instant;

/// Identifies the session and scene a callback was scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    /// Session generation at the time of scheduling
    pub generation: u64,
    /// Scene that was active at the time of scheduling
    pub scene_index: usize,
}

/// Handle for a pending one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Handle for a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(u64);

/// Deferred-callback services offered by the host.
///
/// Cancelling an id that already fired (or was already cancelled) is a no-op.
pub trait Scheduler {
    /// Current host time in milliseconds.
    fn now_ms(&self) -> f64;
    /// Fire `on_scene_timer(ticket)` once, `delay_ms` from now.
    fn set_timeout(&mut self, delay_ms: f64, ticket: Ticket) -> TimerId;
    /// Cancel a pending timer.
    fn clear_timeout(&mut self, id: TimerId);
    /// Fire `on_frame(ticket, now)` at the next display refresh.
    fn request_frame(&mut self, ticket: Ticket) -> FrameId;
    /// Cancel a pending frame request.
    fn cancel_frame(&mut self, id: FrameId);
}

/// Receiver of the callbacks a [`Scheduler`] dispatches.
pub trait ScheduledCallbacks {
    /// A timer set with `set_timeout` has elapsed.
    fn on_scene_timer(&mut self, ticket: Ticket, scheduler: &mut dyn Scheduler);
    /// A display refresh happened at `now_ms`.
    fn on_frame(&mut self, ticket: Ticket, now_ms: f64, scheduler: &mut dyn Scheduler);
}

/// Source of host time in milliseconds.
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Wall-clock time measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Virtual clock that only moves when told to.
///
/// Clones share the same time, so a driver can keep a handle while the
/// scheduler owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to an absolute time. Moving backwards is ignored.
    pub fn set(&self, now_ms: f64) {
        if now_ms > self.now.get() {
            self.now.set(now_ms);
        }
    }

    /// Move forward by `delta_ms`.
    pub fn advance(&self, delta_ms: f64) {
        self.set(self.now.get() + delta_ms.max(0.0));
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    id: TimerId,
    deadline_ms: f64,
    ticket: Ticket,
}

/// Single-threaded queue of pending timers and frame requests.
#[derive(Debug)]
pub struct FrameScheduler<C> {
    clock: C,
    next_id: u64,
    timers: Vec<PendingTimer>,
    frames: BTreeMap<FrameId, Ticket>,
}

impl<C: TimeSource> FrameScheduler<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            next_id: 0,
            timers: Vec::new(),
            frames: BTreeMap::new(),
        }
    }

    /// The time source driving this scheduler.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<f64> {
        self.timers
            .iter()
            .map(|t| t.deadline_ms)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Number of pending timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of pending frame requests.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// True when nothing is scheduled at all.
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty() && self.frames.is_empty()
    }

    /// Fire every timer whose deadline has passed, earliest first.
    ///
    /// Timers are taken off the queue one at a time, so a callback that
    /// cancels a later timer keeps it from firing. Returns the number fired.
    pub fn run_due_timers(&mut self, target: &mut dyn ScheduledCallbacks) -> usize {
        let mut fired = 0;
        loop {
            let now = self.clock.now_ms();
            let due = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.deadline_ms <= now)
                .min_by(|(_, a), (_, b)| {
                    a.deadline_ms
                        .total_cmp(&b.deadline_ms)
                        .then(a.id.cmp(&b.id))
                })
                .map(|(pos, _)| pos);

            let Some(pos) = due else {
                return fired;
            };
            let timer = self.timers.remove(pos);
            target.on_scene_timer(timer.ticket, self);
            fired += 1;
        }
    }

    /// Dispatch one display refresh.
    ///
    /// Every frame request pending at this point receives the same timestamp;
    /// requests made during dispatch wait for the next refresh. Returns the
    /// number of callbacks run.
    pub fn present_frame(&mut self, target: &mut dyn ScheduledCallbacks) -> usize {
        let now = self.clock.now_ms();
        let ids: Vec<FrameId> = self.frames.keys().copied().collect();
        let mut fired = 0;
        for id in ids {
            // Skip requests cancelled by an earlier callback in this refresh
            if let Some(ticket) = self.frames.remove(&id) {
                target.on_frame(ticket, now, self);
                fired += 1;
            }
        }
        fired
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl<C: TimeSource> Scheduler for FrameScheduler<C> {
    fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    fn set_timeout(&mut self, delay_ms: f64, ticket: Ticket) -> TimerId {
        let id = TimerId(self.allocate_id());
        let deadline_ms = self.clock.now_ms() + delay_ms.max(0.0);
        self.timers.push(PendingTimer {
            id,
            deadline_ms,
            ticket,
        });
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }

    fn request_frame(&mut self, ticket: Ticket) -> FrameId {
        let id = FrameId(self.allocate_id());
        self.frames.insert(id, ticket);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.frames.remove(&id);
    }
}
