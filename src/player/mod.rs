//! Scene playback.
//!
//! Plays a [`SceneCatalog`](crate::catalog::SceneCatalog) scene by scene,
//! tracking elapsed time across the whole vignette.
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `controller`: `PlaybackController`, the state machine that owns scene
//!   timers and the frame sampler
//! - `schedule`: the host seam (`Scheduler`, `ScheduledCallbacks`) and the
//!   `FrameScheduler` that dispatches timers and refreshes
//! - `playback/`: sequencer, clock and progress arithmetic
//! - `state`: `PlaybackState`, `ViewState` and terminal-side `ViewerState`
//! - `simulate`: deterministic runs against a manual clock
//! - `input/`: keyboard handling
//! - `render/`: stage, caption, progress bar, footer and help overlay
//!
//! # Usage
//!
//! ```no_run
//! use vignette::catalog::SceneCatalog;
//! use vignette::player::{play_vignette, PlayOptions, PlaybackOutcome};
//!
//! let outcome = play_vignette(SceneCatalog::builtin(), &PlayOptions::default()).unwrap();
//! if outcome == PlaybackOutcome::Interrupted {
//!     println!("Stopped early");
//! }
//! ```

pub mod controller;
pub(crate) mod input;
mod native;
pub mod playback;
pub mod render;
pub mod schedule;
pub mod simulate;
pub mod state;

pub use controller::PlaybackController;
pub use native::{play_vignette, PlayOptions, PlaybackOutcome, FPS_RANGE};
pub use schedule::{FrameScheduler, ManualClock, MonotonicClock, Scheduler, Ticket};
pub use simulate::{record_transitions, Simulation, Transition};
pub use state::{InputResult, PlaybackPhase, PlaybackState, ViewState, ViewerState};
