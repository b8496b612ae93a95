//! Interactive terminal player.
//!
//! Drives a [`PlaybackController`] from a real clock: scene timers fire from
//! the event loop, and every redraw doubles as a display-refresh tick.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::controller::PlaybackController;
use super::input::handle_event;
use super::render::{draw_frame, RenderContext};
use super::schedule::{FrameScheduler, MonotonicClock, Scheduler};
use super::state::{InputResult, PlaybackPhase, ViewerState};
use crate::catalog::SceneCatalog;
use crate::tui::theme::Theme;

/// Lowest and highest accepted refresh rates.
pub const FPS_RANGE: (u32, u32) = (1, 240);

/// Options for an interactive run.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    /// Display refresh rate
    pub fps: u32,
    /// Transliterate on-screen text to ASCII
    pub ascii: bool,
    pub theme: Theme,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            ascii: false,
            theme: Theme::default(),
        }
    }
}

impl PlayOptions {
    /// Time between refreshes.
    pub fn frame_interval(&self) -> Duration {
        let fps = self.fps.clamp(FPS_RANGE.0, FPS_RANGE.1);
        Duration::from_secs_f64(1.0 / fps as f64)
    }
}

/// How an interactive run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Viewer quit after the vignette finished
    Finished,
    /// Viewer quit while a scene was still playing
    Interrupted,
}

/// Play `catalog` in the terminal until the viewer quits.
///
/// Raw mode and the alternate screen are entered here and always left again,
/// also when drawing fails.
pub fn play_vignette(catalog: SceneCatalog, options: &PlayOptions) -> Result<PlaybackOutcome> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;

    let result = execute!(stdout, EnterAlternateScreen, Hide)
        .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)))
        .map_err(anyhow::Error::from)
        .and_then(|mut terminal| {
            let outcome = run_loop(&mut terminal, catalog, options);
            execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)?;
            outcome
        });

    disable_raw_mode()?;
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    catalog: SceneCatalog,
    options: &PlayOptions,
) -> Result<PlaybackOutcome> {
    let size = terminal.size()?;
    let mut viewer = ViewerState::new(size.width, size.height);
    let mut scheduler = FrameScheduler::new(MonotonicClock::new());
    let mut controller = PlaybackController::new(catalog);
    controller.mount(&mut scheduler);

    let frame_interval = options.frame_interval();
    let started = Instant::now();
    let mut next_frame = Instant::now();

    tracing::info!(
        scenes = controller.catalog().len(),
        total_ms = controller.catalog().total_duration_ms(),
        fps = options.fps,
        "player started"
    );

    let outcome = loop {
        scheduler.run_due_timers(&mut controller);

        let now = Instant::now();
        if now >= next_frame {
            scheduler.present_frame(&mut controller);
            let anim_ms = now.duration_since(started).as_secs_f64() * 1000.0;
            let ctx = RenderContext {
                catalog: controller.catalog(),
                theme: &options.theme,
                ascii: options.ascii,
            };
            let view = controller.view();
            terminal.draw(|frame| draw_frame(frame, &view, &viewer, &ctx, anim_ms))?;
            viewer.needs_render = false;
            next_frame = now + frame_interval;
        }

        if event::poll(poll_timeout(&scheduler, next_frame))? {
            match handle_event(event::read()?, &mut viewer) {
                InputResult::Continue => {}
                InputResult::Replay => {
                    tracing::debug!("replay requested");
                    controller.replay(&mut scheduler);
                }
                InputResult::Quit => break controller.phase(),
            }
            if viewer.needs_render {
                // Redraw right away rather than at the next tick
                next_frame = Instant::now();
            }
        }
    };

    controller.unmount(&mut scheduler);
    tracing::info!(?outcome, "player closed");

    Ok(match outcome {
        PlaybackPhase::Stopped => PlaybackOutcome::Finished,
        PlaybackPhase::Playing(_) => PlaybackOutcome::Interrupted,
    })
}

/// Wait until the next redraw or the next scene timer, whichever is sooner.
fn poll_timeout(scheduler: &FrameScheduler<MonotonicClock>, next_frame: Instant) -> Duration {
    let until_frame = next_frame.saturating_duration_since(Instant::now());
    match scheduler.next_deadline() {
        Some(deadline) => {
            let until_timer = (deadline - scheduler.now_ms()).max(0.0) / 1000.0;
            until_frame.min(Duration::from_secs_f64(until_timer))
        }
        None => until_frame,
    }
}
