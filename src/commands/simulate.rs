//! Headless playback on a virtual clock.

use anyhow::{bail, Result};

use vignette::catalog::SceneCatalog;
use vignette::cli::SimulateArgs;
use vignette::player::{record_transitions, PlaybackPhase, Transition};
use vignette::Config;

use super::load_catalog;

/// One output line for a transition.
pub fn format_transition(transition: &Transition, catalog: &SceneCatalog) -> String {
    let head = format!(
        "{:>7.0} ms  {:>5.1}%",
        transition.at_ms,
        transition.progress * 100.0
    );
    match transition.phase {
        PlaybackPhase::Playing(index) => {
            let id = catalog.get(index).map_or("?", |scene| scene.id.as_str());
            format!("{}  playing  {}/{}  {}", head, index + 1, catalog.len(), id)
        }
        PlaybackPhase::Stopped => format!("{}  stopped", head),
    }
}

/// Run the simulation and return the printed lines.
pub fn run(catalog: &SceneCatalog, args: &SimulateArgs) -> Result<Vec<String>> {
    if !(args.step_ms.is_finite() && args.step_ms > 0.0) {
        bail!("--step-ms must be a positive number of milliseconds");
    }
    if let Some(at) = args.replay_at {
        if !(at.is_finite() && at >= 0.0) {
            bail!("--replay-at must be a non-negative number of milliseconds");
        }
    }

    let transitions = record_transitions(catalog.clone(), args.step_ms, args.replay_at);
    Ok(transitions
        .iter()
        .map(|t| format_transition(t, catalog))
        .collect())
}

/// Print every phase change of a virtual run.
pub fn handle(args: &SimulateArgs, config: &Config) -> Result<()> {
    let catalog = load_catalog(&args.catalog, config)?;
    for line in run(&catalog, args)? {
        println!("{}", line);
    }
    Ok(())
}
