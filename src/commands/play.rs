//! Interactive playback.

use anyhow::{bail, Result};

use vignette::cli::PlayArgs;
use vignette::player::{play_vignette, PlayOptions, PlaybackOutcome};
use vignette::tui::theme::Theme;
use vignette::Config;

use super::load_catalog;

/// Merge command-line flags over the config file.
pub fn play_options(args: &PlayArgs, config: &Config) -> PlayOptions {
    let theme = match &args.theme {
        Some(name) => Theme::by_name(name),
        None => config.player.theme(),
    };
    PlayOptions {
        fps: args.fps.unwrap_or_else(|| config.player.fps()),
        ascii: args.ascii || config.player.ascii_captions,
        theme,
    }
}

/// Play the vignette in the terminal.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &PlayArgs, config: &Config) -> Result<()> {
    if !atty::is(atty::Stream::Stdout) {
        bail!("`vignette play` needs an interactive terminal; try `vignette simulate`");
    }
    let catalog = load_catalog(&args.catalog, config)?;
    let options = play_options(args, config);

    match play_vignette(catalog, &options)? {
        PlaybackOutcome::Finished => tracing::debug!("vignette finished"),
        PlaybackOutcome::Interrupted => tracing::debug!("vignette interrupted"),
    }
    Ok(())
}
