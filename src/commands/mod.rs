//! Subcommand handlers.

pub mod completions;
pub mod config;
pub mod play;
pub mod scenes;
pub mod simulate;

use anyhow::{Context, Result};

use vignette::catalog::SceneCatalog;
use vignette::cli::CatalogArgs;
use vignette::tui::theme::Theme;
use vignette::Config;

/// Catalog from `--catalog`, then `player.catalog`, then the built-in story.
pub fn load_catalog(args: &CatalogArgs, config: &Config) -> Result<SceneCatalog> {
    match args.catalog.as_ref().or(config.player.catalog.as_ref()) {
        Some(path) => SceneCatalog::load(path)
            .with_context(|| format!("failed to load scene catalog {}", path.display())),
        None => Ok(SceneCatalog::builtin()),
    }
}

/// Theme for plain CLI output; colorless under `NO_COLOR` or when piped.
pub fn cli_theme(config: &Config) -> Theme {
    let theme = config.player.theme();
    if std::env::var_os("NO_COLOR").is_some() || !atty::is(atty::Stream::Stdout) {
        theme.plain()
    } else {
        theme
    }
}
