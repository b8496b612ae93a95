//! Command-line interface definitions.
//!
//! Kept in the library so the `xtask` crate can generate the man page from
//! the same definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Version string: package version, plus commit and build date on dev builds.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("VIGNETTE_BUILD_DATE"),
    ")"
);

/// Version string: package version only on release builds.
#[cfg(feature = "release")]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(
    name = "vignette",
    version = VERSION,
    about = "Play a short animated story in the terminal",
    long_about = "Play a short animated story in the terminal.\n\n\
        Scenes play one after another on a timer while a progress bar tracks \
        the whole story. Without a subcommand the built-in story is played."
)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Append logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play the vignette interactively
    #[command(long_about = "Play the vignette interactively.\n\n\
        Keys: r/Enter replay, ? help, q/Esc quit.")]
    Play(PlayArgs),

    /// List scenes with their start offsets and durations
    Scenes(ScenesArgs),

    /// Run playback on a virtual clock and print every state change
    Simulate(SimulateArgs),

    /// Inspect or edit the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Print shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Catalog selection shared by several subcommands.
#[derive(Debug, Clone, Default, Args)]
pub struct CatalogArgs {
    /// Scene catalog (TOML) instead of the built-in story
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Display refresh rate (1-240)
    #[arg(long, value_name = "N")]
    pub fps: Option<u32>,

    /// Transliterate text to ASCII
    #[arg(long)]
    pub ascii: bool,

    /// Color theme (neon, classic, ocean)
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ScenesArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Virtual display refresh interval in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 100.0)]
    pub step_ms: f64,

    /// Trigger a replay at this virtual time
    #[arg(long, value_name = "MS")]
    pub replay_at: Option<f64>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Open the config file in $EDITOR
    Edit,
}
