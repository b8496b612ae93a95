mod commands;

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use vignette::cli::{Cli, Commands, ConfigCommands, PlayArgs};
use vignette::{logging, Config, ConfigError};

/// Load the config from `path` or the default location.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match Config::resolve_path(path) {
        Ok(path) => Ok(Config::load_from(&path)?),
        // No home directory: nothing to load
        Err(ConfigError::NoConfigDir) => Ok(Config::default()),
        Err(e) => Err(e.into()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Play(PlayArgs::default()));

    // These must keep working while the config file is broken
    let config = match &command {
        Commands::Completions { .. }
        | Commands::Config(ConfigCommands::Path | ConfigCommands::Edit) => {
            load_config(cli.config.as_deref()).unwrap_or_default()
        }
        _ => load_config(cli.config.as_deref())?,
    };

    // The interactive player owns the terminal: log to a file or not at all
    let log_file = cli.log_file.as_deref().or(config.logging.file.as_deref());
    let interactive = matches!(command, Commands::Play(_));
    if log_file.is_some() || !interactive {
        logging::init(&config.logging.level, log_file)?;
    }

    match command {
        Commands::Play(args) => commands::play::handle(&args, &config),
        Commands::Scenes(args) => commands::scenes::handle(&args, &config),
        Commands::Simulate(args) => commands::simulate::handle(&args, &config),
        Commands::Config(cmd) => commands::config::handle(cmd, cli.config.as_deref(), &config),
        Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(())
        }
    }
}
