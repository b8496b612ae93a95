//! Config subcommands handler

use std::path::Path;

use anyhow::{Context, Result};

use vignette::cli::ConfigCommands;
use vignette::Config;

use super::cli_theme;

/// Dispatch a `config` subcommand.
///
/// `path` is the `--config` override, if any; `config` is what was loaded
/// from it.
pub fn handle(command: ConfigCommands, path: Option<&Path>, config: &Config) -> Result<()> {
    match command {
        ConfigCommands::Show => handle_show(config),
        ConfigCommands::Path => handle_path(path),
        ConfigCommands::Edit => handle_edit(path, config),
    }
}

/// Show current configuration as TOML.
pub fn handle_show(config: &Config) -> Result<()> {
    let toml_str = config.to_toml_string()?;
    let theme = cli_theme(config);
    println!("{}", theme.primary_text(toml_str.trim_end()));
    Ok(())
}

/// Print where the config file is (or would be) read from.
pub fn handle_path(path: Option<&Path>) -> Result<()> {
    println!("{}", Config::resolve_path(path)?.display());
    Ok(())
}

/// Open configuration file in the default editor.
///
/// Uses $EDITOR environment variable (defaults to 'vi').
pub fn handle_edit(path: Option<&Path>, config: &Config) -> Result<()> {
    let config_path = Config::resolve_path(path)?;
    let theme = cli_theme(config);

    // Ensure config exists
    if !config_path.exists() {
        Config::default().save_to(&config_path)?;
    }

    // Get editor from environment
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    println!(
        "{}",
        theme.primary_text(&format!(
            "Opening {} with {}",
            config_path.display(),
            editor
        ))
    );

    let status = std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .with_context(|| format!("Failed to open editor '{}'", editor))?;
    if !status.success() {
        anyhow::bail!("Editor exited with {}", status);
    }

    // Catch mistakes before the next run does
    Config::load_from(&config_path)?;
    println!("{}", theme.success_text("Config is valid."));
    Ok(())
}
