//! vignette - a short animated story for the terminal.
//!
//! The [`catalog`] holds the scenes, the [`player`] plays them back on a
//! timer and draws them with ratatui, and [`config`] holds user settings.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod logging;
pub mod player;
pub mod tui;

pub use catalog::{CatalogError, SceneCatalog, SceneDescriptor};
pub use config::{Config, ConfigError};
