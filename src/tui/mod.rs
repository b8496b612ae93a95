//! TUI (Text User Interface) helpers
//!
//! Theme, layout helpers and the key hint footer shared by the player's
//! renderers.

pub mod footer;
pub mod theme;
pub mod ui;
