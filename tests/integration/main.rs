//! Integration tests for vignette

mod catalog_test;
mod cli_test;
mod helpers;
mod playback_test;
