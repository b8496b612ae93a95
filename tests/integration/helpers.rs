//! Shared helpers for integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Directory holding test fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("integration")
        .join("fixtures")
}

/// Path to a fixture file as a string argument.
pub fn fixture_arg(name: &str) -> String {
    fixtures_dir().join(name).to_string_lossy().into_owned()
}

/// Read a fixture file.
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_dir().join(name))
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", name, e))
}

/// The vignette binary, isolated from the user's config and environment.
///
/// The returned `TempDir` is the fake home and must outlive the command.
pub fn vignette_cmd() -> (Command, TempDir) {
    let home = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("vignette").unwrap();
    cmd.env("NO_COLOR", "1")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("VIGNETTE_LOG")
        .env_remove("EDITOR");
    (cmd, home)
}
