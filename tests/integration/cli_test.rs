//! Integration tests for the command-line interface

use predicates::prelude::*;

use crate::helpers::{fixture_arg, vignette_cmd};

/// Run vignette with `args` and capture (stdout, stderr, exit code).
fn run_vignette(args: &[&str]) -> (String, String, i32) {
    let (mut cmd, _home) = vignette_cmd();
    let output = cmd.args(args).output().expect("Failed to execute vignette");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let (stdout, _stderr, exit_code) = run_vignette(&["--help"]);

    assert_eq!(exit_code, 0);
    for sub in ["play", "scenes", "simulate", "config", "completions"] {
        assert!(stdout.contains(sub), "missing {sub} in help:\n{stdout}");
    }
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--log-file"));
}

#[test]
fn version_starts_with_package_version() {
    let (mut cmd, _home) = vignette_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "vignette {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let (_stdout, stderr, exit_code) = run_vignette(&["dance"]);
    assert_eq!(exit_code, 2);
    assert!(stderr.contains("unrecognized subcommand"));
}

// ============================================================================
// Scenes
// ============================================================================

#[test]
fn scenes_builtin_table() {
    let (stdout, stderr, exit_code) = run_vignette(&["scenes"]);
    assert_eq!(exit_code, 0, "stderr: {stderr}");
    insta::assert_snapshot!("scenes_builtin_table", stdout.trim_end());
}

#[test]
fn scenes_json_from_catalog_file() {
    let (stdout, _stderr, exit_code) =
        run_vignette(&["scenes", "--json", "--catalog", &fixture_arg("two_scenes.toml")]);
    assert_eq!(exit_code, 0);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["total_ms"], 1500);
    assert_eq!(value["scenes"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["scenes"][0]["title"], "Scene A");
    assert_eq!(value["scenes"][1]["start_ms"], 1000);
}

#[test]
fn scenes_duplicate_ids_rejected() {
    let (mut cmd, _home) = vignette_cmd();
    cmd.args(["scenes", "--catalog", &fixture_arg("duplicate_ids.toml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("appears more than once"));
}

#[test]
fn scenes_zero_duration_rejected() {
    let (mut cmd, _home) = vignette_cmd();
    cmd.args(["scenes", "--catalog", &fixture_arg("zero_duration.toml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("zero duration"));
}

#[test]
fn scenes_file_without_scenes_rejected() {
    let (mut cmd, _home) = vignette_cmd();
    cmd.args(["scenes", "--catalog", &fixture_arg("no_scenes.toml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no scenes"));
}

#[test]
fn scenes_missing_catalog_names_path() {
    let (_stdout, stderr, exit_code) =
        run_vignette(&["scenes", "--catalog", "/no/such/scenes.toml"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("/no/such/scenes.toml"), "stderr: {stderr}");
}

// ============================================================================
// Simulate
// ============================================================================

#[test]
fn simulate_two_scene_catalog() {
    let (stdout, stderr, exit_code) =
        run_vignette(&["simulate", "--catalog", &fixture_arg("two_scenes.toml")]);
    assert_eq!(exit_code, 0, "stderr: {stderr}");

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "      0 ms    0.0%  playing  1/2  a",
            "   1000 ms   66.7%  playing  2/2  b",
            "   1500 ms  100.0%  stopped",
        ]
    );
}

#[test]
fn simulate_builtin_visits_every_scene_in_order() {
    let (stdout, _stderr, exit_code) = run_vignette(&["simulate", "--step-ms", "50"]);
    assert_eq!(exit_code, 0);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6);
    let starts = ["0", "3500", "6700", "9900", "13100"];
    let ids = ["market", "conversation", "invitation", "club-exterior", "club-interior"];
    for (i, line) in lines[..5].iter().enumerate() {
        assert!(line.trim_start().starts_with(&format!("{} ms", starts[i])), "{line}");
        assert!(line.ends_with(&format!("{}/5  {}", i + 1, ids[i])), "{line}");
    }
    assert_eq!(lines[5], "  16700 ms  100.0%  stopped");
}

#[test]
fn simulate_with_replay() {
    let (stdout, _stderr, exit_code) = run_vignette(&[
        "simulate",
        "--catalog",
        &fixture_arg("two_scenes.toml"),
        "--replay-at",
        "2000",
    ]);
    assert_eq!(exit_code, 0);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[2], "   1500 ms  100.0%  stopped");
    assert_eq!(lines[3], "   2000 ms    0.0%  playing  1/2  a");
    assert_eq!(lines.last().copied(), Some("   3500 ms  100.0%  stopped"));
}

#[test]
fn simulate_rejects_zero_step() {
    let (_stdout, stderr, exit_code) = run_vignette(&["simulate", "--step-ms", "0"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("--step-ms"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn config_path_honours_override() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    let (stdout, _stderr, exit_code) =
        run_vignette(&["config", "path", "--config", path.to_str().unwrap()]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim(), path.to_str().unwrap());
}

#[test]
#[cfg(target_os = "linux")]
fn config_path_defaults_under_config_home() {
    let (mut cmd, home) = vignette_cmd();
    let expected = home.path().join(".config").join("vignette").join("config.toml");
    cmd.args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy().into_owned()));
}

#[test]
fn config_show_prints_defaults() {
    let (stdout, _stderr, exit_code) = run_vignette(&["config", "show"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[player]"));
    assert!(stdout.contains("fps = 60"));
    assert!(stdout.contains("theme = \"neon\""));
    assert!(stdout.contains("level = \"warn\""));
}

#[test]
fn config_show_reads_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[player]\nfps = 24\ntheme = \"ocean\"\n").unwrap();

    let (stdout, _stderr, exit_code) =
        run_vignette(&["--config", path.to_str().unwrap(), "config", "show"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("fps = 24"));
    assert!(stdout.contains("theme = \"ocean\""));
}

#[test]
fn invalid_config_is_reported() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[player]\nfps = \"fast\"\n").unwrap();

    let (mut cmd, _home) = vignette_cmd();
    cmd.args(["--config", path.to_str().unwrap(), "scenes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config file"));
}

#[test]
fn catalog_from_config_is_used() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let catalog = fixture_arg("two_scenes.toml");
    std::fs::write(
        &path,
        format!("[player]\ncatalog = {:?}\n", catalog),
    )
    .unwrap();

    let (stdout, _stderr, exit_code) =
        run_vignette(&["--config", path.to_str().unwrap(), "scenes", "--json"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("\"total_ms\": 1500"));
}

/// Write a config file that fails to parse and return its directory.
fn broken_config() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[player\nfps = ").unwrap();
    (dir, path)
}

#[test]
fn config_path_works_with_broken_config() {
    let (_dir, path) = broken_config();
    let (stdout, _stderr, exit_code) =
        run_vignette(&["--config", path.to_str().unwrap(), "config", "path"]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim(), path.to_str().unwrap());
}

#[test]
fn completions_work_with_broken_config() {
    let (_dir, path) = broken_config();
    let (stdout, _stderr, exit_code) =
        run_vignette(&["--config", path.to_str().unwrap(), "completions", "bash"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("_vignette"));
}

#[test]
fn config_edit_opens_broken_config() {
    let (_dir, path) = broken_config();
    let (mut cmd, _home) = vignette_cmd();
    cmd.env("EDITOR", "true")
        .args(["--config", path.to_str().unwrap(), "config", "edit"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Opening"))
        .stderr(predicate::str::contains("invalid config file"));
}

#[test]
fn config_edit_creates_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let (mut cmd, _home) = vignette_cmd();
    cmd.env("EDITOR", "true")
        .args(["--config", path.to_str().unwrap(), "config", "edit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid."));

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("fps = 60"));
    assert!(contents.contains("theme = \"neon\""));
}

#[test]
fn config_edit_reports_editor_failure() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let (mut cmd, _home) = vignette_cmd();
    cmd.env("EDITOR", "false")
        .args(["--config", path.to_str().unwrap(), "config", "edit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Editor exited with"));
}

#[test]
#[cfg(unix)]
fn config_edit_rejects_file_broken_by_editor() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let editor = dir.path().join("break-config.sh");
    std::fs::write(&editor, "#!/bin/sh\nprintf '[player\\nfps = ' > \"$1\"\n").unwrap();
    std::fs::set_permissions(&editor, std::fs::Permissions::from_mode(0o755)).unwrap();

    let (mut cmd, _home) = vignette_cmd();
    cmd.env("EDITOR", &editor)
        .args(["--config", path.to_str().unwrap(), "config", "edit"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Config is valid.").not())
        .stderr(predicate::str::contains("invalid config file"));
}

// ============================================================================
// Logging
// ============================================================================

#[test]
fn log_file_receives_debug_events() {
    let dir = tempfile::TempDir::new().unwrap();
    let log = dir.path().join("vignette.log");

    let (mut cmd, _home) = vignette_cmd();
    cmd.env("VIGNETTE_LOG", "debug")
        .args([
            "--log-file",
            log.to_str().unwrap(),
            "simulate",
            "--catalog",
            &fixture_arg("two_scenes.toml"),
        ])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(!contents.is_empty());
}

// ============================================================================
// Play and Completions
// ============================================================================

#[test]
fn play_without_terminal_fails_cleanly() {
    let (mut cmd, _home) = vignette_cmd();
    cmd.arg("play")
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive terminal"));
}

#[test]
fn completions_for_bash() {
    let (stdout, _stderr, exit_code) = run_vignette(&["completions", "bash"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("_vignette"));
}

#[test]
fn completions_reject_unknown_shell() {
    let (_stdout, _stderr, exit_code) = run_vignette(&["completions", "tcsh"]);
    assert_eq!(exit_code, 2);
}
