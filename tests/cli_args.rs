//! Integration tests for CLI argument handling
//!
//! Runs the compiled binary to check argument parsing and error reporting;
//! everything past parsing is covered by the library tests.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_lbproxy"))
        .args(args)
        .output()
        .expect("Failed to execute lbproxy")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lbproxy"), "Help should mention lbproxy");
    assert!(stdout.contains("players"), "Help should list subcommands");
}

#[test]
fn test_missing_subcommand_fails() {
    let output = run_cli(&[]);
    assert!(!output.status.success(), "Expected bare invocation to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Usage") || stderr.contains("usage"),
        "Should print usage on missing subcommand: {}",
        stderr
    );
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = run_cli(&["teams"]);
    assert!(!output.status.success(), "Expected unknown subcommand to fail");
}

#[test]
fn test_players_help_lists_filter_flags() {
    let output = run_cli(&["players", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--position"));
    assert!(stdout.contains("--min-value"));
    assert!(stdout.contains("--lb-only"));
}

#[test]
fn test_invalid_age_value_fails() {
    let output = run_cli(&["players", "--min-age", "old"]);
    assert!(!output.status.success(), "Expected invalid age to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid") || stderr.contains("Invalid"),
        "Should print error message about invalid value: {}",
        stderr
    );
}
