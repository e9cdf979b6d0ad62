//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

static HOMES: AtomicUsize = AtomicUsize::new(0);

/// Run a CLI command with an isolated home directory and return output.
fn run_cli(args: &[&str]) -> (i32, String, String) {
    let home = tempfile_home();
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "prospect-cli", "--"])
        .args(args)
        .env("HOME", &home)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn tempfile_home() -> std::path::PathBuf {
    let n = HOMES.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("prospect-cli-test-{}-{n}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("Failed to create temp home");
    dir
}

#[test]
fn test_categories_json() {
    let (code, stdout, _) = run_cli(&["categories", "--json"]);
    assert_eq!(code, 0, "categories failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0]["id"], "bitcoin");
}

/// The pretty-printed stats object closing a simulate run.
fn final_stats(stdout: &str) -> serde_json::Value {
    let start = if stdout.starts_with("{\n") {
        0
    } else {
        stdout.find("\n{\n").expect("no stats object in output") + 1
    };
    serde_json::from_str(&stdout[start..]).expect("stats is not JSON")
}

#[test]
fn test_simulate_is_reproducible() {
    let args = ["simulate", "--ticks", "2000", "--seed", "42"];
    let (code, first, _) = run_cli(&args);
    assert_eq!(code, 0, "simulate failed");
    let (_, second, _) = run_cli(&args);

    let (a, b) = (final_stats(&first), final_stats(&second));
    assert_eq!(a["attempts"], 2000);
    assert_eq!(a["find_count"], b["find_count"]);
    assert_eq!(a["total_value"], b["total_value"]);
}

#[test]
fn test_simulate_respects_category_override() {
    let (code, stdout, _) = run_cli(&[
        "simulate", "--ticks", "6000", "--seed", "7", "--category", "litecoin",
    ]);
    assert_eq!(code, 0, "simulate failed");
    for line in stdout.lines().filter(|l| l.contains("FindRecorded")) {
        let event: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(event["find"]["category"], "litecoin");
    }
}

#[test]
fn test_config_unknown_key_fails() {
    let (code, _, stderr) = run_cli(&["config", "get", "session.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}
