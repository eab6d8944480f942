//! End-to-end tests running the `aa` binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn aa_binary() -> String {
    env!("CARGO_BIN_EXE_aa").to_string()
}

/// Runs `aa` with an isolated home and config directory, feeding `stdin`.
fn run_aa(home: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(aa_binary())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("AA_POLICY")
        .env_remove("AA_MAX_INPUT_BYTES")
        .env_remove("AA_SCAN_EXTENSION")
        .env_remove("RUST_LOG")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn aa");

    {
        let child_stdin = child.stdin.as_mut().unwrap();
        child_stdin.write_all(stdin.as_bytes()).unwrap();
    }

    child.wait_with_output().expect("failed to wait for aa")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "aa failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_classify_stdin_tracking_number() {
    let temp = TempDir::new().unwrap();
    let output = run_aa(
        temp.path(),
        &["classify", "--json", "--action"],
        "Your FedEx package 123456789012 has shipped, tracking: 123456789012",
    );

    let value = stdout_json(&output);
    assert_eq!(value["intent"]["type"], "track_package");
    assert_eq!(value["intent"]["carrier"], "FedEx");
    assert_eq!(value["intent"]["tracking_number"], "123456789012");
    assert_eq!(
        value["action"]["url"],
        "https://www.fedex.com/fedextrack/?trknbr=123456789012"
    );
}

#[test]
fn test_classify_empty_stdin_is_none() {
    let temp = TempDir::new().unwrap();
    let output = run_aa(temp.path(), &["classify", "--json"], "");

    let value = stdout_json(&output);
    assert_eq!(value["intent"]["type"], "none");
}

#[test]
fn test_classify_missing_file_is_none() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.txt");
    let output = run_aa(
        temp.path(),
        &["classify", "--json", missing.to_str().unwrap()],
        "",
    );

    let value = stdout_json(&output);
    assert_eq!(value["intent"]["type"], "none");
}

#[test]
fn test_config_file_selects_policy() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("aa.toml");
    std::fs::write(&config_path, "policy = \"permissive\"\n").unwrap();

    let strict = run_aa(temp.path(), &["classify", "--json"], "Born 01/01/1990");
    assert_eq!(stdout_json(&strict)["intent"]["type"], "none");

    let permissive = run_aa(
        temp.path(),
        &["--config", config_path.to_str().unwrap(), "classify", "--json"],
        "Born 01/01/1990",
    );
    let value = stdout_json(&permissive);
    assert_eq!(value["intent"]["type"], "add_calendar_event");
    assert_eq!(value["intent"]["date"], "01/01/1990");
}

#[test]
fn test_policy_flag_beats_config_file() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("aa.toml");
    std::fs::write(&config_path, "policy = \"permissive\"\n").unwrap();

    let output = run_aa(
        temp.path(),
        &[
            "--config",
            config_path.to_str().unwrap(),
            "classify",
            "--json",
            "--policy",
            "strict",
        ],
        "Born 01/01/1990",
    );
    assert_eq!(stdout_json(&output)["intent"]["type"], "none");
}

#[test]
fn test_unknown_policy_flag_fails() {
    let temp = TempDir::new().unwrap();
    let output = run_aa(temp.path(), &["classify", "--policy", "lenient"], "");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown policy"), "stderr: {stderr}");
}

#[test]
fn test_scan_directory_json_lines() {
    let temp = TempDir::new().unwrap();
    let shots = temp.path().join("shots");
    std::fs::create_dir(&shots).unwrap();
    std::fs::write(shots.join("a.txt"), "UPS 1Z999AA10123456784").unwrap();
    std::fs::write(shots.join("b.txt"), "Total: $45.67 at CoffeeShop").unwrap();

    let output = run_aa(
        temp.path(),
        &["scan", "--json", shots.to_str().unwrap()],
        "",
    );
    assert!(
        output.status.success(),
        "aa scan failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["intent"]["carrier"], "UPS");
    assert_eq!(lines[1]["intent"]["type"], "save_expense");
    assert_eq!(lines[1]["intent"]["amount"], "45.67");
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let temp = TempDir::new().unwrap();
    let output = run_aa(
        temp.path(),
        &["--verbose", "classify", "--json"],
        "123 Main Street, Springfield",
    );

    let value = stdout_json(&output);
    assert_eq!(value["intent"]["type"], "open_map");
    assert!(!output.stderr.is_empty());
}
