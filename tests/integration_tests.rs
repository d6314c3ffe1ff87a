use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("swatches");
    cmd.env_remove("SWATCHES_WIDGET__COLORS")
        .env_remove("SWATCHES_WIDGET__HISTORY_LENGTH");
    cmd
}

#[test]
fn test_cli_prints_prop_cycle() {
    cmd()
        .args(["-c", "#111111", "-c", "#222222"])
        .assert()
        .success()
        .stdout("axes.prop_cycle: cycler('color', ['111111', '222222'])\n");
}

#[test]
fn test_cli_default_palette() {
    cmd()
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "axes.prop_cycle: cycler('color', ['335791', 'db4e4e',",
        ))
        .stdout(predicate::str::contains("'f4b8e4'])"));
}

#[test]
fn test_cli_json_format() {
    let output = cmd()
        .args(["--color", "#335791", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["colors"], serde_json::json!(["#335791"]));
    assert_eq!(
        json["prop_cycle"],
        "axes.prop_cycle: cycler('color', ['335791'])"
    );
}

#[test]
fn test_cli_writes_mplstyle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("palette.mplstyle");

    cmd()
        .args(["-c", "red", "-o"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote style to"));

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("axes.prop_cycle: cycler('color', ['red'])"));
}

#[test]
fn test_cli_config_file_and_save_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("in.toml");
    let saved = dir.path().join("out.toml");
    std::fs::write(&config, "[widget]\ncolors = [\"#aaaaaa\", \"#bbbbbb\"]\n").unwrap();

    cmd()
        .arg("--config")
        .arg(&config)
        .arg("--save-config")
        .arg(&saved)
        .assert()
        .success()
        .stdout(predicate::str::contains("['aaaaaa', 'bbbbbb']"));

    let saved = std::fs::read_to_string(&saved).unwrap();
    assert!(saved.contains("#aaaaaa"));
    assert!(saved.contains("history_length = 10"));
}

#[test]
fn test_cli_overrides_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("in.toml");
    std::fs::write(&config, "[widget]\ncolors = \"#aaaaaa\"\n").unwrap();

    cmd()
        .arg("--config")
        .arg(&config)
        .args(["-c", "#123456"])
        .assert()
        .success()
        .stdout(predicate::str::contains("['123456']"));
}

#[test]
fn test_cli_env_override() {
    cmd()
        .env("SWATCHES_WIDGET__COLORS", "#0a0b0c")
        .assert()
        .success()
        .stdout(predicate::str::contains("['0a0b0c']"));
}

#[test]
fn test_cli_zero_history_fails() {
    cmd()
        .args(["--history-length", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("history_length must be at least 1"));
}

#[test]
fn test_cli_invalid_color_fails() {
    cmd().args(["-c", "not-a-color"]).assert().failure();
}

#[test]
fn test_cli_missing_config_fails() {
    cmd()
        .args(["--config", "/nonexistent/swatches.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("swatches"));
}
