use assert_cmd::Command;

use tempotype::config::{Config, ConfigStore, FileConfigStore};
use tempotype::paragraph::SourceKind;

fn tempotype() -> Command {
    Command::cargo_bin("tempotype").unwrap()
}

#[test]
fn help_lists_timing_flags() {
    let output = tempotype().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();

    assert!(stdout.contains("--duration"));
    assert!(stdout.contains("--bonus"));
    assert!(stdout.contains("--penalty"));
    assert!(stdout.contains("--source"));
}

#[test]
fn refuses_to_run_without_a_tty() {
    let dir = tempfile::tempdir().unwrap();
    let output = tempotype()
        .args(["--config", dir.path().join("config.json").to_str().unwrap()])
        .write_stdin("")
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&output.get_output().stderr).to_string();

    assert!(stderr.contains("stdin must be a tty"));
}

#[test]
fn rejects_zero_duration() {
    let dir = tempfile::tempdir().unwrap();
    let output = tempotype()
        .args([
            "--config",
            dir.path().join("config.json").to_str().unwrap(),
            "--duration",
            "0",
        ])
        .write_stdin("")
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&output.get_output().stderr).to_string();

    assert!(stderr.contains("base_duration_secs"));
}

#[test]
fn rejects_blank_prompt_before_the_tty_check() {
    let dir = tempfile::tempdir().unwrap();
    let output = tempotype()
        .args([
            "--config",
            dir.path().join("config.json").to_str().unwrap(),
            "--prompt",
            " \n ",
        ])
        .write_stdin("")
        .assert()
        .failure()
        .code(2);
    let stderr = String::from_utf8_lossy(&output.get_output().stderr).to_string();

    assert!(stderr.contains("custom prompt must contain text"));
    assert!(!stderr.contains("stdin must be a tty"));
    assert!(!stderr.contains("EmptyPrompt"));
}

#[test]
fn save_config_persists_flags_before_the_tty_check() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    tempotype()
        .args([
            "--config",
            path.to_str().unwrap(),
            "--duration",
            "45",
            "--source",
            "generated",
            "--save-config",
        ])
        .write_stdin("")
        .assert()
        .failure();

    let saved = FileConfigStore::with_path(&path).load();
    assert_eq!(
        saved,
        Config {
            base_duration_secs: 45,
            source: SourceKind::Generated,
            ..Config::default()
        }
    );
}
