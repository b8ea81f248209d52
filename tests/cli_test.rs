//! Integration tests for the mandal binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn mandal(data: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("mandal"));
    cmd.arg("--data-dir").arg(data.path());
    cmd.env("NO_COLOR", "1");
    cmd
}

fn with_config(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.yml"), config).unwrap();
    temp
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("mandal"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("challenge tracker"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("mandal"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_no_args_shows_empty_dashboard() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    mandal(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("No active Mandal"));
    Ok(())
}

#[test]
fn cli_challenge_create_then_status() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    mandal(&temp)
        .args(["challenge", "create", "Spring", "--days", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mandal created successfully!"));

    mandal(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 1 of 40 Day Mandal"))
        .stdout(predicate::str::contains("Days Remaining: 39"))
        .stdout(predicate::str::contains("Current Streak: 0 days"));
    Ok(())
}

#[test]
fn cli_second_challenge_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    mandal(&temp)
        .args(["challenge", "create", "Spring"])
        .assert()
        .success();

    mandal(&temp)
        .args(["challenge", "create", "Summer"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Spring"));
    Ok(())
}

#[test]
fn cli_challenge_create_without_name_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    mandal(&temp)
        .args(["challenge", "create"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-interactive"));
    Ok(())
}

#[test]
fn cli_session_add_and_history() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    mandal(&temp)
        .args(["session", "add", "--notes", "quiet mind"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session added for today."));

    mandal(&temp)
        .args([
            "session",
            "add",
            "--date",
            "2024-03-01",
            "--morning",
            "--evening",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Past session(s) added successfully."));

    mandal(&temp)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 of 3 sessions"))
        .stdout(predicate::str::contains("01/03/2024"));

    mandal(&temp)
        .args(["history", "--search", "QUIET"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 3 sessions"));
    Ok(())
}

#[test]
fn cli_past_session_needs_period() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    mandal(&temp)
        .args(["session", "add", "--date", "2024-03-01"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--morning"));
    Ok(())
}

#[test]
fn cli_session_delete_by_index() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    mandal(&temp).args(["session", "add"]).assert().success();

    mandal(&temp)
        .args(["session", "delete", "--index", "1", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session deleted successfully."));

    mandal(&temp)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No meditation sessions recorded yet."));
    Ok(())
}

#[test]
fn cli_playlist_cap() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let url = "https://youtu.be/dQw4w9WgXcQ";
    for _ in 0..3 {
        mandal(&temp)
            .args(["playlist", "add", url])
            .assert()
            .success();
    }

    mandal(&temp)
        .args(["playlist", "add", url])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("playlist is full"));

    mandal(&temp)
        .args(["playlist", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("YouTube (3/3)"))
        .stdout(predicate::str::contains("SoundCloud (0/3)"));
    Ok(())
}

#[test]
fn cli_playlist_rejects_unknown_host() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    mandal(&temp)
        .args(["playlist", "add", "https://vimeo.com/123"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unsupported media URL"));
    Ok(())
}

#[test]
fn cli_export_import_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let source = TempDir::new()?;
    mandal(&source)
        .args(["challenge", "create", "Spring"])
        .assert()
        .success();
    mandal(&source)
        .args(["session", "add", "--notes", "steady"])
        .assert()
        .success();

    let file = source.path().join("backup.json");
    mandal(&source)
        .arg("export")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Data exported to"));

    let content = fs::read_to_string(&file)?;
    assert!(content.contains("\"activeChallenge\""));
    assert!(content.contains("steady"));

    let target = TempDir::new()?;
    mandal(&target)
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Data imported successfully!"))
        .stdout(predicate::str::contains("1 sessions, Mandal: Spring"));
    Ok(())
}

#[test]
fn cli_import_rejects_malformed_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let file = temp.path().join("bad.json");
    fs::write(&file, "not json")?;

    mandal(&temp)
        .arg("import")
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error importing data"));
    Ok(())
}

#[test]
fn cli_timer_records_session() -> Result<(), Box<dyn std::error::Error>> {
    let temp = with_config("session_seconds: 2\ntick_millis: 1\n");
    mandal(&temp)
        .args(["timer", "--notes", "timed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session recorded: 00:00:02"));

    mandal(&temp)
        .args(["history", "--search", "timed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 1 sessions"));
    Ok(())
}

#[test]
fn cli_invalid_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = with_config("session_seconds: 0\n");
    mandal(&temp)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
    Ok(())
}

#[test]
fn cli_corrupt_state_warns_and_continues() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    mandal(&temp).args(["session", "add"]).assert().success();

    let state_file = fs::read_dir(temp.path())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .find(|path| path.extension().is_some_and(|ext| ext == "json"))
        .expect("state file written");
    fs::write(&state_file, "{ broken")?;

    mandal(&temp)
        .arg("status")
        .assert()
        .success()
        .stderr(predicate::str::contains("Could not load saved data"));
    Ok(())
}

#[test]
fn cli_sort_and_theme_toggle() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    mandal(&temp)
        .arg("sort")
        .assert()
        .success()
        .stdout(predicate::str::contains("newest first"));
    mandal(&temp)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dark theme enabled."));
    Ok(())
}

#[test]
fn cli_generates_completions() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("mandal"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("mandal"));
    Ok(())
}
