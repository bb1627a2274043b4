use std::fs;

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn bin() -> Result<Command> {
    Ok(Command::cargo_bin("swiss-dialects")?)
}

#[test]
fn list_prints_every_dialect() -> Result<()> {
    bin()?
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("zh\tZüritüütsch\tZürich\tGerman"))
        .stdout(predicate::str::contains("gr\tRumantsch Sursilvan"));
    Ok(())
}

#[test]
fn validate_accepts_the_bundled_catalog() -> Result<()> {
    bin()?
        .args(["validate", "--assets-path"])
        .arg(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog OK: 7 dialects, 4 regions"));
    Ok(())
}

#[test]
fn validate_reports_missing_sample() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("broken.json");
    fs::write(
        &path,
        r#"{"dialects": [{"id": "x", "name": "X", "region": "R", "language": "french",
            "position": {"x": 1, "y": 1},
            "samples": {"greeting": {"text": "a", "translation": "b"}}}]}"#,
    )?;
    bin()?
        .args(["validate", "--catalog"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "dialect 'x' is missing a sample for category Weather",
        ));
    Ok(())
}

#[test]
fn replay_prints_final_state_as_json() -> Result<()> {
    let output = bin()?
        .args([
            "replay",
            "select:zh",
            "category:weather",
            "toggle",
            "wait:3350",
            "mode:physical",
            "hover:Deutschschweiz",
        ])
        .output()?;
    assert!(output.status.success());
    let state: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(state["active_dialect_id"], "zh");
    assert_eq!(state["active_category"], "weather");
    assert_eq!(state["map_mode"], "physical");
    assert_eq!(state["hovered_region_label"], "Deutschschweiz");
    assert_eq!(state["playback"]["is_playing"], false);
    assert_eq!(state["playback"]["progress"], 100.0);
    Ok(())
}

#[test]
fn replay_rejects_bad_event() -> Result<()> {
    bin()?
        .args(["replay", "category:sports"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category 'sports'"));
    Ok(())
}
