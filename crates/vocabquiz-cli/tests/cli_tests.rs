//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SHEET: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sheet.txt");

/// A `vocabquiz` command isolated from any config in the working directory.
fn vocabquiz(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("vocabquiz").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("VOCABQUIZ_SHEET_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn validate_fixture_feed() {
    let dir = TempDir::new().unwrap();
    vocabquiz(&dir)
        .args(["validate", "--feed-file", SHEET])
        .assert()
        .success()
        .stdout(predicate::str::contains("Feed: 4 entries (2 rows skipped)"))
        .stdout(predicate::str::contains("[red] WARNING: no example sentence"))
        .stdout(predicate::str::contains("[run] WARNING: no topic"))
        .stdout(predicate::str::contains("2 warning(s) found."));
}

#[test]
fn validate_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    vocabquiz(&dir)
        .args(["validate", "--feed-file", "nonexistent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn topics_lists_counts() {
    let dir = TempDir::new().unwrap();
    vocabquiz(&dir)
        .args(["topics", "--feed-file", SHEET])
        .assert()
        .success()
        .stdout(predicate::str::contains("animals"))
        .stdout(predicate::str::contains("colors"))
        .stdout(predicate::str::contains("1 word(s) have no topic"));
}

#[test]
fn play_scripted_round() {
    let dir = TempDir::new().unwrap();
    vocabquiz(&dir)
        .args(["play", "--no-speech", "--feed-file", SHEET])
        .write_stdin("count 2\ntopic animals\nstart\nsubmit\ny\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Vocabs Quiz ==="))
        .stdout(predicate::str::contains("Starting a quiz of 2 question(s) (animals)."))
        .stdout(predicate::str::contains("2 question(s) unanswered"))
        .stdout(predicate::str::contains("Score: 0/2 (0%)"))
        .stdout(predicate::str::contains("Bye."));
}

#[test]
fn play_rejects_bad_count() {
    let dir = TempDir::new().unwrap();
    vocabquiz(&dir)
        .args(["play", "--no-speech", "--count", "abc", "--feed-file", SHEET])
        .write_stdin("start\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("whole number greater than 0"))
        .stdout(predicate::str::contains("Starting a quiz").not());
}

#[test]
fn play_unknown_topic_is_an_empty_quiz() {
    let dir = TempDir::new().unwrap();
    vocabquiz(&dir)
        .args(["play", "--no-speech", "--topic", "food", "--feed-file", SHEET])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No words available for topic \"food\""));
}

#[test]
fn play_without_feed_still_runs() {
    let dir = TempDir::new().unwrap();
    vocabquiz(&dir)
        .args(["play", "--no-speech", "--feed-file", "missing.txt"])
        .write_stdin("start\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("No vocabulary loaded"))
        .stdout(predicate::str::contains("No words available"));
}

#[test]
fn play_uses_config_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("vocabquiz.toml"),
        "default_count = \"1\"\ndefault_topic = \"colors\"\n",
    )
    .unwrap();

    vocabquiz(&dir)
        .args(["play", "--no-speech", "--feed-file", SHEET])
        .write_stdin("start\nshow\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting a quiz of 1 question(s) (colors)."))
        .stdout(predicate::str::contains("What does \"red\" mean?"));
}

#[test]
fn missing_config_path_fails() {
    let dir = TempDir::new().unwrap();
    vocabquiz(&dir)
        .args(["topics", "--feed-file", SHEET, "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    vocabquiz(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created vocabquiz.toml"));

    assert!(dir.path().join("vocabquiz.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("vocabquiz.toml"), "# mine\n").unwrap();

    vocabquiz(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));

    let content = std::fs::read_to_string(dir.path().join("vocabquiz.toml")).unwrap();
    assert_eq!(content, "# mine\n");
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    vocabquiz(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("topics"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("init"));
}
