//! Integration tests for basic CLI behavior.
//!
//! Tests that the binary exists, accepts standard flags, lists its sources,
//! and rejects bad argument combinations before touching the network.

#![allow(deprecated)] // cargo_bin deprecation, replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: get a Command for the `sourcer` binary.
fn sourcer() -> Command {
    Command::cargo_bin("sourcer").expect("binary 'sourcer' should be built")
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    sourcer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: sourcer"))
        .stdout(predicate::str::contains("sources"))
        .stdout(predicate::str::contains("scrape"));
}

#[test]
fn short_help_flag_shows_usage() {
    sourcer()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: sourcer"));
}

#[test]
fn version_flag_shows_semver() {
    sourcer()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^sourcer \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_args_shows_error_and_usage() {
    sourcer()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: sourcer"));
}

#[test]
fn invalid_subcommand_fails() {
    sourcer()
        .arg("this-is-not-a-real-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ─── Sources ─────────────────────────────────────────────────────────────────

#[test]
fn sources_lists_every_source() {
    sourcer()
        .arg("sources")
        .assert()
        .success()
        .stdout(predicate::str::contains("soapertv"))
        .stdout(predicate::str::contains("S4MJ"))
        .stdout(predicate::str::contains("rank 236"))
        .stdout(predicate::str::contains("vidsrcsu"))
        .stdout(predicate::str::contains("(disabled)"));
}

// ─── Scrape ──────────────────────────────────────────────────────────────────

#[test]
fn scrape_help() {
    sourcer()
        .args(["scrape", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<SOURCE>"))
        .stdout(predicate::str::contains("--title"))
        .stdout(predicate::str::contains("--tmdb"))
        .stdout(predicate::str::contains("--season"))
        .stdout(predicate::str::contains("--platform"))
        .stdout(predicate::str::contains("--proxy-url"));
}

#[test]
fn scrape_missing_title_fails() {
    sourcer()
        .args(["scrape", "soapertv", "--tmdb", "603"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--title"));
}

#[test]
fn scrape_season_without_episode_fails() {
    sourcer()
        .args(["scrape", "soapertv", "-t", "Severance", "--tmdb", "95396"])
        .args(["--season", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--episode"));
}

#[test]
fn scrape_invalid_platform_fails() {
    sourcer()
        .args(["scrape", "soapertv", "-t", "Matrix", "--tmdb", "603"])
        .args(["--platform", "tvos"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tvos"));
}

#[test]
fn scrape_unknown_source_fails() {
    sourcer()
        .args(["scrape", "nosuchsite", "-t", "Matrix", "--tmdb", "603"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown source: nosuchsite"));
}

#[test]
fn scrape_with_missing_config_file_fails() {
    sourcer()
        .args(["scrape", "soapertv", "-t", "Matrix", "--tmdb", "603"])
        .args(["--config", "/nonexistent/sourcer.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
