use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn write_config(dir: &std::path::Path, players: usize) -> std::path::PathBuf {
    let yaml = format!(
        r#"
run_id: "cli_check"
games:
  seed: 1
  count: 2
table:
  players: {players}
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
"#,
        jsonl = dir.join("games.jsonl").display(),
        summary = dir.join("summary.md").display(),
    );
    let path = dir.join("bench.yaml");
    fs::write(&path, yaml).expect("config written");
    path
}

#[test]
fn validate_only_skips_self_play() {
    let dir = tempdir().expect("temp dir");
    let config = write_config(dir.path(), 4);

    Command::cargo_bin("defuse-bench")
        .expect("binary built")
        .arg("--config")
        .arg(&config)
        .arg("--games")
        .arg("5")
        .arg("--validate-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded configuration 'cli_check' with 4 seats (5 games)"))
        .stdout(predicate::str::contains("Validation-only mode"));

    assert!(!dir.path().join("games.jsonl").exists());
}

#[test]
fn unsupported_table_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let config = write_config(dir.path(), 6);

    Command::cargo_bin("defuse-bench")
        .expect("binary built")
        .arg("--config")
        .arg(&config)
        .arg("--validate-only")
        .assert()
        .failure()
        .stderr(predicate::str::contains("table"));
}
