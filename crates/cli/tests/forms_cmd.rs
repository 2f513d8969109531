use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn setup(roster: &str) -> (tempfile::TempDir, PathBuf) {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    write_file(
        &cfg,
        &format!(
            "version = 1\n[templates]\nbase = \"weekly.toml\"\n[output]\ndir = \"{}\"\n",
            tmp.path().display()
        ),
    );
    write_file(&tmp.path().join("weekly.toml"), roster);
    (tmp, cfg)
}

#[test]
fn one_on_ones_list_people_by_day() {
    let (_tmp, cfg) = setup("[roster]\n2 = [\"Marvin\", \"Hendrik\"]\n3 = [\"Toni\"]\n");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("planbook"));
    cmd.arg("--config").arg(&cfg).args(["one-on-ones", "2024-01-07", "--dry-run", "--sort", "date"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generating one-on-one forms for Monday, January 8"))
        .stdout(predicate::str::contains("January 9, 2024\n- Hendrik\n- Marvin"))
        .stdout(predicate::str::contains("January 10, 2024\n- Toni"))
        .stdout(predicate::str::contains("one-on-one-back Toni 2024-01-10"))
        .stdout(predicate::str::contains("Total: 6 pages (0 blank)"));
}

#[test]
fn one_on_ones_without_roster_write_an_empty_document() {
    let (tmp, cfg) = setup("");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("planbook"));
    cmd.arg("--config").arg(&cfg).args(["one-on-ones", "2024-01-07"]);
    cmd.assert().success().stdout(predicate::str::contains("Wrote 0 pages to"));
    assert!(tmp.path().join("one-on-ones_2024_01_07.html").exists());
}

#[test]
fn notes_writes_two_pages() {
    let (tmp, cfg) = setup("");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("planbook"));
    cmd.arg("--config").arg(&cfg).arg("notes");
    cmd.assert().success().stdout(predicate::str::contains("Generating a notes page into"));

    let html = fs::read_to_string(tmp.path().join("notes.html")).unwrap();
    assert_eq!(html.matches("<section").count(), 2);
}

#[test]
fn year_dry_run_counts_weeks() {
    let (_tmp, cfg) = setup("");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("planbook"));
    cmd.arg("--config").arg(&cfg).args(["year", "2024", "--dry-run"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generating 53 weeks of 2024 starting 2023-12-31"))
        .stdout(predicate::str::contains("quarter-overview Q2 2024-04-01..2024-06-30"));
}
