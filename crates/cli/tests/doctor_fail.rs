use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn doctor_fails_when_explicit_config_missing() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("nope.toml");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("planbook"));
    cmd.args(["doctor", "--config", missing.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("FAIL planbook doctor"))
        .stdout(predicate::str::contains("config file not found"));
}

#[test]
fn doctor_fails_on_unsupported_version() {
    let tmp = tempdir().unwrap();
    let cfg_dir = tmp.path().join("planbook");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(cfg_dir.join("config.toml"), "version = 7\n").unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("planbook"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.arg("doctor");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("FAIL planbook doctor"))
        .stdout(predicate::str::contains("version 7 is unsupported"))
        .stdout(predicate::str::contains("looked for:"));
}

#[test]
fn doctor_reports_template_rows_that_do_not_fit() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    fs::write(&cfg, "version = 1\n[templates]\nbase = \"weekly.toml\"\n").unwrap();
    fs::write(tmp.path().join("weekly.toml"), "[tasks.1]\n40 = \"Way down\"\n").unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("planbook"));
    cmd.args(["--config", cfg.to_str().unwrap(), "doctor"]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("FAIL planbook doctor"))
        .stdout(predicate::str::contains("task row 40 for Mon does not fit"));
}
