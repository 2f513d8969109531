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

#[test]
fn doctor_reads_provided_config_path() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    let toml = r#"
version = 1
locale = "de_DE"

[page]
size = "a4"
columns = 5

[calendar]
q1_start_month = 2
[calendar.sprints]
epoch = "2023-01-04"
length_days = 14

[templates]
base = "weekly.toml"
roster_order = "date"

[output]
dir = "/tmp/planbook-out"
"#;
    write_file(&cfg, toml);
    write_file(&tmp.path().join("weekly.toml"), "[tasks.1]\n0 = \"Sign folder\"\n[roster]\n2 = [\"Hendrik\"]\n");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("planbook"));
    cmd.args(["doctor", "--config", cfg.to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OK   planbook doctor"))
        .stdout(predicate::str::contains(format!("path: {}", cfg.display())))
        .stdout(predicate::str::contains("locale: de"))
        .stdout(predicate::str::contains("page: A4, 5 columns"))
        .stdout(predicate::str::contains("q1_start_month: 2"))
        .stdout(predicate::str::contains("sprints: every 14 days from 2023-01-04"))
        .stdout(predicate::str::contains("weekly.toml"))
        .stdout(predicate::str::contains("roster_order: Date"))
        .stdout(predicate::str::contains("output_dir: /tmp/planbook-out"));
}

#[test]
fn doctor_uses_xdg_default_when_present() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("planbook").join("config.toml");
    write_file(&cfg_path, "version = 1\n[hours]\nlabels = [\"\", \"9\", \"10\", \"11\", \"\"]\n");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("planbook"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.arg("doctor");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OK   planbook doctor"))
        .stdout(predicate::str::contains("hours: 5 labels"));
}

#[test]
fn doctor_falls_back_to_defaults_without_a_config() {
    let tmp = tempdir().unwrap();
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("planbook"));
    cmd.env("XDG_CONFIG_HOME", tmp.path()); // empty dir, no config
    cmd.args(["doctor", "--locale", "de"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(not found, using defaults)"))
        .stdout(predicate::str::contains("locale: de"))
        .stdout(predicate::str::contains("page: Letter, 4 columns"))
        .stdout(predicate::str::contains("hours: 14 labels"));
}
