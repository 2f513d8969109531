use planbook_core::config::loader::{ConfigError, ConfigLoader};
use planbook_core::schedule::TemplateError;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn load_err(toml: &str) -> ConfigError {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    write_file(&cfg_path, toml);
    ConfigLoader::load(Some(&cfg_path), None).unwrap_err()
}

fn invalid_field(err: ConfigError) -> &'static str {
    match err {
        ConfigError::Invalid { field, .. } => field,
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn missing_file_fails() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("nope/config.toml");
    let err = ConfigLoader::load(Some(&cfg_path), None).unwrap_err();
    match err {
        ConfigError::NotFound(_) => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn bad_version_fails() {
    match load_err("version = 2\n") {
        ConfigError::BadVersion(2) => {}
        other => panic!("expected BadVersion(2), got {other:?}"),
    }
}

#[test]
fn unknown_keys_fail_to_parse() {
    match load_err("version = 1\n[page]\ncolumnz = 4\n") {
        ConfigError::ParseError(_, _) => {}
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn unsupported_locale_fails() {
    assert_eq!(invalid_field(load_err("version = 1\nlocale = \"fr\"\n")), "locale");
}

#[test]
fn single_column_fails() {
    assert_eq!(invalid_field(load_err("version = 1\n[page]\ncolumns = 1\n")), "page.columns");
}

#[test]
fn empty_hours_fail() {
    assert_eq!(invalid_field(load_err("version = 1\n[hours]\nlabels = []\n")), "hours.labels");
}

#[test]
fn bad_color_fails() {
    assert_eq!(invalid_field(load_err("version = 1\n[colors]\ndark = \"black\"\n")), "colors.dark");
}

#[test]
fn bad_quarter_month_fails() {
    assert_eq!(
        invalid_field(load_err("version = 1\n[calendar]\nq1_start_month = 13\n")),
        "calendar.q1_start_month"
    );
}

#[test]
fn zero_length_sprints_fail() {
    let toml = "version = 1\n[calendar.sprints]\nepoch = \"2023-01-04\"\nlength_days = 0\n";
    assert_eq!(invalid_field(load_err(toml)), "calendar.sprints.length_days");
}

#[test]
fn missing_template_file_fails() {
    match load_err("version = 1\n[templates]\nbase = \"nowhere.toml\"\n") {
        ConfigError::Template(TemplateError::Read { .. }) => {}
        other => panic!("expected Template(Read), got {other:?}"),
    }
}

#[test]
fn template_problems_surface_as_template_errors() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    write_file(&cfg_path, "version = 1\n[templates]\nbase = \"weekly.toml\"\n");

    let cases = [
        ("[tasks.7]\n0 = \"x\"\n", "InvalidWeekday"),
        ("[tasks.1]\n24 = \"x\"\n", "RowOutOfRange"),
        ("[appointments.1]\n\"\" = \"x\"\n", "BlankHourLabel"),
        ("[appointments.1]\n\"7\" = \"x\"\n", "UnknownHourLabel"),
        ("[roster]\n2 = [\" \"]\n", "BlankName"),
    ];
    for (template, expected) in cases {
        write_file(&tmp.path().join("weekly.toml"), template);
        let err = ConfigLoader::load(Some(&cfg_path), None).unwrap_err();
        let name = match &err {
            ConfigError::Template(TemplateError::InvalidWeekday { .. }) => "InvalidWeekday",
            ConfigError::Template(TemplateError::RowOutOfRange { .. }) => "RowOutOfRange",
            ConfigError::Template(TemplateError::BlankHourLabel { .. }) => "BlankHourLabel",
            ConfigError::Template(TemplateError::UnknownHourLabel { .. }) => "UnknownHourLabel",
            ConfigError::Template(TemplateError::BlankName { .. }) => "BlankName",
            other => panic!("unexpected error for {template:?}: {other:?}"),
        };
        assert_eq!(name, expected, "{template}");
    }
}
