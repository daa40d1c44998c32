///
/// moonlet-rtinfo Integration Tests
///
/// Runs the `moonlet-rtinfo` binary (located via
/// `env!("CARGO_BIN_EXE_moonlet-rtinfo")`) and asserts on stdout, stderr
/// and the exit status. Config files are written into a tempdir.
///
/// Run all:  `cargo test -p moonlet-rtinfo --test cli`
///

use std::process::{Command, Output};

fn rtinfo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_moonlet-rtinfo"))
        .args(args)
        .output()
        .expect("failed to run moonlet-rtinfo")
}

fn stdout_of(args: &[&str]) -> String {
    let output = rtinfo(args);
    assert!(
        output.status.success(),
        "moonlet-rtinfo {:?} failed:\n{}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn helpers_lists_every_symbol() {
    let out = stdout_of(&["helpers"]);
    let symbols: Vec<&str> = out
        .lines()
        .filter_map(|line| line.split('(').next())
        .collect();
    assert_eq!(
        symbols,
        vec![
            "rt_safe_index",
            "rt_convert",
            "rt_flatten_results",
            "rt_string_concat",
            "rt_spread_into",
            "rt_splice",
        ]
    );
}

#[test]
fn libraries_and_builtins() {
    let libraries = stdout_of(&["libraries"]);
    assert!(libraries.lines().any(|l| l.starts_with("string: ")));
    assert!(libraries.lines().any(|l| l.starts_with("math: ")));

    let builtins = stdout_of(&["builtins"]);
    assert!(builtins.contains("distance(geometry::Point, geometry::Point) -> f64  [lua_Distance]"));
    assert!(!builtins.contains("dump_state"));
}

#[test]
fn type_resolution() {
    let out = stdout_of(&["type", "geometry::Point"]);
    assert_eq!(out.trim(), "geometry::Point (reference, host module)");

    let out = stdout_of(&["type", "bool"]);
    assert_eq!(out.trim(), "bool (value, builtin) default false");

    let missing = rtinfo(&["type", "geometry::Square"]);
    assert!(!missing.status.success());
    assert!(String::from_utf8_lossy(&missing.stderr).contains("geometry::Square"));
}

#[test]
fn convert_reports_value_or_diagnostic() {
    let out = stdout_of(&["convert", "0x1f", "u8"]);
    assert_eq!(out.trim(), "0x1f as u8 = 31 (u8)");

    let out = stdout_of(&["convert", "0", "bool"]);
    assert_eq!(out.trim(), "0 as bool = false (bool)");

    let failed = rtinfo(&["convert", "abc", "i32"]);
    assert!(!failed.status.success());
    let stderr = String::from_utf8_lossy(&failed.stderr);
    assert!(stderr.contains("moonlet::runtime::type_conversion"), "{}", stderr);
}

#[test]
fn json_output() {
    let out = stdout_of(&["--json", "convert", "nil", "i64"]);
    let rows: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
    assert_eq!(rows[0]["value"], "0");
    assert_eq!(rows[0]["value_type"], "i64");
}

#[test]
fn config_file_changes_truthiness() {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let path = dir.path().join("moonlet.toml");
    std::fs::write(&path, "[runtime]\ntruthiness = \"nil-and-false\"\n").expect("write config");

    let out = stdout_of(&["--config", &path.to_string_lossy(), "convert", "0", "bool"]);
    assert_eq!(out.trim(), "0 as bool = true (bool)");
}

#[test]
fn invalid_config_fails() {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let path = dir.path().join("moonlet.toml");
    std::fs::write(&path, "[runtime]\nbuiltin_prefix = \"\"\n").expect("write config");

    let output = rtinfo(&["--config", &path.to_string_lossy(), "helpers"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("builtin_prefix"));
}
