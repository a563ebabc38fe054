//! Integration tests for the cellsheet driver

use std::fs;
use std::path::Path;
use std::process::Command;

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_cellsheet"))
        // Tests must be deterministic and not depend on a user's ~/.config/cellsheet/config.toml.
        .arg("--no-default-config")
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp path is UTF-8")
}

#[test]
fn test_no_cells_prints_nothing() {
    let (stdout, _, code) = run_command(&[]);
    assert_eq!(stdout, "");
    assert_eq!(code, 0);
}

#[test]
fn test_set_and_print() {
    let (stdout, _, code) = run_command(&["-s", "A1=6", "-s", "A2==A1 * 7", "--set", "B1=hi"]);
    assert_eq!(stdout, "A1\t6\t6\nA2\t=A1*7\t42\nB1\thi\thi\n");
    assert_eq!(code, 0);
}

#[test]
fn test_recalculates_dependents() {
    let (stdout, _, code) = run_command(&[
        "-s", "A1=6", "-s", "A2==A1+1", "-s", "A3==A2+1", "-s", "A1=7",
    ]);
    assert!(stdout.contains("A3\t=A2+1\t9\n"));
    assert_eq!(code, 0);
}

#[test]
fn test_eval_error_is_a_value() {
    let (stdout, _, code) = run_command(&["-s", "A1==1/0", "-s", "A2==A1+1"]);
    assert_eq!(stdout, "A1\t=1/0\t#ERR!\nA2\t=A1+1\t#ERR!\n");
    assert_eq!(code, 0);
}

#[test]
fn test_circular_dependency_fails() {
    let (stdout, stderr, code) = run_command(&["-s", "A1==B1+1", "-s", "B1==A1"]);
    assert_eq!(stdout, "");
    assert!(stderr.starts_with("Error:"));
    assert!(stderr.contains("Circular dependency"));
    assert_eq!(code, 1);
}

#[test]
fn test_format_error_fails() {
    let (_, stderr, code) = run_command(&["-s", "A1==1+"]);
    assert!(stderr.contains("Invalid formula"));
    assert_eq!(code, 1);
}

#[test]
fn test_missing_assignment_content() {
    let (_, stderr, code) = run_command(&["-s", "A1"]);
    assert!(stderr.contains("missing"));
    assert_eq!(code, 1);
}

#[test]
fn test_unknown_option() {
    let (_, stderr, code) = run_command(&["--frobnicate"]);
    assert!(stderr.contains("Unknown option"));
    assert_eq!(code, 1);
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.xml");

    let (_, _, code) = run_command(&["-s", "A1=2", "-s", "B1==A1*A1", "-o", path_arg(&path)]);
    assert_eq!(code, 0);
    assert!(fs::read_to_string(&path).unwrap().contains("<contents>=A1*A1</contents>"));

    let (stdout, _, code) = run_command(&[path_arg(&path), "-s", "A1=5"]);
    assert_eq!(stdout, "A1\t5\t5\nB1\t=A1*A1\t25\n");
    assert_eq!(code, 0);
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.xml");
    let (_, stderr, code) = run_command(&[path_arg(&path)]);
    assert!(stderr.contains("Failed to load"));
    assert_eq!(code, 1);
}

#[test]
fn test_config_normalizes_names() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        "version = \"ps6\"\nname_case = \"upper\"\nname_pattern = \"^[A-Z][0-9]{1,2}$\"\n",
    )
    .unwrap();

    let (stdout, _, code) = run_command(&["-c", path_arg(&config), "-s", "a1=3", "-s", "b1==a1+1"]);
    assert_eq!(stdout, "A1\t3\t3\nB1\t=A1+1\t4\n");
    assert_eq!(code, 0);

    let (_, stderr, code) = run_command(&["-c", path_arg(&config), "-s", "abc1=3"]);
    assert!(stderr.contains("Invalid cell name"));
    assert_eq!(code, 1);
}

#[test]
fn test_version_mismatch_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let path = dir.path().join("sheet.xml");
    fs::write(&config, "version = \"ps6\"\n").unwrap();

    let (_, _, code) = run_command(&["-s", "A1=1", "-o", path_arg(&path)]);
    assert_eq!(code, 0);

    let (_, stderr, code) = run_command(&["-c", path_arg(&config), path_arg(&path)]);
    assert!(stderr.contains("version mismatch"));
    assert_eq!(code, 1);
}
