//! End-to-end runs of the demo binary.

use std::process::Command;

fn clitree_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_clitree"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_a_exits_with_positional_count() {
    let output = clitree_cmd()
        .args(["a", "x", "y"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "should exit 2\n");
    assert!(output.stderr.is_empty());
}

#[test]
fn test_a_json_reports_defaults_and_inherited_options() {
    let output = clitree_cmd()
        .args(["-debug", "a", "-json", "-l", "3"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("should exit 0"));
    let values: serde_json::Value =
        serde_json::from_str(lines.next().expect("missing JSON line")).unwrap();
    assert_eq!(values["debug"], true);
    assert_eq!(values["json"], true);
    assert_eq!(values["level"], 3);
    assert_eq!(values["n"], "sam");
}

#[test]
fn test_b_alias_collects_env() {
    let output = clitree_cmd()
        .args(["bbb", "-e", "k=v", "--e=a=b"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "args: []\n\ta: b\n\tk: v\n");
}

#[test]
fn test_b_without_input_shows_usage() {
    let output = clitree_cmd()
        .arg("b")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("synopsis: b cool and use clitree\n"), "{stderr}");
    assert!(stderr.contains("available clitree options:"));
    assert!(stderr.contains("-e"));
    assert!(stderr.contains("please supply some -e flags or args"));
}

#[test]
fn test_unknown_subcommand_shows_root_usage() {
    let output = clitree_cmd()
        .arg("zzz")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("synopsis: clitree run me and see\n"));
    assert!(stderr.contains("commands:"));
    assert!(stderr.contains("clitree does not have command \"zzz\""));
}

#[test]
fn test_bad_level_is_reported_without_usage() {
    let output = clitree_cmd()
        .args(["a", "-level", "high"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("option level: invalid int \"high\""), "{stderr}");
    assert!(!stderr.contains("synopsis:"));
}
