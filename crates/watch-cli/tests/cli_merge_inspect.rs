use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn demo_path(file: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("demos")
        .join(file)
}

fn write_temp(tag: &str, contents: &str) -> std::path::PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};

    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("watch_{tag}_{pid}_{nanos}.json"));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn merge_removes_null_members() {
    let target = write_temp("merge_target", r#"{"title":"Prim","price":250000}"#);
    let patch = write_temp("merge_patch", r#"{"title":null}"#);

    let mut cmd = cargo_bin_cmd!("watch");
    cmd.args(["merge", "--target", target.to_str().unwrap(), "--patch", patch.to_str().unwrap()]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v, serde_json::json!({"price": 250000}));

    let _ = std::fs::remove_file(&target);
    let _ = std::fs::remove_file(&patch);
}

#[test]
fn merge_array_patch_replaces_target() {
    let target = write_temp("merge_target_arr", r#"{"title":"Prim"}"#);
    let patch = write_temp("merge_patch_arr", r#"[1,2,3]"#);

    let mut cmd = cargo_bin_cmd!("watch");
    cmd.args([
        "merge",
        "--target",
        target.to_str().unwrap(),
        "--patch",
        patch.to_str().unwrap(),
        "--telemetry-json",
    ]);
    let assert = cmd
        .assert()
        .success()
        .stderr(predicate::str::contains("\"replaced_root\":true"));
    let v: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(v, serde_json::json!([1, 2, 3]));

    let _ = std::fs::remove_file(&target);
    let _ = std::fs::remove_file(&patch);
}

#[test]
fn inspect_lists_fields_and_fingerprint() {
    let mut cmd = cargo_bin_cmd!("watch");
    cmd.args(["inspect", demo_path("watch.json").to_str().unwrap()]);

    let out = cmd.assert().success().get_output().stdout.clone();
    let out = String::from_utf8(out).unwrap();
    let rows: Vec<Vec<&str>> = out.lines().map(|l| l.split_whitespace().collect()).collect();

    assert_eq!(rows[0], ["field", "value"]);
    assert_eq!(rows[1], ["id", "1"]);
    assert_eq!(rows[2], ["title", "Prim"]);
    assert_eq!(rows[3], ["price", "250000"]);
    assert_eq!(rows[4], ["description", "Fountain", "watch"]);
    assert_eq!(rows[5], ["fountain", "35", "bytes"]);
    assert_eq!(rows[6][0], "fingerprint");
    assert!(rows[6][1].starts_with("sha256:"));
}

#[test]
fn inspect_shows_absent_fields_as_dash() {
    let path = write_temp("inspect_partial", r#"{"title":"Prim"}"#);

    let mut cmd = cargo_bin_cmd!("watch");
    cmd.args(["inspect", path.to_str().unwrap()]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let out = String::from_utf8(out).unwrap();
    let id_row: Vec<&str> = out.lines().nth(1).unwrap().split_whitespace().collect();
    assert_eq!(id_row, ["id", "-"]);

    let _ = std::fs::remove_file(&path);
}
