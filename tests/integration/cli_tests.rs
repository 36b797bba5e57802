//! Command-line tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A decompiled tree plus library lists, laid out like a real workspace
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let app = dir.path().join("sample");
    write(&app, "AndroidManifest.xml", r#"<manifest package="com.app"/>"#);
    write(
        &app,
        "smali/com/app/Main.smali",
        ".class public Lcom/app/Main;\n.super Landroid/app/Activity;\n\n.method protected onCreate(Landroid/os/Bundle;)V\n    return-void\n.end method\n",
    );
    write(
        &app,
        "smali/com/app/vendor/Tracker.smali",
        ".class public Lcom/app/vendor/Tracker;\n.method public track()V\n    return-void\n.end method\n",
    );
    write(
        &app,
        "smali_classes2/androidx/core/Compat.smali",
        ".class public Landroidx/core/Compat;\n",
    );
    write(dir.path(), "Libraries/AndroidLibraries.txt", "com.app.vendor\n");
    write(dir.path(), "Libraries/SystemLibraries.txt", "androidx\nandroid.support\n");
    dir
}

fn smalisift(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("smalisift").unwrap();
    cmd.current_dir(cwd);
    cmd
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    smalisift(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--prefix-match"));
}

#[test]
fn test_json_report_on_decompiled_dir() {
    let dir = workspace();
    let output = smalisift(dir.path())
        .args(["sample", "--format", "json", "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["filter"]["package"], "com.app");
    assert_eq!(value["filter"]["start"], 3);
    assert_eq!(value["filter"]["after_libraries"], 1);
    assert_eq!(value["classes"], serde_json::json!(["com.app.Main"]));
    assert_eq!(value["summary"]["methods"], 1);
    assert_eq!(value["files"].as_array().unwrap().len(), 1);
}

#[test]
fn test_package_override() {
    let dir = workspace();
    let output = smalisift(dir.path())
        .args(["sample", "--format", "json", "--quiet", "--package", "androidx"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // androidx survives the package pass, then the system list removes it
    assert_eq!(value["filter"]["after_package"], 1);
    assert_eq!(value["filter"]["after_system"], 0);
}

#[test]
fn test_terminal_report_lists_files_and_methods() {
    let dir = workspace();
    smalisift(dir.path())
        .args(["sample", "--list-files", "--show-methods"])
        .assert()
        .success()
        .stdout(predicate::str::contains("smali/com/app/Main.smali"))
        .stdout(predicate::str::contains(
            ".method protected onCreate(Landroid/os/Bundle;)V",
        ))
        .stdout(predicate::str::contains("Tracker").not());
}

#[test]
fn test_list_all_files_includes_library_units() {
    let dir = workspace();
    smalisift(dir.path())
        .args(["sample", "--list-all-files"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All smali files"))
        .stdout(predicate::str::contains("smali/com/app/vendor/Tracker.smali"))
        .stdout(predicate::str::contains(
            "smali_classes2/androidx/core/Compat.smali",
        ));
}

#[test]
fn test_empty_package_override_falls_back_to_manifest() {
    let dir = workspace();
    let output = smalisift(dir.path())
        .args(["sample", "--package", "", "--format", "json", "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["filter"]["package"], "com.app");
    assert_eq!(value["classes"], serde_json::json!(["com.app.Main"]));
}

#[test]
fn test_json_output_file() {
    let dir = workspace();
    smalisift(dir.path())
        .args(["sample", "-f", "json", "-o", "report.json", "--quiet"])
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("report.json")).unwrap();
    assert!(text.contains("com.app.Main"));
}

#[test]
fn test_missing_apk_fails() {
    let dir = TempDir::new().unwrap();
    smalisift(dir.path())
        .arg("missing.apk")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing APK"));
}

#[cfg(unix)]
#[test]
fn test_failing_decompiler_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.apk"), b"PK").unwrap();

    smalisift(dir.path())
        .args(["app.apk", "--decompiler", "false", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("false failed"));
}

#[test]
fn test_cleanup_with_yes_removes_tree() {
    let dir = workspace();
    smalisift(dir.path())
        .args(["sample", "--cleanup", "--yes", "--quiet"])
        .assert()
        .success();
    assert!(!dir.path().join("sample").exists());
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    smalisift(dir.path())
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("smalisift"));
}
