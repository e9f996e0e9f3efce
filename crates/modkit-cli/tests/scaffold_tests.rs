//! End-to-end tests for `modkit scaffold`.

use assert_cmd::Command;
use predicates::prelude::*;

fn modkit() -> Command {
    Command::cargo_bin("modkit").expect("binary builds")
}

fn list_files(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn minimal_scaffold_writes_manifest_and_module_config() {
    let dir = tempfile::tempdir().unwrap();

    modkit()
        .args([
            "scaffold",
            "--directory",
            dir.path().to_str().unwrap(),
            "--module-name",
            "template-operator",
            "--module-version",
            "1.0.0",
            "--module-channel",
            "regular",
            "--config-file",
            "module-config.yaml",
        ])
        .assert()
        .success();

    assert_eq!(
        list_files(dir.path()),
        vec!["manifest.yaml", "module-config.yaml"]
    );

    let config = std::fs::read_to_string(dir.path().join("module-config.yaml")).unwrap();
    assert!(config.contains("name: template-operator"));
    assert!(config.contains("version: 1.0.0"));
    assert!(config.contains("channel: regular"));
    assert!(config.contains("manifest: manifest.yaml"));
    // Skipped steps cross-reference empty paths.
    assert!(config.contains("defaultCR: \n"));
    assert!(config.contains("security: \n"));
}

#[test]
fn full_scaffold_writes_all_four_files() {
    let dir = tempfile::tempdir().unwrap();

    modkit()
        .args([
            "scaffold",
            "--directory",
            dir.path().to_str().unwrap(),
            "--module-name",
            "template-operator",
            "--gen-default-cr",
            "--gen-security-config",
        ])
        .assert()
        .success();

    assert_eq!(
        list_files(dir.path()),
        vec![
            "default-cr.yaml",
            "manifest.yaml",
            "scaffold-module-config.yaml",
            "sec-scanners-config.yaml",
        ]
    );

    let config = std::fs::read_to_string(dir.path().join("scaffold-module-config.yaml")).unwrap();
    assert!(config.contains("default-cr.yaml"));
    assert!(config.contains("sec-scanners-config.yaml"));

    let security = std::fs::read_to_string(dir.path().join("sec-scanners-config.yaml")).unwrap();
    assert!(security.contains("module-name: template-operator"));

    let manifest = std::fs::read_to_string(dir.path().join("manifest.yaml")).unwrap();
    assert!(manifest.starts_with("# This file holds the Manifest of your module"));
}

#[test]
fn refuses_to_overwrite_existing_module_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("scaffold-module-config.yaml"),
        "name: existing\n",
    )
    .unwrap();

    modkit()
        .args(["scaffold", "--directory", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    // Nothing else was written and the existing file is untouched.
    assert_eq!(list_files(dir.path()), vec!["scaffold-module-config.yaml"]);
    let existing =
        std::fs::read_to_string(dir.path().join("scaffold-module-config.yaml")).unwrap();
    assert_eq!(existing, "name: existing\n");
}

#[test]
fn overwrite_flag_regenerates_module_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("scaffold-module-config.yaml"),
        "name: existing\n",
    )
    .unwrap();

    modkit()
        .args([
            "scaffold",
            "--directory",
            dir.path().to_str().unwrap(),
            "--overwrite",
        ])
        .assert()
        .success();

    let regenerated =
        std::fs::read_to_string(dir.path().join("scaffold-module-config.yaml")).unwrap();
    assert!(regenerated.contains("manifest: manifest.yaml"));
}

#[test]
fn invalid_channel_fails_before_writing_anything() {
    let dir = tempfile::tempdir().unwrap();

    modkit()
        .args([
            "scaffold",
            "--directory",
            dir.path().to_str().unwrap(),
            "--module-channel",
            "Regular",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("module-channel"));

    assert!(list_files(dir.path()).is_empty());
}
