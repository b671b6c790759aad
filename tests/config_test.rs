use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn egtree(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("egtree").unwrap();
    cmd.env("EGTREE_CONFIG_DIR", config_dir.path())
        .env_remove("EGTREE_CLIENT_ID")
        .env_remove("EGTREE_CLIENT_SECRET")
        .env_remove("EGTREE_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_config_path_uses_environment_override() {
    let dir = TempDir::new().unwrap();
    let expected = dir.path().join("config.yml");

    egtree(&dir)
        .args(["config", "get", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn test_config_get_creates_default_configuration() {
    let dir = TempDir::new().unwrap();

    egtree(&dir)
        .args(["config", "get", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://developer.api.autodesk.com"))
        .stdout(predicate::str::contains("data:read"));

    assert!(dir.path().join("config.yml").exists());
}

#[test]
fn test_config_export() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("exported").join("egtree.yml");

    egtree(&dir)
        .args(["config", "export", "--output"])
        .arg(&target)
        .assert()
        .success();

    let exported = std::fs::read_to_string(&target).unwrap();
    assert!(exported.contains("api_base_url"));
}

#[test]
fn test_hub_clear_removes_active_hub() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.yml"), "active_hub_id: b.123\n").unwrap();

    egtree(&dir).args(["hub", "clear"]).assert().success();

    let saved = std::fs::read_to_string(dir.path().join("config.yml")).unwrap();
    assert!(!saved.contains("b.123"));
}

#[test]
fn test_broken_configuration_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.yml"), "timeout: [not, a, number]\n").unwrap();

    egtree(&dir)
        .args(["config", "get"])
        .assert()
        .code(78)
        .stderr(predicate::str::contains("ERROR:"));
}
