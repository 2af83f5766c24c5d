#![allow(deprecated)]

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;

/// `dex` with an isolated config dir and plain output
fn dex(config_dir: &assert_fs::TempDir, cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dex").unwrap();
    cmd.env("DEX_CONFIG_DIR", config_dir.path())
        .env_remove("RUST_LOG")
        .current_dir(cwd)
        .arg("--color=never");
    if let Some(parent) = cwd.parent() {
        cmd.env("GIT_CEILING_DIRECTORIES", parent);
    }
    cmd
}

fn init_repo(dir: &Path) {
    for args in [
        &["init"][..],
        &["symbolic-ref", "HEAD", "refs/heads/main"],
        &["config", "user.name", "Test User"],
        &["config", "user.email", "test@example.com"],
        &["commit", "--allow-empty", "-m", "Initial commit"],
    ] {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(output.status.success(), "git {args:?} failed");
    }
}

#[test]
fn test_version_and_help() {
    let config = assert_fs::TempDir::new().unwrap();
    let cwd = assert_fs::TempDir::new().unwrap();

    dex(&config, cwd.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("dex "));

    dex(&config, cwd.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("workitem"))
        .stdout(predicate::str::contains("--org"));
}

#[test]
fn test_branch_create_rejects_invalid_id_before_touching_config() {
    let config = assert_fs::TempDir::new().unwrap();
    let cwd = assert_fs::TempDir::new().unwrap();

    dex(&config, cwd.path())
        .args(["branch", "create", "abc", "add-login"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid work item ID: abc"));

    config
        .child("config.yaml")
        .assert(predicate::path::missing());
}

#[test]
fn test_branch_create_rejects_bad_description() {
    let config = assert_fs::TempDir::new().unwrap();
    let cwd = assert_fs::TempDir::new().unwrap();

    dex(&config, cwd.path())
        .args(["branch", "create", "12345", "Add_Login"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "description must be lowercase with hyphens only (e.g., add-login-feature)",
        ));

    config
        .child("config.yaml")
        .assert(predicate::path::missing());
}

#[test]
fn test_branch_create_outside_repository() {
    let config = assert_fs::TempDir::new().unwrap();
    let cwd = assert_fs::TempDir::new().unwrap();

    dex(&config, cwd.path())
        .args(["branch", "create", "12345", "add-login"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));

    config
        .child("config.yaml")
        .assert(predicate::path::missing());
}

#[test]
fn test_workitem_start_rejects_negative_id() {
    let config = assert_fs::TempDir::new().unwrap();
    let cwd = assert_fs::TempDir::new().unwrap();

    dex(&config, cwd.path())
        .args(["workitem", "start", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid work item ID: -5"));
}

#[test]
fn test_workitem_show_rejects_zero_id() {
    let config = assert_fs::TempDir::new().unwrap();
    let cwd = assert_fs::TempDir::new().unwrap();

    dex(&config, cwd.path())
        .args(["workitem", "show", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid work item ID: 0"));
}

#[test]
fn test_pr_create_same_source_and_target() {
    let config = assert_fs::TempDir::new().unwrap();
    let repo = assert_fs::TempDir::new().unwrap();
    init_repo(repo.path());

    dex(&config, repo.path())
        .args(["pr", "create", "-t", "main", "--title", "Ship it"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "source branch cannot be the same as target branch: main",
        ));
}

#[test]
fn test_pr_create_lists_every_missing_setting() {
    let config = assert_fs::TempDir::new().unwrap();
    let repo = assert_fs::TempDir::new().unwrap();
    init_repo(repo.path());

    dex(&config, repo.path())
        .args([
            "pr",
            "create",
            "-s",
            "user-story/12345/add-login",
            "-t",
            "main",
            "--title",
            "Add login",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "missing required settings: organization (--org), project (--project), repository (--repo)",
        ));
}

#[test]
fn test_pr_create_only_reports_settings_still_missing() {
    let config = assert_fs::TempDir::new().unwrap();
    let repo = assert_fs::TempDir::new().unwrap();
    init_repo(repo.path());

    dex(&config, repo.path())
        .args([
            "--org",
            "contoso",
            "pr",
            "create",
            "-s",
            "feature",
            "-t",
            "main",
            "--title",
            "Add login",
            "--repo",
            "web",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "missing required settings: project (--project).",
        ));
}

#[test]
fn test_config_show_defaults() {
    let config = assert_fs::TempDir::new().unwrap();
    let cwd = assert_fs::TempDir::new().unwrap();

    dex(&config, cwd.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Configuration"))
        .stdout(predicate::str::contains("Organization:     (not set)"))
        .stdout(predicate::str::contains(
            config.child("config.yaml").path().display().to_string(),
        ));

    config
        .child("config.yaml")
        .assert(predicate::path::exists());
}

#[test]
fn test_config_set_then_show() {
    let config = assert_fs::TempDir::new().unwrap();
    let cwd = assert_fs::TempDir::new().unwrap();

    dex(&config, cwd.path())
        .args(["config", "set", "project", "Web"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Set project = Web"));

    dex(&config, cwd.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project:          Web"))
        .stdout(predicate::str::contains("Repository:       (not set)"));

    config
        .child("config.yaml")
        .assert(predicate::str::contains("project: Web"));
}

#[test]
fn test_config_set_unknown_key() {
    let config = assert_fs::TempDir::new().unwrap();
    let cwd = assert_fs::TempDir::new().unwrap();

    dex(&config, cwd.path())
        .args(["config", "set", "token", "secret"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown config key 'token'"));
}

#[test]
fn test_auth_status_without_organization() {
    let config = assert_fs::TempDir::new().unwrap();
    let cwd = assert_fs::TempDir::new().unwrap();

    dex(&config, cwd.path())
        .args(["auth", "status"])
        .assert()
        .success()
        .stderr(predicate::str::contains("⚠ Not authenticated"))
        .stderr(predicate::str::contains("dex auth login"));
}

#[test]
fn test_auth_logout_without_organization() {
    let config = assert_fs::TempDir::new().unwrap();
    let cwd = assert_fs::TempDir::new().unwrap();

    dex(&config, cwd.path())
        .args(["auth", "logout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no organization configured"));
}
