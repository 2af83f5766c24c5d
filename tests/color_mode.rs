#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn dex(config_dir: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dex").unwrap();
    cmd.env("DEX_CONFIG_DIR", config_dir.path())
        .env_remove("NO_COLOR");
    cmd
}

#[test]
fn test_color_flag_values_accepted() {
    let temp = assert_fs::TempDir::new().unwrap();
    for mode in ["always", "auto", "never"] {
        dex(&temp)
            .args([&format!("--color={mode}"), "config", "show"])
            .assert()
            .success();
    }
}

#[test]
fn test_color_flag_invalid() {
    let temp = assert_fs::TempDir::new().unwrap();
    dex(&temp)
        .args(["--color=invalid", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'invalid'"));
}

#[test]
fn test_color_flag_case_insensitive() {
    let temp = assert_fs::TempDir::new().unwrap();
    dex(&temp)
        .args(["--color=ALWAYS", "config", "show"])
        .assert()
        .success();
}

#[test]
fn test_color_never_has_no_escape_codes() {
    let temp = assert_fs::TempDir::new().unwrap();
    dex(&temp)
        .args(["--color=never", "config", "set", "project", "Web"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Set project = Web"))
        .stderr(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_color_always_colors_errors() {
    let temp = assert_fs::TempDir::new().unwrap();
    dex(&temp)
        .args(["--color=always", "config", "set", "token", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\x1b["));
}

#[test]
fn test_no_color_env_disables_auto() {
    let temp = assert_fs::TempDir::new().unwrap();
    dex(&temp)
        .env("NO_COLOR", "1")
        .args(["config", "set", "token", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\x1b[").not());
}
