#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
use std::path::Path;
use std::process::{Command, Output};

use crate::error::{DexError, Result};

/// Git operations the workflows need, all scoped to a working tree path
pub trait GitClient {
    /// Whether `path` is inside a git working tree
    fn is_repository(&self, path: &Path) -> bool;

    /// Name of the checked-out branch
    fn current_branch(&self, path: &Path) -> Result<String>;

    /// Default branch: `origin/HEAD` target, else local `main`, else `master`
    fn default_branch(&self, path: &Path) -> Result<String>;

    /// Whether a local branch with this name exists
    fn branch_exists(&self, path: &Path, name: &str) -> Result<bool>;

    /// Check out `base`, then create and switch to `name`
    fn create_branch(&self, path: &Path, name: &str, base: &str) -> Result<()>;

    fn checkout(&self, path: &Path, name: &str) -> Result<()>;

    /// Record an empty commit with the given message
    fn commit(&self, path: &Path, message: &str) -> Result<()>;

    /// Push the branch to `origin` and set upstream
    fn push(&self, path: &Path, branch: &str) -> Result<()>;

    /// URL of the `origin` remote
    fn remote_url(&self, path: &Path) -> Result<String>;
}

/// Git client backed by the `git` executable
#[derive(Debug, Default)]
pub struct RealGitClient;

impl RealGitClient {
    fn output(path: &Path, args: &[&str], operation: &str) -> Result<Output> {
        tracing::debug!(dir = %path.display(), ?args, "running git");
        Command::new("git")
            .args(args)
            .current_dir(path)
            .output()
            .map_err(|e| DexError::git(operation, format!("failed to execute git: {e}")))
    }

    /// Run git and return trimmed stdout, failing on non-zero exit
    fn run(path: &Path, args: &[&str], operation: &str) -> Result<String> {
        let output = Self::output(path, args, operation)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DexError::git(operation, stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn succeeds(path: &Path, args: &[&str]) -> bool {
        Command::new("git")
            .args(args)
            .current_dir(path)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

impl GitClient for RealGitClient {
    fn is_repository(&self, path: &Path) -> bool {
        Self::succeeds(path, &["rev-parse", "--git-dir"])
    }

    fn current_branch(&self, path: &Path) -> Result<String> {
        Self::run(path, &["rev-parse", "--abbrev-ref", "HEAD"], "rev-parse")
    }

    fn default_branch(&self, path: &Path) -> Result<String> {
        if let Ok(target) = Self::run(
            path,
            &["symbolic-ref", "refs/remotes/origin/HEAD"],
            "symbolic-ref",
        ) {
            if let Some(branch) = parse_remote_head(&target) {
                return Ok(branch);
            }
        }

        for candidate in ["main", "master"] {
            if Self::succeeds(path, &["rev-parse", "--verify", "--quiet", candidate]) {
                return Ok(candidate.to_string());
            }
        }

        Err(DexError::not_found(
            "could not determine default branch (no origin/HEAD, main or master)",
        ))
    }

    fn branch_exists(&self, path: &Path, name: &str) -> Result<bool> {
        let reference = format!("refs/heads/{name}");
        let output = Self::output(
            path,
            &["show-ref", "--verify", "--quiet", &reference],
            "show-ref",
        )?;

        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(DexError::git("show-ref", stderr.trim()))
            }
        }
    }

    fn create_branch(&self, path: &Path, name: &str, base: &str) -> Result<()> {
        Self::run(path, &["checkout", base], "checkout")?;
        Self::run(path, &["checkout", "-b", name], "checkout -b")?;
        Ok(())
    }

    fn checkout(&self, path: &Path, name: &str) -> Result<()> {
        Self::run(path, &["checkout", name], "checkout")?;
        Ok(())
    }

    fn commit(&self, path: &Path, message: &str) -> Result<()> {
        Self::run(path, &["commit", "--allow-empty", "-m", message], "commit")?;
        Ok(())
    }

    fn push(&self, path: &Path, branch: &str) -> Result<()> {
        Self::run(path, &["push", "-u", "origin", branch], "push")?;
        Ok(())
    }

    fn remote_url(&self, path: &Path) -> Result<String> {
        Self::run(path, &["config", "--get", "remote.origin.url"], "config")
    }
}

/// Branch name from `git symbolic-ref refs/remotes/origin/HEAD` output
fn parse_remote_head(target: &str) -> Option<String> {
    target
        .trim()
        .strip_prefix("refs/remotes/origin/")
        .filter(|branch| !branch.is_empty())
        .map(String::from)
}
