// CommandFactory is used by tests via Cli::command()
#[allow(unused_imports)]
use clap::CommandFactory;

use clap::{Parser, Subcommand};
use clap_complete::engine::{ArgValueCompleter, CompletionCandidate};
use std::ffi::OsStr;
use std::process::Command;

/// Azure DevOps CLI for work item branches, pull requests and work items
#[derive(Parser, Debug)]
#[command(name = "dex", author, version, about, long_about = None)]
pub struct Cli {
    /// Azure DevOps organization (name or URL)
    #[arg(short, long = "org", value_name = "ORG", global = true)]
    pub org: Option<String>,

    /// Azure DevOps project
    #[arg(short, long, value_name = "PROJECT", global = true)]
    pub project: Option<String>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// When to use colored output
    #[arg(long, value_name = "WHEN", global = true, ignore_case = true)]
    pub color: Option<crate::color::ColorMode>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage authentication with Azure DevOps
    Auth {
        #[command(subcommand)]
        action: AuthCommand,
    },
    /// Manage work item branches
    Branch {
        #[command(subcommand)]
        action: BranchCommand,
    },
    /// View and start work items
    #[command(name = "workitem")]
    WorkItem {
        #[command(subcommand)]
        action: WorkItemCommand,
    },
    /// Manage pull requests
    Pr {
        #[command(subcommand)]
        action: PrCommand,
    },
    /// View and change configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        shell: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Store a Personal Access Token in the system keychain
    Login,
    /// Remove the stored token for the organization
    Logout,
    /// Show whether a token is stored for the organization
    Status,
}

#[derive(Subcommand, Debug)]
pub enum BranchCommand {
    /// Create a branch named `{type}/{id}/{description}` for a work item
    Create {
        /// Work item ID
        #[arg(allow_hyphen_values = true)]
        work_item_id: String,
        /// Branch description (lowercase letters, digits and hyphens)
        description: String,
        /// Base branch (defaults to the repository default branch)
        #[arg(short, long, value_name = "BRANCH", add = ArgValueCompleter::new(list_local_branches))]
        from: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum WorkItemCommand {
    /// Show work item details
    Show {
        /// Work item ID
        #[arg(allow_hyphen_values = true)]
        work_item_id: String,
    },
    /// Create, commit and push a branch for a work item
    Start {
        /// Work item ID
        #[arg(allow_hyphen_values = true)]
        work_item_id: String,
        /// Base branch to check out first (defaults to the current branch)
        #[arg(short, long, value_name = "BRANCH", add = ArgValueCompleter::new(list_local_branches))]
        from: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PrCommand {
    /// Create a pull request
    ///
    /// The source branch defaults to the current branch. A work item is linked
    /// automatically when the source branch follows `{type}/{id}/{description}`.
    Create {
        /// Target branch
        #[arg(short, long, value_name = "BRANCH", add = ArgValueCompleter::new(list_local_branches))]
        target: String,
        /// Pull request title
        #[arg(long)]
        title: String,
        /// Source branch (defaults to the current branch)
        #[arg(short, long, value_name = "BRANCH", add = ArgValueCompleter::new(list_local_branches))]
        source: Option<String>,
        /// Pull request description
        #[arg(long, default_value = "")]
        description: String,
        /// Work item ID to link (detected from the branch name by default)
        #[arg(short, long = "workitem", value_name = "ID", allow_hyphen_values = true)]
        workitem: Option<String>,
        /// Create as a draft pull request
        #[arg(long)]
        draft: bool,
        /// Repository name (defaults to the configured repository)
        #[arg(short, long, value_name = "NAME")]
        repo: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the current configuration
    Show,
    /// Set a configuration value
    Set {
        /// One of: organization, project, repository, default_reviewer
        key: String,
        value: String,
    },
}

/// List local Git branches for completion
///
/// Returns empty Vec if git command fails (e.g., not in a git repository)
#[must_use]
pub fn list_local_branches(current: &OsStr) -> Vec<CompletionCandidate> {
    let output = Command::new("git")
        .args(["for-each-ref", "--format=%(refname:short)", "refs/heads"])
        .output();

    let Ok(output) = output else {
        return Vec::new();
    };

    if !output.status.success() {
        return Vec::new();
    }

    filter_branches(&String::from_utf8_lossy(&output.stdout), &current.to_string_lossy())
        .into_iter()
        .map(CompletionCandidate::new)
        .collect()
}

/// Branch names from `for-each-ref` output that start with `prefix`
#[must_use]
pub fn filter_branches(output: &str, prefix: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty() && name.starts_with(prefix))
        .map(String::from)
        .collect()
}
