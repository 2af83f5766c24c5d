//! Common utility functions for command handlers
//!
//! This module contains shared helper functions used across multiple commands.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::color::{self, ColorMode};
use crate::config::{Config, ConfigStore, Settings};
use crate::domain::pull_request::{CreatePullRequest, PullRequest, Repository};
use crate::domain::work_item::WorkItem;
use crate::error::DexError;
use crate::integrations::azdo::{AzureDevOpsClient, PullRequestService, WorkItemTracker};
use crate::integrations::credentials::{CredentialStore, KeyringStore};

/// Flags shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub organization: Option<String>,
    pub project: Option<String>,
    pub color_mode: ColorMode,
}

impl GlobalOptions {
    /// Resolve settings against a loaded config
    pub fn settings(&self, config: Config) -> Settings {
        Settings::resolve(config, self.organization.as_deref(), self.project.as_deref())
    }
}

/// Parse a work item ID from the command line; must be a positive integer
pub fn parse_work_item_id(input: &str) -> crate::error::Result<u32> {
    match input.trim().parse::<u32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(DexError::validation(format!("invalid work item ID: {input}"))),
    }
}

pub fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("failed to get current directory")
}

/// Load the config file and resolve it against the global flags
pub fn load_settings(options: &GlobalOptions) -> Result<Settings> {
    let config = ConfigStore::from_env()?
        .load()
        .context("failed to load config")?;
    Ok(options.settings(config))
}

/// Build an API client for the settings' organization using the stored token
pub fn connect(settings: &Settings) -> Result<AzureDevOpsClient> {
    let organization = settings.organization()?;
    let token = KeyringStore.get(organization)?;
    Ok(AzureDevOpsClient::new(organization, &token)?)
}

/// Render a config value, marking empty ones
pub fn format_value(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

/// API collaborator decorator that shows a spinner around each call
pub struct Spinning<'a, C> {
    inner: &'a C,
    color_mode: ColorMode,
}

impl<'a, C> Spinning<'a, C> {
    pub const fn new(inner: &'a C, color_mode: ColorMode) -> Self {
        Self { inner, color_mode }
    }
}

impl<C: WorkItemTracker> WorkItemTracker for Spinning<'_, C> {
    fn fetch_work_item(&self, id: u32) -> crate::error::Result<WorkItem> {
        color::with_spinner(self.color_mode, &format!("Fetching work item #{id}"), || {
            self.inner.fetch_work_item(id)
        })
    }
}

impl<C: PullRequestService> PullRequestService for Spinning<'_, C> {
    fn fetch_repository(&self, project: &str, name: &str) -> crate::error::Result<Repository> {
        color::with_spinner(self.color_mode, &format!("Looking up repository {name}"), || {
            self.inner.fetch_repository(project, name)
        })
    }

    fn create_pull_request(
        &self,
        project: &str,
        repository_id: &str,
        request: &CreatePullRequest,
    ) -> crate::error::Result<PullRequest> {
        color::with_spinner(self.color_mode, "Creating pull request", || {
            self.inner
                .create_pull_request(project, repository_id, request)
        })
    }
}
