//! Per-invocation settings resolved from flags and the config file

use super::schema::Config;
use crate::error::{DexError, Result};

/// Immutable view of the effective settings for one command
///
/// Command-line values win over config values; empty values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub organization: String,
    pub project: String,
    pub repository: String,
    pub default_reviewer: String,
}

fn pick(flag: Option<&str>, configured: String) -> String {
    match flag.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => configured,
    }
}

impl Settings {
    pub fn resolve(config: Config, organization: Option<&str>, project: Option<&str>) -> Self {
        Self {
            organization: pick(organization, config.organization),
            project: pick(project, config.project),
            repository: config.repository,
            default_reviewer: config.default_reviewer,
        }
    }

    #[must_use]
    pub fn with_repository(mut self, repository: Option<&str>) -> Self {
        self.repository = pick(repository, self.repository);
        self
    }

    pub fn organization(&self) -> Result<&str> {
        if self.organization.is_empty() {
            return Err(DexError::validation(
                "organization not configured. Use --org flag or run 'dex auth login'",
            ));
        }
        Ok(&self.organization)
    }

    /// Organization, project and repository, or one error naming every
    /// missing value
    pub fn pull_request_target(&self) -> Result<(&str, &str, &str)> {
        let missing: Vec<&str> = [
            ("organization (--org)", &self.organization),
            ("project (--project)", &self.project),
            ("repository (--repo)", &self.repository),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(DexError::validation(format!(
                "missing required settings: {}. Pass the flags or run 'dex config set <key> <value>'",
                missing.join(", ")
            )));
        }

        Ok((&self.organization, &self.project, &self.repository))
    }
}
