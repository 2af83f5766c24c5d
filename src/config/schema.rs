//! Configuration schema and type definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DexError;

/// Persisted defaults for dex
///
/// Empty strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub repository: String,
    #[serde(default)]
    pub default_reviewer: String,
}

/// Keys accepted by `dex config set`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Organization,
    Project,
    Repository,
    DefaultReviewer,
}

impl ConfigKey {
    pub const ALL: [Self; 4] = [
        Self::Organization,
        Self::Project,
        Self::Repository,
        Self::DefaultReviewer,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Project => "project",
            Self::Repository => "repository",
            Self::DefaultReviewer => "default_reviewer",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = DexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|key| key.as_str()).collect();
                DexError::validation(format!(
                    "unknown config key '{s}' (valid keys: {})",
                    valid.join(", ")
                ))
            })
    }
}

impl Config {
    pub fn get(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::Organization => &self.organization,
            ConfigKey::Project => &self.project,
            ConfigKey::Repository => &self.repository,
            ConfigKey::DefaultReviewer => &self.default_reviewer,
        }
    }

    pub fn set(&mut self, key: ConfigKey, value: impl Into<String>) {
        let slot = match key {
            ConfigKey::Organization => &mut self.organization,
            ConfigKey::Project => &mut self.project,
            ConfigKey::Repository => &mut self.repository,
            ConfigKey::DefaultReviewer => &mut self.default_reviewer,
        };
        *slot = value.into();
    }
}
