//! Config commands - show and set persisted defaults

use anyhow::{Context, Result};
use std::path::Path;

use crate::color::{self, ColorMode};
use crate::commands::common::format_value;
use crate::config::{Config, ConfigKey, ConfigStore};

const RULE: &str = "─────────────────────────────────────────";

/// Plain-text block printed by `config show`
pub fn format_config(config: &Config, path: &Path) -> String {
    format!(
        "Current Configuration\n{RULE}\nOrganization:     {}\nProject:          {}\nRepository:       {}\nDefault Reviewer: {}\n\nConfig File: {}\n",
        format_value(&config.organization),
        format_value(&config.project),
        format_value(&config.repository),
        format_value(&config.default_reviewer),
        path.display()
    )
}

/// Set one key and save; returns the updated config
pub fn set_value(store: &ConfigStore, key: &str, value: &str) -> Result<Config> {
    let key: ConfigKey = key.parse()?;
    let mut config = store.load().context("failed to load config")?;
    config.set(key, value.trim());
    store.save(&config).context("failed to save config")?;
    Ok(config)
}

pub fn cmd_config_show() -> Result<()> {
    let store = ConfigStore::from_env()?;
    let config = store.load().context("failed to load config")?;
    print!("{}", format_config(&config, &store.path()));
    Ok(())
}

pub fn cmd_config_set(key: &str, value: &str, color_mode: ColorMode) -> Result<()> {
    let store = ConfigStore::from_env()?;
    set_value(&store, key, value)?;
    eprintln!(
        "{}",
        color::success(color_mode, format!("Set {key} = {}", value.trim()))
    );
    eprintln!(
        "{}",
        color::dim(color_mode, format!("Saved to {}", store.path().display()))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DexError, ErrorKind};
    use tempfile::TempDir;

    #[test]
    fn test_format_config_marks_unset_values() {
        let config = Config {
            organization: "contoso".to_string(),
            ..Config::default()
        };
        let output = format_config(&config, Path::new("/home/me/.dex-cli/config.yaml"));
        assert!(output.contains("Organization:     contoso"));
        assert!(output.contains("Project:          (not set)"));
        assert!(output.contains("Default Reviewer: (not set)"));
        assert!(output.ends_with("Config File: /home/me/.dex-cli/config.yaml\n"));
    }

    #[test]
    fn test_set_value_persists() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path());

        set_value(&store, "project", "Web").unwrap();
        set_value(&store, "default_reviewer", "alex@example.com").unwrap();

        let config = store.load().unwrap();
        assert_eq!(config.project, "Web");
        assert_eq!(config.default_reviewer, "alex@example.com");
    }

    #[test]
    fn test_set_value_unknown_key() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path());

        let err = set_value(&store, "token", "x").unwrap_err();
        let dex = err.downcast_ref::<DexError>().unwrap();
        assert_eq!(dex.kind(), ErrorKind::Validation);
        assert!(!store.path().exists());
    }
}
