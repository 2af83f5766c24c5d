//! Configuration module
//!
//! This module handles loading and saving the dex YAML config and resolving
//! per-invocation settings.

pub mod loader;
pub mod schema;
pub mod settings;

pub use loader::{ConfigStore, CONFIG_DIR_ENV, CONFIG_FILE_NAME};
pub use schema::{Config, ConfigKey};
pub use settings::Settings;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_empty() {
        let config = Config::default();
        assert_eq!(config.organization, "");
        assert_eq!(config.project, "");
        assert_eq!(config.repository, "");
        assert_eq!(config.default_reviewer, "");
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r"
organization: contoso
project: Web
repository: app
default_reviewer: alex@example.com
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.organization, "contoso");
        assert_eq!(config.project, "Web");
        assert_eq!(config.repository, "app");
        assert_eq!(config.default_reviewer, "alex@example.com");
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let config: Config = serde_yaml::from_str("organization: contoso\n").unwrap();
        assert_eq!(config.organization, "contoso");
        assert_eq!(config.project, "");
    }

    #[test]
    fn test_config_key_parse() {
        assert_eq!("organization".parse::<ConfigKey>().unwrap(), ConfigKey::Organization);
        assert_eq!(
            "default_reviewer".parse::<ConfigKey>().unwrap(),
            ConfigKey::DefaultReviewer
        );
        let err = "token".parse::<ConfigKey>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("unknown config key 'token'"));
    }

    #[test]
    fn test_config_get_set() {
        let mut config = Config::default();
        for key in ConfigKey::ALL {
            config.set(key, format!("value-{key}"));
        }
        assert_eq!(config.get(ConfigKey::Project), "value-project");
        assert_eq!(config.default_reviewer, "value-default_reviewer");
    }

    #[test]
    fn test_load_creates_default_file() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path().join("nested").join(".dex-cli"));

        let config = store.load().unwrap();
        assert_eq!(config, Config::default());
        assert!(store.path().exists());
        assert!(store.path().ends_with("config.yaml"));
    }

    #[cfg(unix)]
    #[test]
    fn test_load_creates_private_directory() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path().join(".dex-cli"));
        store.load().unwrap();

        let mode = std::fs::metadata(store.dir()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path());

        let mut config = Config::default();
        config.set(ConfigKey::Organization, "contoso");
        config.set(ConfigKey::Repository, "app");
        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn test_empty_file_loads_defaults() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path());
        std::fs::write(store.path(), "").unwrap();

        assert_eq!(store.load().unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::new(temp.path());
        std::fs::write(store.path(), "organization: [unclosed").unwrap();

        let err = store.load().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("failed to parse config file"));
    }

    #[test]
    #[serial_test::serial]
    fn test_config_dir_from_env() {
        let dir = std::env::temp_dir().join("dex_config_env");
        temp_env::with_var(CONFIG_DIR_ENV, Some(&dir), || {
            assert_eq!(Config::config_dir(), Some(dir.clone()));
        });
    }

    #[test]
    #[serial_test::serial]
    fn test_config_dir_relative_env_ignored() {
        temp_env::with_var(CONFIG_DIR_ENV, Some("relative/path"), || {
            if let Some(path) = Config::config_dir() {
                assert!(path.ends_with(".dex-cli"));
            }
        });
    }
}
