//! Configuration loading logic

use std::path::{Path, PathBuf};

use super::schema::Config;
use crate::error::{DexError, Result};

/// Environment variable overriding the config directory (absolute paths only)
pub const CONFIG_DIR_ENV: &str = "DEX_CONFIG_DIR";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DexError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| {
            DexError::Config(format!("failed to parse config file {}: {e}", path.display()))
        })
    }

    /// Write the full configuration as YAML
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| DexError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, content).map_err(|e| {
            DexError::Config(format!("failed to write config file {}: {e}", path.display()))
        })
    }

    /// Get the config directory
    /// Respects `DEX_CONFIG_DIR` when it is absolute.
    /// Fallback: `$HOME/.dex-cli`
    pub fn config_dir() -> Option<PathBuf> {
        std::env::var_os(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(|| dirs::home_dir().map(|home| home.join(".dex-cli")))
    }
}

/// Config file store rooted at a directory
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store at the directory resolved from the environment
    pub fn from_env() -> Result<Self> {
        Config::config_dir()
            .map(Self::new)
            .ok_or_else(|| DexError::Config("failed to determine home directory".to_string()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    /// Load the config, creating the directory and a default file when missing
    pub fn load(&self) -> Result<Config> {
        self.ensure_dir()?;
        let path = self.path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "writing default config");
            let config = Config::default();
            config.to_file(&path)?;
            return Ok(config);
        }
        Config::from_file(&path)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        self.ensure_dir()?;
        config.to_file(&self.path())
    }

    fn ensure_dir(&self) -> Result<()> {
        if self.dir.is_dir() {
            return Ok(());
        }

        let mut builder = std::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(&self.dir).map_err(|e| {
            DexError::Config(format!(
                "failed to create config directory {}: {e}",
                self.dir.display()
            ))
        })
    }
}
