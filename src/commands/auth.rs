//! Auth commands - store, remove and inspect the Personal Access Token

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::color::{self, ColorMode};
use crate::commands::common::{load_settings, GlobalOptions};
use crate::config::{ConfigKey, ConfigStore, Settings};
use crate::error::DexError;
use crate::integrations::credentials::{CredentialStore, KeyringStore};

/// Whether a token is available for the resolved organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    NoOrganization,
    NotAuthenticated { organization: String },
    Authenticated { organization: String },
}

/// Store the token and remember the organization in the config file
pub fn login_with<S: CredentialStore>(
    credentials: &S,
    config_store: &ConfigStore,
    organization: &str,
    token: &str,
) -> Result<()> {
    let organization = organization.trim();
    if organization.is_empty() {
        return Err(DexError::validation("organization is required").into());
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(DexError::validation("token is required").into());
    }

    credentials
        .set(organization, token)
        .context("failed to store credentials")?;

    let mut config = config_store.load().context("failed to load config")?;
    config.set(ConfigKey::Organization, organization);
    config_store.save(&config).context("failed to save config")?;
    Ok(())
}

pub fn logout_with<S: CredentialStore>(credentials: &S, settings: &Settings) -> Result<String> {
    if settings.organization.is_empty() {
        return Err(DexError::validation(
            "no organization configured. Use --org flag or login first",
        )
        .into());
    }
    credentials
        .delete(&settings.organization)
        .context("failed to logout")?;
    Ok(settings.organization.clone())
}

pub fn status_with<S: CredentialStore>(credentials: &S, settings: &Settings) -> AuthStatus {
    if settings.organization.is_empty() {
        return AuthStatus::NoOrganization;
    }
    let organization = settings.organization.clone();
    match credentials.get(&organization) {
        Ok(_) => AuthStatus::Authenticated { organization },
        Err(e) => {
            tracing::debug!(error = %e, "token lookup failed");
            AuthStatus::NotAuthenticated { organization }
        }
    }
}

fn prompt_organization() -> Result<String> {
    eprint!("Azure DevOps Organization: ");
    std::io::stderr().flush().ok();
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("failed to read organization")?;
    Ok(input.trim().to_string())
}

/// Prompt for organization and token, then store them
pub fn cmd_login(options: &GlobalOptions) -> Result<()> {
    let color_mode = options.color_mode;
    let organization = match options.organization.as_deref().filter(|o| !o.is_empty()) {
        Some(org) => org.to_string(),
        None => prompt_organization()?,
    };
    if organization.is_empty() {
        return Err(DexError::validation("organization is required").into());
    }

    let token = rpassword::prompt_password("Personal Access Token (PAT): ")
        .context("failed to read token")?;

    let config_store = ConfigStore::from_env()?;
    login_with(&KeyringStore, &config_store, &organization, &token)?;

    eprintln!(
        "{}",
        color::success(
            color_mode,
            format!("Successfully authenticated with organization: {organization}")
        )
    );
    eprintln!(
        "{}",
        color::dim(
            color_mode,
            "Your credentials are stored securely in the system keychain"
        )
    );
    Ok(())
}

pub fn cmd_logout(options: &GlobalOptions) -> Result<()> {
    let settings = load_settings(options)?;
    let organization = logout_with(&KeyringStore, &settings)?;
    eprintln!(
        "{}",
        color::success(
            options.color_mode,
            format!("Successfully logged out from organization: {organization}")
        )
    );
    Ok(())
}

/// Report authentication state; never fails for a missing token
pub fn cmd_status(options: &GlobalOptions) -> Result<()> {
    let settings = load_settings(options)?;
    let status = status_with(&KeyringStore, &settings);
    eprintln!("{}", format_status(options.color_mode, &status, &settings));
    Ok(())
}

/// Status block printed to stderr by `auth status`
pub fn format_status(color_mode: ColorMode, status: &AuthStatus, settings: &Settings) -> String {
    let login_hint = color::dim(color_mode, "Run 'dex auth login' to authenticate");
    match status {
        AuthStatus::NoOrganization => {
            format!("{}\n{login_hint}", color::warn(color_mode, "Not authenticated"))
        }
        AuthStatus::NotAuthenticated { organization } => format!(
            "{}\n{login_hint}",
            color::warn(
                color_mode,
                format!("Not authenticated with organization: {organization}")
            )
        ),
        AuthStatus::Authenticated { organization } => {
            let details: Vec<String> = [
                ("Default project", &settings.project),
                ("Default repository", &settings.repository),
            ]
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(label, value)| format!("{label}: {value}"))
            .collect();

            let mut lines = vec![color::success(
                color_mode,
                format!("Authenticated with organization: {organization}"),
            )
            .to_string()];
            lines.extend(details.iter().enumerate().map(|(i, detail)| {
                color::tree_item(color_mode, detail, i + 1 == details.len(), 1).to_string()
            }));
            lines.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::integrations::credentials::tests::MemoryStore;
    use tempfile::TempDir;

    const TOKEN: &str = "abcdefghijklmnopqrstuvwxyz012345";

    fn settings(organization: &str) -> Settings {
        Settings::resolve(Config::default(), Some(organization), None)
    }

    #[test]
    fn test_login_stores_token_and_organization() {
        let temp = TempDir::new().unwrap();
        let config_store = ConfigStore::new(temp.path());
        let credentials = MemoryStore::default();

        login_with(&credentials, &config_store, " contoso ", &format!("{TOKEN}\n")).unwrap();

        assert_eq!(credentials.get("contoso").unwrap(), TOKEN);
        assert_eq!(config_store.load().unwrap().organization, "contoso");
    }

    #[test]
    fn test_login_rejects_missing_values() {
        let temp = TempDir::new().unwrap();
        let config_store = ConfigStore::new(temp.path());
        let credentials = MemoryStore::default();

        let err = login_with(&credentials, &config_store, "", TOKEN).unwrap_err();
        assert_eq!(err.to_string(), "organization is required");
        let err = login_with(&credentials, &config_store, "contoso", "  ").unwrap_err();
        assert_eq!(err.to_string(), "token is required");
    }

    #[test]
    fn test_login_rejects_short_token_without_saving() {
        let temp = TempDir::new().unwrap();
        let config_store = ConfigStore::new(temp.path());
        let credentials = MemoryStore::default();

        let err = login_with(&credentials, &config_store, "contoso", "short").unwrap_err();
        assert!(format!("{err:#}").contains("invalid token format"));
        assert!(!config_store.path().exists());
    }

    #[test]
    fn test_logout_requires_organization() {
        let credentials = MemoryStore::with_token("contoso", TOKEN);
        let err = logout_with(&credentials, &Settings::default()).unwrap_err();
        assert!(err.to_string().contains("no organization configured"));
    }

    #[test]
    fn test_logout_deletes_token() {
        let credentials = MemoryStore::with_token("contoso", TOKEN);
        assert_eq!(logout_with(&credentials, &settings("contoso")).unwrap(), "contoso");
        assert!(credentials.get("contoso").is_err());
    }

    #[test]
    fn test_status() {
        let credentials = MemoryStore::with_token("contoso", TOKEN);
        assert_eq!(
            status_with(&credentials, &Settings::default()),
            AuthStatus::NoOrganization
        );
        assert_eq!(
            status_with(&credentials, &settings("contoso")),
            AuthStatus::Authenticated {
                organization: "contoso".to_string()
            }
        );
        assert_eq!(
            status_with(&credentials, &settings("fabrikam")),
            AuthStatus::NotAuthenticated {
                organization: "fabrikam".to_string()
            }
        );
    }

    #[test]
    fn test_format_status_warns_when_not_authenticated() {
        let output = format_status(
            ColorMode::Never,
            &AuthStatus::NotAuthenticated {
                organization: "contoso".to_string(),
            },
            &settings("contoso"),
        );
        assert_eq!(
            output,
            "⚠ Not authenticated with organization: contoso\nRun 'dex auth login' to authenticate"
        );
    }

    #[test]
    fn test_format_status_lists_configured_defaults() {
        let settings = Settings::resolve(
            Config {
                project: "Web".to_string(),
                ..Config::default()
            },
            Some("contoso"),
            None,
        );
        let output = format_status(
            ColorMode::Never,
            &AuthStatus::Authenticated {
                organization: "contoso".to_string(),
            },
            &settings,
        );
        assert_eq!(
            output,
            "✓ Authenticated with organization: contoso\n  └─ Default project: Web"
        );
    }
}
