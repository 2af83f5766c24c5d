#![allow(clippy::missing_errors_doc)]
//! Personal Access Token storage in the OS keychain

use crate::error::{DexError, Result};

/// Keychain service name under which tokens are stored
pub const SERVICE_NAME: &str = "dex-cli";

/// Tokens shorter than this are rejected before touching the keychain
pub const MIN_TOKEN_LEN: usize = 20;

const LOGIN_HINT: &str = "Please run 'dex auth login' first";

/// Credential store keyed by organization
pub trait CredentialStore {
    fn get(&self, organization: &str) -> Result<String>;
    fn set(&self, organization: &str, token: &str) -> Result<()>;
    fn delete(&self, organization: &str) -> Result<()>;
}

/// Reduce an organization name or URL to the bare organization name
///
/// `https://dev.azure.com/contoso/` and `contoso` both become `contoso`.
pub fn normalize_organization(organization: &str) -> String {
    let mut org = organization
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');

    if let Some((_, rest)) = org.split_once("dev.azure.com/") {
        org = rest.trim_end_matches('/');
        if let Some((name, _)) = org.split_once('/') {
            org = name;
        }
    }

    org.to_string()
}

fn require_organization(organization: &str) -> Result<()> {
    if organization.trim().is_empty() {
        return Err(DexError::validation("organization cannot be empty"));
    }
    Ok(())
}

/// Basic token sanity check performed before storing
pub fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(DexError::validation("token cannot be empty"));
    }
    if token.len() < MIN_TOKEN_LEN {
        return Err(DexError::validation("invalid token format"));
    }
    Ok(())
}

/// Credential store backed by the platform keychain
#[derive(Debug, Default)]
pub struct KeyringStore;

impl KeyringStore {
    fn entry(organization: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(SERVICE_NAME, &normalize_organization(organization))
            .map_err(|e| DexError::Credential(format!("failed to open keychain entry: {e}")))
    }
}

impl CredentialStore for KeyringStore {
    fn get(&self, organization: &str) -> Result<String> {
        require_organization(organization)?;
        match Self::entry(organization)?.get_password() {
            Ok(token) => Ok(token),
            Err(keyring::Error::NoEntry) => Err(DexError::not_found_with_hint(
                format!("no credentials found for organization {organization}"),
                LOGIN_HINT,
            )),
            Err(e) => Err(DexError::Credential(format!(
                "failed to retrieve token from keychain: {e}"
            ))),
        }
    }

    fn set(&self, organization: &str, token: &str) -> Result<()> {
        require_organization(organization)?;
        validate_token(token)?;
        Self::entry(organization)?
            .set_password(token)
            .map_err(|e| DexError::Credential(format!("failed to store token in keychain: {e}")))
    }

    fn delete(&self, organization: &str) -> Result<()> {
        require_organization(organization)?;
        match Self::entry(organization)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Err(DexError::not_found(format!(
                "no credentials found for organization {organization}"
            ))),
            Err(e) => Err(DexError::Credential(format!(
                "failed to delete token from keychain: {e}"
            ))),
        }
    }
}
