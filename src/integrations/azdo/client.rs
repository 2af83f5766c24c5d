use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::{Client, ClientBuilder, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DexError, Result};
use crate::integrations::credentials::normalize_organization;

pub const DEFAULT_BASE_URL: &str = "https://dev.azure.com";
pub const API_VERSION: &str = "7.0";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_LOGGED_BODY: usize = 500;

/// Blocking Azure DevOps REST client authenticated with a Personal Access Token
pub struct AzureDevOpsClient {
    http: Client,
    base_url: String,
    organization: String,
    auth_header: String,
}

impl std::fmt::Debug for AzureDevOpsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureDevOpsClient")
            .field("base_url", &self.base_url)
            .field("organization", &self.organization)
            .finish_non_exhaustive()
    }
}

impl AzureDevOpsClient {
    pub fn new(organization: &str, token: &str) -> Result<Self> {
        Self::from_builder(Client::builder(), DEFAULT_BASE_URL, organization, token)
    }

    fn from_builder(
        builder: ClientBuilder,
        base_url: &str,
        organization: &str,
        token: &str,
    ) -> Result<Self> {
        let http = builder
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DexError::Transport {
                status: None,
                body: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            organization: normalize_organization(organization),
            auth_header: format!("Basic {}", STANDARD.encode(format!(":{token}"))),
        })
    }

    /// Client pointed at a local test server, bypassing any configured proxy
    #[cfg(test)]
    pub(crate) fn for_local_server(base_url: &str, organization: &str, token: &str) -> Self {
        Self::from_builder(Client::builder().no_proxy(), base_url, organization, token).unwrap()
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Build `{base}/{org}/{segments...}?api-version=7.0` with every segment
    /// percent-encoded
    pub(crate) fn url(&self, segments: &[&str]) -> String {
        let mut url = format!(
            "{}/{}",
            self.base_url,
            urlencoding::encode(&self.organization)
        );
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url.push_str("?api-version=");
        url.push_str(API_VERSION);
        url
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.send(self.http.get(url), "GET", url)
    }

    pub(crate) fn post<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        self.send(self.http.post(url).json(body), "POST", url)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder, method: &str, url: &str) -> Result<T> {
        tracing::debug!(method, url, "sending request");

        let response = request
            .header(AUTHORIZATION, &self.auth_header)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| DexError::Transport {
                status: None,
                body: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| DexError::Transport {
            status: Some(status.as_u16()),
            body: format!("failed to read response body: {e}"),
        })?;

        tracing::debug!(
            status = status.as_u16(),
            body = %truncate_body(&body),
            "received response"
        );

        if !status.is_success() {
            return Err(DexError::Transport {
                status: Some(status.as_u16()),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| DexError::Transport {
            status: Some(status.as_u16()),
            body: format!("failed to decode response: {e}"),
        })
    }
}

/// First 500 characters of a response body, with `...` when cut
fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_LOGGED_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
