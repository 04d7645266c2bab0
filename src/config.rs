//! Client configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then environment variables. The CLI applies its own flags on top.
//!
//! ```toml
//! base_url = "http://192.168.1.10:5000"
//! timeout_secs = 15
//! merge_policy = "best-effort"
//!
//! [credentials]
//! token = "..."
//! ```

use crate::api::{AdminHeaders, BearerToken, RequestSigner};
use crate::core::MergePolicy;
use crate::types::ClientError;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub const ENV_API_URL: &str = "ATTENDANCE_API_URL";
pub const ENV_ADMIN_ID: &str = "ATTENDANCE_ADMIN_ID";
pub const ENV_ADMIN_PASSWORD: &str = "ATTENDANCE_ADMIN_PASSWORD";
pub const ENV_API_TOKEN: &str = "ATTENDANCE_API_TOKEN";

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for talking to the attendance API
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the API server, without the `/api` suffix
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// What to do when only one of the two account collections loads
    pub merge_policy: MergePolicy,

    pub credentials: CredentialsConfig,
}

/// Credentials used to sign requests
///
/// A token takes precedence over the admin header pair when both are set.
#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub admin_id: Option<String>,
    pub admin_password: Option<String>,
    pub token: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("admin_id", &self.admin_id)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            merge_policy: MergePolicy::default(),
            credentials: CredentialsConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from an optional TOML file plus the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ClientError> {
        let config = match path {
            Some(path) => Self::from_toml(&std::fs::read_to_string(path)?)?,
            None => Self::default(),
        };

        Ok(config
            .with_env(|key| std::env::var(key).ok())
            .validated())
    }

    /// Parse configuration from TOML text; missing keys take their defaults
    pub fn from_toml(text: &str) -> Result<Self, ClientError> {
        Ok(toml::from_str(text)?)
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.base_url = url;
        }
        if let Some(id) = lookup(ENV_ADMIN_ID) {
            self.credentials.admin_id = Some(id);
        }
        if let Some(password) = lookup(ENV_ADMIN_PASSWORD) {
            self.credentials.admin_password = Some(password);
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.credentials.token = Some(token);
        }
        self
    }

    /// Replace unusable values with defaults, logging a warning for each
    pub fn validated(mut self) -> Self {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            warn!(
                "Invalid base_url ({:?}), using default ({})",
                self.base_url, DEFAULT_BASE_URL
            );
            self.base_url = DEFAULT_BASE_URL.to_string();
        } else {
            self.base_url = trimmed.to_string();
        }

        if self.timeout_secs == 0 {
            warn!(
                "Invalid timeout_secs ({}), using default ({})",
                self.timeout_secs, DEFAULT_TIMEOUT_SECS
            );
            self.timeout_secs = DEFAULT_TIMEOUT_SECS;
        }

        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the request signer for the configured credentials
    ///
    /// # Errors
    ///
    /// Returns a Config error when neither a token nor a complete admin
    /// id/password pair is configured.
    pub fn signer(&self) -> Result<Arc<dyn RequestSigner>, ClientError> {
        let credentials = &self.credentials;

        if let Some(token) = credentials.token.as_deref().filter(|t| !t.is_empty()) {
            return Ok(Arc::new(BearerToken::new(token)));
        }

        match (&credentials.admin_id, &credentials.admin_password) {
            (Some(id), Some(password)) if !id.is_empty() => {
                warn!("Using static admin headers; configure a token instead");
                Ok(Arc::new(AdminHeaders::new(id, password)))
            }
            _ => Err(ClientError::config(format!(
                "no credentials configured (set {} or {}/{})",
                ENV_API_TOKEN, ENV_ADMIN_ID, ENV_ADMIN_PASSWORD
            ))),
        }
    }
}
