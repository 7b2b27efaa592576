//! Storefront configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use techhub_http::{ApiClientBuilder, ClientError, PublicClient};

/// API origin used when nothing else is configured
pub const FALLBACK_API_URL: &str = "http://localhost:8002";

/// Base URL baked in at build time through `TECHHUB_API_URL`, if set
pub fn build_time_api_url() -> &'static str {
    option_env!("TECHHUB_API_URL").unwrap_or(FALLBACK_API_URL)
}

/// What the auth context does when the startup profile fetch fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionFailurePolicy {
    /// Any failure purges the stored token
    #[default]
    LogoutOnAnyFailure,
    /// Only an explicit 401/403 purges the token; network and decoding
    /// failures keep the session with no profile loaded
    LogoutOnRejection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Origin of the remote API, without the `/api/v1` prefix
    pub api_base_url: String,
    /// Per-request timeout. Unset means requests may hang indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub session_failure_policy: SessionFailurePolicy,
    /// Number of top-rated products shown on the home view
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,
}

fn default_featured_count() -> usize {
    3
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: build_time_api_url().to_string(),
            request_timeout_secs: None,
            session_failure_policy: SessionFailurePolicy::default(),
            featured_count: default_featured_count(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from defaults, an optional file and `TECHHUB_*`
    /// environment variables, in increasing precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value has the wrong type
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("featured_count", defaults.featured_count as u64)?
            .set_default("session_failure_policy", "logout_on_any_failure")?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("TECHHUB").try_parsing(true))
            .build()?;

        settings.try_deserialize()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Build the public API client described by this configuration
    pub fn public_client(&self) -> Result<PublicClient, ClientError> {
        let mut builder = ApiClientBuilder::new().base_url(&self.api_base_url);
        if let Some(timeout) = self.request_timeout() {
            builder = builder.timeout(timeout);
        }
        builder.build_public()
    }
}
