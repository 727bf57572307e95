//! OAuth2 provider configuration.

use crate::error::{OAuth2Error, OAuth2Result};
use serde::{Deserialize, Serialize};

const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Credentials and options for one registered OAuth2 application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Redirect URI sent with the authorization request
    pub redirect_uri: String,
    /// Requested scopes; the provider's defaults are used when unset
    #[serde(default)]
    pub scopes: Option<Vec<String>>,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl ProviderConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scopes: None,
            http_timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
        }
    }

    /// Read the configuration from `{PREFIX}_*` environment variables.
    ///
    /// `{PREFIX}_CLIENT_ID`, `{PREFIX}_CLIENT_SECRET` and `{PREFIX}_REDIRECT_URI`
    /// are required. `{PREFIX}_SCOPES` is a whitespace separated list and
    /// `{PREFIX}_HTTP_TIMEOUT_SECONDS` defaults to 30.
    pub fn from_env(prefix: &str) -> OAuth2Result<Self> {
        Self::from_lookup(prefix, |key| std::env::var(key).ok())
    }

    fn from_lookup(prefix: &str, lookup: impl Fn(&str) -> Option<String>) -> OAuth2Result<Self> {
        let required = |name: &str| {
            let key = format!("{prefix}_{name}");
            lookup(&key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| OAuth2Error::ConfigError(format!("{key} is required")))
        };

        let mut config = Self::new(
            required("CLIENT_ID")?,
            required("CLIENT_SECRET")?,
            required("REDIRECT_URI")?,
        );

        if let Some(scopes) = lookup(&format!("{prefix}_SCOPES")) {
            let scopes: Vec<String> = scopes.split_whitespace().map(str::to_string).collect();
            if !scopes.is_empty() {
                config = config.with_scopes(scopes);
            }
        }

        let timeout_key = format!("{prefix}_HTTP_TIMEOUT_SECONDS");
        if let Some(timeout) = lookup(&timeout_key) {
            let seconds = timeout.parse().map_err(|_| {
                OAuth2Error::ConfigError(format!("{timeout_key} must be a number of seconds"))
            })?;
            config = config.with_http_timeout(seconds);
        }

        Ok(config)
    }

    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = Some(scopes);
        self
    }

    pub fn with_http_timeout(mut self, seconds: u64) -> Self {
        self.http_timeout_seconds = seconds;
        self
    }
}
