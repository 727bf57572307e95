//! OAuth2 error types.

use thiserror::Error;

pub type OAuth2Result<T> = Result<T, OAuth2Error>;

#[derive(Debug, Error)]
pub enum OAuth2Error {
    #[error("HTTP request failed: {0}")]
    TransportError(#[source] reqwest::Error),

    #[error("HTTP request to {url} returned status {status}: {body}")]
    HttpStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Failed to decode response body: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Missing authorization code")]
    MissingAuthorizationCode,

    #[error("Callback error: {0}")]
    CallbackError(String),
}

impl OAuth2Error {
    /// Connection failures and non-success statuses reported by the HTTP client.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportError(_) | Self::HttpStatus { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::DecodeError(_))
    }
}
