use ras_identity_oauth2::OAuth2Error;
use thiserror::Error;

/// Errors that can occur while running a command
#[derive(Error, Debug)]
pub enum CliError {
    #[error("OAuth2 flow failed: {0}")]
    OAuth2(#[from] OAuth2Error),

    #[error("Failed to render user data: {0}")]
    Render(#[from] serde_json::Error),
}
