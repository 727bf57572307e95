//! Google identity provider.
//!
//! Plugs Google's OAuth2 endpoints into [`ras_identity_oauth2::OAuth2Client`]:
//!
//! ```no_run
//! use ras_identity_google::GoogleProvider;
//! use ras_identity_oauth2::{OAuth2Client, ProviderConfig};
//!
//! # fn main() -> Result<(), ras_identity_oauth2::OAuth2Error> {
//! let config = ProviderConfig::from_env("GOOGLE")?;
//! let client = OAuth2Client::new(GoogleProvider, config)?;
//! println!("{}", client.authorization_url(None)?);
//! # Ok(())
//! # }
//! ```

mod provider;


pub use provider::{
    AUTHORIZATION_ENDPOINT, EMAIL_SCOPE, GoogleProvider, PROFILE_SCOPE, TOKEN_ENDPOINT,
    USER_INFO_ENDPOINT,
};

use ras_identity_oauth2::{OAuth2Client, OAuth2Result, ProviderConfig};

/// Client for Google using the default `reqwest` transport
pub fn google_client(config: ProviderConfig) -> OAuth2Result<OAuth2Client<GoogleProvider>> {
    OAuth2Client::new(GoogleProvider, config)
}
