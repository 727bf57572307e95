//! Generic OAuth2 authorization-code client.
//!
//! This crate holds the provider-agnostic half of an OAuth2 login: building the
//! authorization URL, exchanging the authorization code for an access token and
//! fetching the user's profile. Everything that differs between identity providers
//! (endpoint URLs, default scopes, the scope delimiter, extra token-grant parameters)
//! is supplied by an implementation of the [`Provider`] trait.

mod client;
mod config;
mod error;
mod http;
mod provider;
mod request;
mod types;

#[cfg(test)]
mod tests;

pub use client::OAuth2Client;
pub use config::ProviderConfig;
pub use error::{OAuth2Error, OAuth2Result};
pub use http::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use provider::{Provider, parse_json_response};
pub use request::CurrentRequest;
pub use types::{AccessToken, JsonMap, Parameters, UserData};

/// Grant type used when exchanging an authorization code.
pub const AUTHORIZATION_CODE_GRANT: &str = "authorization_code";
