//! Command line front end for the Google OAuth2 provider.

pub mod cli;
pub mod error;
