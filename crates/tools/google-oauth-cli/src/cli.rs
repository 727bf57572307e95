use crate::error::CliError;
use clap::{Parser, Subcommand};
use ras_identity_google::GoogleProvider;
use ras_identity_oauth2::{OAuth2Client, Provider};
use url::Url;

/// Run the Google OAuth2 authorization-code flow from the command line
#[derive(Parser, Debug)]
#[command(name = "google-oauth")]
#[command(about = "Run the Google OAuth2 authorization-code flow")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Prefix of the environment variables holding the client configuration
    #[arg(long, value_name = "PREFIX", default_value = "GOOGLE", global = true)]
    pub env_prefix: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the URL to send the user to for consent
    AuthorizeUrl {
        /// Opaque state value echoed back on the callback
        #[arg(short, long)]
        state: Option<String>,
    },

    /// Exchange the code of a callback URL and print the user's profile
    Callback {
        /// Full URL Google redirected the browser to
        #[arg(short, long, value_name = "URL")]
        url: Url,

        /// Also print the token response
        #[arg(long)]
        show_token: bool,
    },

    /// Print the scopes that will be requested
    Scopes,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AuthorizeUrl { .. } => "authorize-url",
            Command::Callback { .. } => "callback",
            Command::Scopes => "scopes",
        }
    }
}

impl Args {
    /// Run the command and return what should be printed
    pub async fn run(&self, client: &OAuth2Client<GoogleProvider>) -> Result<String, CliError> {
        match &self.command {
            Command::AuthorizeUrl { state } => {
                let url = client.authorization_url(state.as_deref())?;
                Ok(url.to_string())
            }
            Command::Callback { url, show_token } => {
                let (token, user) = client.complete_callback(url).await?;
                let user = serde_json::Value::Object(user.into_attributes());
                let output = if *show_token {
                    serde_json::json!({ "token": serde_json::to_value(&token)?, "user": user })
                } else {
                    user
                };
                Ok(serde_json::to_string_pretty(&output)?)
            }
            Command::Scopes => Ok(client
                .scopes()
                .join(client.provider().scope_delimiter())),
        }
    }
}
