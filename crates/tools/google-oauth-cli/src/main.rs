use anyhow::{Context, Result};
use clap::Parser;
use google_oauth_cli::cli::Args;
use ras_identity_google::google_client;
use ras_identity_oauth2::ProviderConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ProviderConfig::from_env(&args.env_prefix).with_context(|| {
        format!(
            "{}_CLIENT_ID, {}_CLIENT_SECRET and {}_REDIRECT_URI must be set",
            args.env_prefix, args.env_prefix, args.env_prefix
        )
    })?;
    let client = google_client(config).context("Failed to create HTTP client")?;

    info!("Running {}", args.command.name());
    let output = args.run(&client).await?;
    println!("{}", output);

    Ok(())
}
