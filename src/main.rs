// ABOUTME: Entry point for the stelno CLI application.
// ABOUTME: Resolves credentials, builds the client, and runs the deployment.

mod cli;

use clap::Parser;
use cli::Cli;
use stelno::control::HttpControlPlane;
use stelno::credentials;
use stelno::deploy;
use stelno::error::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let request = cli.into_request()?;

    let environments = request
        .environments
        .iter()
        .map(|e| e.as_str())
        .collect::<Vec<_>>()
        .join(",");

    tracing::info!(
        region = %request.region,
        application = %request.application,
        environments = %environments,
        bucket = request.source_bundle.as_ref().map(|b| b.bucket.as_str()).unwrap_or(""),
        bucket_key = request.source_bundle.as_ref().map(|b| b.key.as_str()).unwrap_or(""),
        version = %request.version_label,
        env_update = request.environment_update,
        auto_create = request.auto_create,
        timeout_secs = request.timeout.as_secs(),
        "authenticating"
    );

    let provider = credentials::provider_for(
        request.access_key.clone(),
        request.secret_key.clone(),
    );
    let creds = provider.resolve().await?;

    let client = HttpControlPlane::new(&request.endpoint(), creds)?;

    deploy::run(&request, &client).await?;

    Ok(())
}
