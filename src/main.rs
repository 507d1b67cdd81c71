use anyhow::Context;
use clap::Parser;
use colored::*;
use repolist_server::cli::Cli;
use repolist_server::github::GitHubClient;
use repolist_server::server::{start_server, AppState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    println!("{}", "Repolist Server".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    let config = cli.github_config().context("Invalid GitHub configuration")?;
    if config.token.is_none() {
        println!("{}", "No GITHUB_TOKEN set, using unauthenticated rate limits".yellow());
    }

    let client = GitHubClient::new(config).context("Failed to create GitHub client")?;
    info!(api_url = %client.api_url(), "GitHub client configured");

    let addr = cli.bind_addr();
    println!("📡 Serving on http://{}", addr);
    println!("\nPress Ctrl+C to stop the server\n");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
        }
        println!("\n🛑 Shutting down server...");
    };

    start_server(AppState::new(client), addr, shutdown)
        .await
        .with_context(|| format!("Server on {} failed", addr))?;

    println!("✅ Server stopped");
    Ok(())
}
