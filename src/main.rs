use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod seed;

/// The main entry point for the Symposia conference management API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file when present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = configuration::load_settings()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => web_server::run_server(settings).await?,
        Commands::Seed => seed::run(&settings).await?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// CRUD API for scientific conferences, scientists, and participations.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve,
    /// Populate a running API instance with demo data over HTTP.
    Seed,
}
