// Team Shuffler - Web Server
// Serves the browser UI and the JSON API over one in-memory session

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use team_shuffler::api::{router, AppState};
use team_shuffler::{load_csv, Config, Session};
use tracing::info;

#[derive(Parser)]
#[command(name = "team-shuffler-server")]
#[command(about = "Team Shuffler web UI")]
#[command(version)]
struct Args {
    /// Path to the config file (defaults to ./team-shuffler.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides `[server] addr`
    #[arg(long)]
    addr: Option<String>,

    /// Pre-populate the rosters from a `team,name` CSV file
    #[arg(long)]
    load: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    let mut session = Session::from_config(&config);
    if let Some(path) = &args.load {
        load_csv(path, session.store_mut())
            .with_context(|| format!("Failed to import members from {}", path.display()))?;
    }

    let app = router(AppState::new(session, config.teams.clone()));

    let addr = args.addr.unwrap_or(config.server.addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
