use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use team_shuffler::{format_groups, load_csv, Config, RosterId, Session, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "team-shuffler")]
#[command(about = "Build two rosters and shuffle them into groups of 2-3")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ./team-shuffler.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive terminal UI (default)
    Tui {
        /// Pre-populate the rosters from a `team,name` CSV file
        #[arg(long)]
        load: Option<PathBuf>,
    },

    /// Shuffle the rosters in a `team,name` CSV file once and print the groups
    Group {
        /// CSV file with a `team,name` header
        csv: PathBuf,
    },

    /// Write a default team-shuffler.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, None | Some(Commands::Tui { .. }));
    init_logging(cli.verbose, interactive);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        None => run_ui_mode(&config, None)?,
        Some(Commands::Tui { load }) => run_ui_mode(&config, load.as_deref())?,
        Some(Commands::Group { csv }) => run_group(&config, &csv)?,
        Some(Commands::Init { force }) => {
            let path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            Config::write_default(&path, force)?;
            println!("✓ Wrote {}", path.display());
        }
    }

    Ok(())
}

/// The TUI owns the terminal, so only warnings reach stderr there
fn init_logging(verbose: bool, interactive: bool) {
    let log_level = match (verbose, interactive) {
        (true, _) => "debug",
        (false, true) => "warn",
        (false, false) => "info",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();
}

fn load_session(config: &Config, csv: Option<&Path>) -> Result<Session> {
    let mut session = Session::from_config(config);
    if let Some(path) = csv {
        load_csv(path, session.store_mut())
            .with_context(|| format!("Failed to import members from {}", path.display()))?;
    }
    Ok(session)
}

fn run_group(config: &Config, csv: &Path) -> Result<()> {
    let mut session = load_session(config, Some(csv))?;
    let result = session.generate();

    for roster in RosterId::ALL {
        println!("{}", format_groups(config.teams.title(roster), result.groups(roster)));
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &Config, csv: Option<&Path>) -> Result<()> {
    let session = load_session(config, csv)?;
    let mut app = team_shuffler::ui::App::new(session, config.teams.clone());
    team_shuffler::ui::run_ui(&mut app)?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &Config, _csv: Option<&Path>) -> Result<()> {
    anyhow::bail!(
        "TUI mode not available; rebuild with `--features tui` \
         or run the web UI with `cargo run --bin team-shuffler-server --features server`"
    )
}
