use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use circulars_cli::commands::{self, ThemeAction};
use circulars_cli::{tui, Config};

#[derive(Parser)]
#[command(name = "circulars")]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), env!("CIRCULARS_VERSION_SUFFIX")),
    about = "Browse, preview and share DTE circulars from the terminal",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Circulars endpoint (overrides config and CIRCULARS_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal UI (default)
    Tui,
    /// Fetch and print the circulars
    List {
        /// Print card descriptors as JSON
        #[arg(long)]
        json: bool,
    },
    /// Share a circular by serial number
    Share {
        /// Serial number of the circular
        serial: u32,
    },
    /// Show or toggle the dark mode preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommand>,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum ThemeCommand {
    /// Print the stored mode
    Show,
    /// Flip between dark and light
    Toggle,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let data_dir = Config::data_dir()?;
    init_logging(cli.verbose, matches!(command, Commands::Tui), &data_dir)?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env();
    if let Some(endpoint) = cli.endpoint {
        config.http.endpoint = endpoint;
    }
    config.validate()?;
    tracing::debug!(endpoint = %config.http.endpoint, "Configuration loaded");

    match command {
        Commands::Tui => {
            tracing::info!("Starting TUI");
            tui::run(&config, &data_dir).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::List { json } => commands::list(&config, json).await,
        Commands::Share { serial } => commands::share(&config, serial).await,
        Commands::Theme { action } => {
            let action = match action.unwrap_or(ThemeCommand::Show) {
                ThemeCommand::Show => ThemeAction::Show,
                ThemeCommand::Toggle => ThemeAction::Toggle,
            };
            commands::theme(&data_dir, action)
        }
    }
}

/// stderr for one-shot commands; a log file for the TUI so output never
/// lands on the alternate screen
fn init_logging(verbose: bool, tui: bool, data_dir: &std::path::Path) -> Result<()> {
    let filter = if verbose {
        "circulars_cli=debug"
    } else {
        "circulars_cli=info"
    };
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    if tui {
        let path = data_dir.join("circulars.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}
