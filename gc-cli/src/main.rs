//! GosuCatcher CLI - runs the API server and manages local data.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use gc_core::config::AppConfig;
use gc_core::error::GcResult;

/// GosuCatcher - marketplace backend for members and experts.
#[derive(Parser)]
#[command(
    name = "gosucatcher",
    version,
    about = "GosuCatcher marketplace server",
    long_about = "Runs the GosuCatcher REST API and offers maintenance commands\n\
                  for the local database, configuration and service catalogue."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Listen address (overrides config and environment).
        #[arg(long)]
        host: Option<String>,
        /// Listen port (overrides config and environment).
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Database management commands.
    Db {
        #[command(subcommand)]
        action: commands::db::DbAction,
    },
    /// Show or create the configuration file.
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Browse and extend the service catalogue.
    Items {
        #[command(subcommand)]
        action: commands::items::ItemsAction,
    },
}

/// Explicit `--config` path, or the platform default.
pub fn config_path(explicit: Option<&PathBuf>) -> GcResult<PathBuf> {
    match explicit {
        Some(path) => Ok(path.clone()),
        None => AppConfig::default_config_path(),
    }
}

fn load_config(explicit: Option<&PathBuf>) -> GcResult<AppConfig> {
    // A missing explicit file is fine here; `config init` creates it.
    let mut config = match explicit {
        Some(path) if path.exists() => AppConfig::load_from_file(path)?,
        Some(_) => AppConfig::default(),
        None => AppConfig::load_default()?,
    };
    config.apply_env_overrides()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> GcResult<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    match cli.command {
        Commands::Serve { host, port } => commands::serve::run(config, host, port).await,
        Commands::Db { action } => commands::db::run(&config, action, cli.format),
        Commands::Config { action } => {
            let path = config_path(cli.config.as_ref())?;
            commands::config::run(&config, &path, action, cli.format)
        }
        Commands::Items { action } => commands::items::run(config, action, cli.format).await,
    }
}
