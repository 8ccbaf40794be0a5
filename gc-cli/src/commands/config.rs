//! Configuration file commands.

use std::path::Path;

use clap::Subcommand;
use console::style;
use dialoguer::Confirm;

use gc_core::config::AppConfig;
use gc_core::error::{GcError, GcResult};

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (file plus environment overrides).
    Show,
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing file without asking.
        #[arg(long)]
        force: bool,
    },
    /// Show the configuration file path.
    Path,
}

pub fn run(config: &AppConfig, path: &Path, action: ConfigAction, format: OutputFormat) -> GcResult<()> {
    match action {
        ConfigAction::Show => match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(config)?;
                println!("{json}");
            }
            OutputFormat::Text => {
                let text = toml::to_string_pretty(config)
                    .map_err(|e| GcError::Config(format!("failed to serialize config: {e}")))?;
                println!("{}", style(format!("# {}", path.display())).dim());
                print!("{text}");
            }
        },
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                let overwrite = Confirm::new()
                    .with_prompt(format!("  {} exists. Overwrite?", path.display()))
                    .default(false)
                    .interact()
                    .unwrap_or(false);
                if !overwrite {
                    println!("  Kept existing configuration.");
                    return Ok(());
                }
            }
            AppConfig::default().save_to_file(path)?;
            println!("  {} Wrote {}", style("OK").green().bold(), path.display());
        }
        ConfigAction::Path => match format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "path": path.display().to_string() }));
            }
            OutputFormat::Text => println!("{}", path.display()),
        },
    }
    Ok(())
}
