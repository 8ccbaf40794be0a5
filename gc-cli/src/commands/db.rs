//! Database management commands.

use clap::Subcommand;
use console::style;
use dialoguer::Confirm;

use gc_core::config::AppConfig;
use gc_core::error::GcResult;
use gc_core::logging;

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum DbAction {
    /// Show row counts and storage usage.
    Stats,
    /// Run integrity and foreign key checks.
    Check,
    /// Reset the database (WARNING: destroys all data).
    Reset {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the database file path.
    Path,
}

pub fn run(config: &AppConfig, action: DbAction, format: OutputFormat) -> GcResult<()> {
    logging::init_console_logging(&config.logging.level);
    let db_path = config.effective_db_path()?;

    match action {
        DbAction::Stats => {
            let db = super::open_database(config)?;
            let stats = db.stats()?;

            let file_size = std::fs::metadata(&db_path).ok().map(|m| m.len());
            let wal_size = std::fs::metadata(db_path.with_extension("db-wal")).ok().map(|m| m.len());

            let conn = db.conn()?;
            let journal_mode: String = conn
                .query_row("PRAGMA journal_mode", [], |row| row.get(0))
                .unwrap_or_else(|_| "unknown".to_string());

            match format {
                OutputFormat::Json => {
                    let tables: serde_json::Map<String, serde_json::Value> = stats
                        .tables
                        .iter()
                        .map(|(name, count)| (name.clone(), (*count).into()))
                        .collect();
                    println!(
                        "{}",
                        serde_json::json!({
                            "path": db_path.display().to_string(),
                            "tables": tables,
                            "file_size_bytes": file_size,
                            "wal_size_bytes": wal_size,
                            "journal_mode": journal_mode,
                        })
                    );
                }
                OutputFormat::Text => {
                    println!("{}", style("Database Statistics").bold().underlined());
                    println!("  Path:          {}", db_path.display());
                    println!("  Journal mode:  {}", journal_mode);
                    println!();

                    let mut table = super::styled_table();
                    table.set_header(vec!["Table", "Row Count"]);
                    for (name, count) in &stats.tables {
                        table.add_row(vec![name.clone(), count.to_string()]);
                    }
                    println!("{table}");

                    println!();
                    println!("{}", style("Storage").bold().underlined());
                    if let Some(size) = file_size {
                        println!("  Database:      {}", super::format_bytes(size));
                    }
                    if let Some(size) = wal_size {
                        println!("  WAL file:      {}", super::format_bytes(size));
                    }
                }
            }
        }
        DbAction::Check => {
            println!("  {} Running integrity check...", style("...").dim());
            let db = super::open_database(config)?;

            match db.run_integrity_check() {
                Ok(()) => println!("  {} Integrity check passed.", style("OK").green().bold()),
                Err(e) => println!("  {} Integrity check failed: {}", style("FAIL").red().bold(), e),
            }

            let violations = db.foreign_key_violations()?;
            if violations.is_empty() {
                println!("  {} Foreign key constraints OK.", style("OK").green().bold());
            } else {
                println!(
                    "  {} {} foreign key violation(s):",
                    style("WARN").yellow().bold(),
                    violations.len()
                );
                for v in violations.iter().take(10) {
                    println!("    - {v}");
                }
                if violations.len() > 10 {
                    println!("    ... and {} more", violations.len() - 10);
                }
            }
        }
        DbAction::Reset { yes } => {
            println!("  {} This will delete ALL local data.", style("WARNING").red().bold());
            println!("  Database: {}", db_path.display());

            let confirmed = yes
                || Confirm::new()
                    .with_prompt("  Are you sure you want to reset the database?")
                    .default(false)
                    .interact()
                    .unwrap_or(false);

            if !confirmed {
                println!("  Reset cancelled.");
                return Ok(());
            }

            let db = super::open_database(config)?;
            db.reset()?;
            println!("  {} Database reset complete.", style("OK").green().bold());
        }
        DbAction::Path => match format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "path": db_path.display().to_string() }));
            }
            OutputFormat::Text => println!("{}", db_path.display()),
        },
    }

    Ok(())
}
