//! Service catalogue commands.

use clap::Subcommand;
use console::style;

use gc_core::config::AppConfig;
use gc_core::error::{GcError, GcResult};
use gc_core::logging;
use gc_services::dto::{MainItemCreateRequest, SubItemCreateRequest};
use gc_services::ServiceRegistry;

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum ItemsAction {
    /// List main items with their sub items.
    List,
    /// Add a main item.
    AddMain {
        /// Korean name, e.g. 레슨.
        name: String,
        /// Description (at least 6 characters).
        description: String,
    },
    /// Add a sub item under a main item.
    AddSub {
        /// Parent main item id.
        #[arg(long)]
        main_item_id: i64,
        name: String,
        description: String,
    },
}

pub async fn run(config: AppConfig, action: ItemsAction, format: OutputFormat) -> GcResult<()> {
    logging::init_console_logging(&config.logging.level);
    let database = super::open_database(&config)?;
    let registry = ServiceRegistry::new(config, database);
    registry.init_all().await?;

    let result = {
        let items = registry.items.read().await;
        match action {
            ItemsAction::List => {
                let main_items = items.find_all_main_items()?.main_items;
                let sub_items = items.find_all_sub_items()?.sub_items;
                match format {
                    OutputFormat::Json => {
                        println!(
                            "{}",
                            serde_json::json!({ "mainItems": main_items, "subItems": sub_items })
                        );
                    }
                    OutputFormat::Text => {
                        let mut table = super::styled_table();
                        table.set_header(vec!["ID", "Main item", "Sub items", "Description"]);
                        for main in &main_items {
                            let children: Vec<String> = sub_items
                                .iter()
                                .filter(|s| Some(s.main_item_id) == main.id)
                                .map(|s| format!("{} ({})", s.name, s.id.unwrap_or_default()))
                                .collect();
                            table.add_row(vec![
                                main.id.map(|id| id.to_string()).unwrap_or_default(),
                                main.name.clone(),
                                children.join(", "),
                                super::truncate(&main.description, 40),
                            ]);
                        }
                        println!("{table}");
                    }
                }
                Ok(())
            }
            ItemsAction::AddMain { name, description } => {
                let request = MainItemCreateRequest::new(&name, &description);
                items
                    .create_main_item(&request)
                    .map(|created| report_created("main item", created.id, &created.name, format))
            }
            ItemsAction::AddSub {
                main_item_id,
                name,
                description,
            } => {
                let request = SubItemCreateRequest::new(main_item_id, &name, &description);
                items
                    .create_sub_item(&request)
                    .map(|created| report_created("sub item", created.id, &created.name, format))
            }
        }
    };

    registry.shutdown_all().await?;
    result.map_err(|e| {
        print_violations(&e);
        e
    })
}

fn report_created(kind: &str, id: Option<i64>, name: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "id": id, "name": name })),
        OutputFormat::Text => println!(
            "  {} Created {kind} {name} (id {})",
            style("OK").green().bold(),
            id.unwrap_or_default()
        ),
    }
}

fn print_violations(error: &GcError) {
    if let GcError::InvalidInput(errors) = error {
        for e in errors {
            eprintln!("  {} {}: {}", style("INVALID").red().bold(), e.field, e.reason);
        }
    }
}
