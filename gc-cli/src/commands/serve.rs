//! `gosucatcher serve`

use std::sync::Arc;

use tracing::info;

use gc_core::config::AppConfig;
use gc_core::constants::APP_VERSION;
use gc_core::error::GcResult;
use gc_core::logging;
use gc_services::ServiceRegistry;

pub async fn run(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> GcResult<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let log_dir = config.effective_log_dir()?;
    let _guard = logging::init_logging(&config.logging.level, &log_dir, config.logging.json_output)?;
    info!("GosuCatcher v{APP_VERSION}");

    let database = super::open_database(&config)?;
    let registry = Arc::new(ServiceRegistry::new(config.clone(), database));
    registry.init_all().await?;

    gc_api::serve(&config, registry).await
}
