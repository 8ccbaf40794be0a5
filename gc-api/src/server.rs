//! HTTP server startup and graceful shutdown.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use gc_core::config::AppConfig;
use gc_core::error::{GcError, GcResult};
use gc_services::event_bus::{event_label, EventBus};
use gc_services::ServiceRegistry;

use crate::routes;
use crate::state::AppState;

/// Bind the configured address and serve until Ctrl-C.
///
/// The registry must already be initialized; it is shut down here once
/// the listener has drained.
pub async fn serve(config: &AppConfig, registry: Arc<ServiceRegistry>) -> GcResult<()> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| GcError::Config(format!("failed to bind {addr}: {e}")))?;
    info!(%addr, "gosucatcher API listening");

    let event_logger = spawn_event_logger(registry.event_bus());
    let app = routes::app(AppState::new(registry.clone()), &config.server);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    event_logger.abort();
    registry.shutdown_all().await?;
    info!("server stopped");
    Ok(())
}

/// Log every domain event at debug level.
fn spawn_event_logger(bus: &EventBus) -> tokio::task::JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => debug!(event = event_label(&event), ?event, "domain event"),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "event logger lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
