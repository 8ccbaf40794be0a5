//! Application state shared across all API handlers.

use std::sync::Arc;
use std::time::Instant;

use gc_services::ServiceRegistry;

#[derive(Clone)]
pub struct AppState {
    /// Initialized services.
    pub services: Arc<ServiceRegistry>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(services: Arc<ServiceRegistry>) -> Self {
        Self {
            services,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
