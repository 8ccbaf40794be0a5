//! Service registry for dependency injection and lifecycle management.
//!
//! The registry builds every domain service over one shared database and
//! event bus, initializes them in order and shuts them down in reverse.
//! Each service is reachable both through a typed field (for handlers) and
//! through the ordered list of trait objects (for lifecycle and health).

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use gc_core::config::{AppConfig, ConfigHandle};
use gc_core::constants::EVENT_BUS_CAPACITY;
use gc_core::error::{GcError, GcResult};
use gc_models::Database;

use crate::bucket::BucketService;
use crate::event_bus::EventBus;
use crate::expert::ExpertService;
use crate::expert_response_estimate::ExpertResponseEstimateService;
use crate::item::ItemService;
use crate::member::MemberService;
use crate::member_estimate::MemberEstimateService;
use crate::review::ReviewService;
use crate::service::{Service, ServiceState};

type SharedService = Arc<RwLock<dyn Service>>;

/// Central service registry that owns all application services.
pub struct ServiceRegistry {
    /// Application configuration.
    pub config: ConfigHandle,
    /// Database connection pool.
    pub database: Database,
    /// Application-level event bus.
    pub event_bus: EventBus,

    pub members: Arc<RwLock<MemberService>>,
    pub experts: Arc<RwLock<ExpertService>>,
    pub items: Arc<RwLock<ItemService>>,
    pub member_estimates: Arc<RwLock<MemberEstimateService>>,
    pub expert_response_estimates: Arc<RwLock<ExpertResponseEstimateService>>,
    pub buckets: Arc<RwLock<BucketService>>,
    pub reviews: Arc<RwLock<ReviewService>>,

    /// Registered services in initialization order.
    services: Vec<(String, SharedService)>,
}

/// Wrap a service for shared use and record it in the lifecycle list.
fn track<S: Service + 'static>(services: &mut Vec<(String, SharedService)>, service: S) -> Arc<RwLock<S>> {
    let name = service.name().to_string();
    let shared = Arc::new(RwLock::new(service));
    info!("registered service: {name}");
    services.push((name, shared.clone() as SharedService));
    shared
}

impl ServiceRegistry {
    /// Build all services in dependency order.
    ///
    /// Initialization order:
    /// 1. Item (seeded catalogue, referenced by estimates and reviews)
    /// 2. Member
    /// 3. Expert
    /// 4. MemberEstimate (member, sub item)
    /// 5. ExpertResponseEstimate (expert, member estimate)
    /// 6. Bucket (expert, member)
    /// 7. Review (expert, member, sub item)
    pub fn new(config: AppConfig, database: Database) -> Self {
        let bus = EventBus::new(EVENT_BUS_CAPACITY);
        let bcrypt_cost = config.security.bcrypt_cost;
        let mut services = Vec::new();

        let items = track(&mut services, ItemService::new(database.clone(), bus.clone()));
        let members = track(
            &mut services,
            MemberService::new(database.clone(), bus.clone(), bcrypt_cost),
        );
        let experts = track(&mut services, ExpertService::new(database.clone(), bus.clone()));
        let member_estimates = track(
            &mut services,
            MemberEstimateService::new(database.clone(), bus.clone()),
        );
        let expert_response_estimates = track(
            &mut services,
            ExpertResponseEstimateService::new(database.clone(), bus.clone()),
        );
        let buckets = track(&mut services, BucketService::new(database.clone(), bus.clone()));
        let reviews = track(&mut services, ReviewService::new(database.clone(), bus.clone()));

        info!("registered {} services", services.len());

        Self {
            config: ConfigHandle::new(config),
            database,
            event_bus: bus,
            members,
            experts,
            items,
            member_estimates,
            expert_response_estimates,
            buckets,
            reviews,
            services,
        }
    }

    /// Initialize all registered services in order. Stops at the first failure.
    pub async fn init_all(&self) -> GcResult<()> {
        info!("initializing {} services", self.service_count());

        for (name, service) in &self.services {
            info!("initializing service: {name}");
            let mut svc = service.write().await;
            if let Err(e) = svc.init() {
                error!("failed to initialize service {name}: {e}");
                return Err(GcError::ServiceInit(format!("{name}: {e}")));
            }
        }

        info!("all services initialized");
        Ok(())
    }

    /// Shut down all services in reverse order.
    pub async fn shutdown_all(&self) -> GcResult<()> {
        info!("shutting down services");

        for (name, service) in self.services.iter().rev() {
            info!("shutting down service: {name}");
            let mut svc = service.write().await;
            if let Err(e) = svc.shutdown() {
                error!("error shutting down service {name}: {e}");
            }
        }

        info!("all services shut down");
        Ok(())
    }

    /// Get a reference to the event bus.
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Get the health status of all services.
    pub async fn health_check(&self) -> Vec<(String, ServiceState, bool)> {
        let mut results = Vec::new();
        for (name, service) in &self.services {
            let svc = service.read().await;
            results.push((name.clone(), svc.state(), svc.is_healthy()));
        }
        results
    }

    /// Get the number of registered services.
    pub fn service_count(&self) -> usize {
        self.services.len()
    }
}
