//! Expert profile management.

use tracing::info;

use gc_core::error::{ErrorCode, GcError, GcResult};
use gc_core::validation::Validate;
use gc_models::{queries, Database, Expert};

use crate::dto::{ExpertCreateRequest, ExpertDetailResponse, ExpertResponse, ExpertUpdateRequest, ExpertsResponse};
use crate::event_bus::{AppEvent, EventBus};
use crate::service::{Service, ServiceState};

pub struct ExpertService {
    state: ServiceState,
    database: Database,
    event_bus: EventBus,
}

impl ExpertService {
    pub fn new(database: Database, event_bus: EventBus) -> Self {
        Self {
            state: ServiceState::Created,
            database,
            event_bus,
        }
    }

    /// Register an expert. Store names are unique (`E002`).
    pub fn create(&self, request: &ExpertCreateRequest) -> GcResult<ExpertResponse> {
        request.validate()?;
        let conn = self.database.conn()?;
        if Expert::exists_by_store_name(&conn, &request.store_name, None)? {
            return Err(GcError::Duplicated(ErrorCode::DuplicatedExpertStoreName));
        }

        let mut expert = request.to_entity();
        let id = expert.save(&conn)?;

        info!(expert_id = id, "expert registered");
        self.event_bus.emit(AppEvent::ExpertRegistered { expert_id: id });
        Ok(ExpertResponse::from(&expert))
    }

    pub fn find_all(&self) -> GcResult<ExpertsResponse> {
        let conn = self.database.conn()?;
        let experts = Expert::find_all(&conn)?;
        Ok(ExpertsResponse::from(experts.as_slice()))
    }

    /// One expert with the count and mean of their live reviews.
    pub fn find_by_id(&self, id: i64) -> GcResult<ExpertDetailResponse> {
        let conn = self.database.conn()?;
        let expert = Expert::find_by_id(&conn, id)?
            .ok_or(GcError::EntityNotFound(ErrorCode::NotFoundExpert))?;
        let summary = queries::expert_rating_summary(&conn, id)?;
        Ok(ExpertDetailResponse::new(&expert, summary))
    }

    /// Rewrite an expert's profile and return its id.
    pub fn update(&self, id: i64, request: &ExpertUpdateRequest) -> GcResult<i64> {
        request.validate()?;
        let conn = self.database.conn()?;
        let mut expert = Expert::find_by_id(&conn, id)?
            .ok_or(GcError::EntityNotFound(ErrorCode::NotFoundExpert))?;
        if Expert::exists_by_store_name(&conn, &request.store_name, Some(id))? {
            return Err(GcError::Duplicated(ErrorCode::DuplicatedExpertStoreName));
        }

        let changes = request.to_entity();
        expert.store_name = changes.store_name;
        expert.location = changes.location;
        expert.distance = changes.distance;
        expert.description = changes.description;
        expert.update(&conn)?;

        self.event_bus.emit(AppEvent::ExpertUpdated { expert_id: id });
        Ok(id)
    }

    pub fn delete(&self, id: i64) -> GcResult<()> {
        let conn = self.database.conn()?;
        if !Expert::delete(&conn, id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundExpert));
        }
        info!(expert_id = id, "expert removed");
        self.event_bus.emit(AppEvent::ExpertRemoved { expert_id: id });
        Ok(())
    }
}

impl Service for ExpertService {
    fn name(&self) -> &str {
        "expert"
    }

    fn state(&self) -> ServiceState {
        self.state
    }

    fn init(&mut self) -> GcResult<()> {
        self.state = ServiceState::Running;
        info!("expert service initialized");
        Ok(())
    }

    fn shutdown(&mut self) -> GcResult<()> {
        self.state = ServiceState::Stopped;
        info!("expert service stopped");
        Ok(())
    }
}
