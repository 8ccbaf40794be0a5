//! Priced responses from experts to member estimates.
//!
//! Creation resolves the expert first and the member estimate second, so a
//! request naming neither reports `E001`.

use tracing::{debug, info};

use gc_core::error::{ErrorCode, GcError, GcResult};
use gc_core::validation::Validate;
use gc_models::{queries, Database, Expert, ExpertResponseEstimate, MemberEstimate};

use crate::dto::{
    ExpertResponseEstimateCreateRequest, ExpertResponseEstimateResponse,
    ExpertResponseEstimateUpdateRequest, ExpertResponseEstimatesResponse,
};
use crate::event_bus::{AppEvent, EventBus};
use crate::service::{Service, ServiceState};

pub struct ExpertResponseEstimateService {
    state: ServiceState,
    database: Database,
    event_bus: EventBus,
}

impl ExpertResponseEstimateService {
    pub fn new(database: Database, event_bus: EventBus) -> Self {
        Self {
            state: ServiceState::Created,
            database,
            event_bus,
        }
    }

    pub fn create(
        &self,
        expert_id: i64,
        request: &ExpertResponseEstimateCreateRequest,
    ) -> GcResult<ExpertResponseEstimateResponse> {
        request.validate()?;
        let Some(member_estimate_id) = request.member_request_estimate_id else {
            return Err(GcError::Internal("validated response request is missing memberRequestEstimateId".into()));
        };

        let conn = self.database.conn()?;
        if !Expert::exists_by_id(&conn, expert_id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundExpert));
        }
        if !MemberEstimate::exists_by_id(&conn, member_estimate_id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundMemberRequestEstimate));
        }

        let mut estimate = request.to_entity(expert_id, member_estimate_id);
        let id = estimate.save(&conn)?;

        info!(response_id = id, expert_id, member_estimate_id, "expert response estimate created");
        self.event_bus.emit(AppEvent::EstimateAnswered {
            response_id: id,
            expert_id,
            member_estimate_id,
        });
        Ok(ExpertResponseEstimateResponse::from(&estimate))
    }

    pub fn find_all(&self) -> GcResult<ExpertResponseEstimatesResponse> {
        let conn = self.database.conn()?;
        let estimates = ExpertResponseEstimate::find_all(&conn)?;
        debug!(count = estimates.len(), "listed expert response estimates");
        Ok(ExpertResponseEstimatesResponse::from(estimates.as_slice()))
    }

    pub fn find_by_id(&self, id: i64) -> GcResult<ExpertResponseEstimateResponse> {
        let conn = self.database.conn()?;
        ExpertResponseEstimate::find_by_id(&conn, id)?
            .map(|e| ExpertResponseEstimateResponse::from(&e))
            .ok_or(GcError::EntityNotFound(ErrorCode::NotFoundExpertResponseEstimate))
    }

    /// Responses answering one member estimate (`MRE001` if it does not exist).
    pub fn find_all_by_member_estimate(&self, member_estimate_id: i64) -> GcResult<ExpertResponseEstimatesResponse> {
        let conn = self.database.conn()?;
        if !MemberEstimate::exists_by_id(&conn, member_estimate_id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundMemberRequestEstimate));
        }
        let estimates = queries::responses_by_member_estimate(&conn, member_estimate_id)?;
        Ok(ExpertResponseEstimatesResponse::from(estimates.as_slice()))
    }

    /// Reprice a response. Returns the id only.
    pub fn update(&self, id: i64, request: &ExpertResponseEstimateUpdateRequest) -> GcResult<i64> {
        request.validate()?;
        let conn = self.database.conn()?;
        let mut estimate = ExpertResponseEstimate::find_by_id(&conn, id)?
            .ok_or(GcError::EntityNotFound(ErrorCode::NotFoundExpertResponseEstimate))?;

        estimate.apply_update(request.total_cost, &request.description, request.is_often_used);
        estimate.update(&conn)?;

        self.event_bus.emit(AppEvent::EstimateResponseUpdated { response_id: id });
        Ok(id)
    }

    pub fn delete(&self, id: i64) -> GcResult<()> {
        let conn = self.database.conn()?;
        if !ExpertResponseEstimate::delete(&conn, id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundExpertResponseEstimate));
        }
        info!(response_id = id, "expert response estimate deleted");
        self.event_bus.emit(AppEvent::EstimateResponseRemoved { response_id: id });
        Ok(())
    }
}

impl Service for ExpertResponseEstimateService {
    fn name(&self) -> &str {
        "expert_response_estimate"
    }

    fn state(&self) -> ServiceState {
        self.state
    }

    fn init(&mut self) -> GcResult<()> {
        self.state = ServiceState::Running;
        info!("expert response estimate service initialized");
        Ok(())
    }

    fn shutdown(&mut self) -> GcResult<()> {
        self.state = ServiceState::Stopped;
        info!("expert response estimate service stopped");
        Ok(())
    }
}
