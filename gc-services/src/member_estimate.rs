//! Estimates requested by members.

use tracing::info;

use gc_core::error::{ErrorCode, GcError, GcResult};
use gc_core::validation::Validate;
use gc_models::{queries, Database, Member, MemberEstimate, SubItem};

use crate::dto::{MemberEstimateRequest, MemberEstimateResponse, MemberEstimatesResponse};
use crate::event_bus::{AppEvent, EventBus};
use crate::service::{Service, ServiceState};

pub struct MemberEstimateService {
    state: ServiceState,
    database: Database,
    event_bus: EventBus,
}

impl MemberEstimateService {
    pub fn new(database: Database, event_bus: EventBus) -> Self {
        Self {
            state: ServiceState::Created,
            database,
            event_bus,
        }
    }

    /// Record a member's estimate request. The member (`M001`) and the
    /// sub item (`I002`) must both exist.
    pub fn create(&self, member_id: i64, request: &MemberEstimateRequest) -> GcResult<MemberEstimateResponse> {
        request.validate()?;
        let (Some(sub_item_id), Some(preferred_start_date)) =
            (request.sub_item_id, request.preferred_start_date)
        else {
            return Err(GcError::Internal("validated estimate request is missing fields".into()));
        };

        let conn = self.database.conn()?;
        if !Member::exists_by_id(&conn, member_id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundMember));
        }
        if !SubItem::exists_by_id(&conn, sub_item_id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundSubItem));
        }

        let mut estimate = MemberEstimate::new(
            member_id,
            sub_item_id,
            &request.location,
            preferred_start_date,
            &request.detailed_description,
        );
        let id = estimate.save(&conn)?;

        info!(member_estimate_id = id, member_id, sub_item_id, "member estimate created");
        self.event_bus.emit(AppEvent::EstimateRequested {
            member_estimate_id: id,
            member_id,
            sub_item_id,
        });
        Ok(MemberEstimateResponse::from(&estimate))
    }

    pub fn find_all(&self) -> GcResult<MemberEstimatesResponse> {
        let conn = self.database.conn()?;
        let estimates = MemberEstimate::find_all(&conn)?;
        Ok(MemberEstimatesResponse::from(estimates.as_slice()))
    }

    /// Estimates one member has requested. An unknown member is `M001`.
    pub fn find_all_by_member(&self, member_id: i64) -> GcResult<MemberEstimatesResponse> {
        let conn = self.database.conn()?;
        if !Member::exists_by_id(&conn, member_id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundMember));
        }
        let estimates = queries::estimates_by_member(&conn, member_id)?;
        Ok(MemberEstimatesResponse::from(estimates.as_slice()))
    }

    pub fn find_by_id(&self, id: i64) -> GcResult<MemberEstimateResponse> {
        let conn = self.database.conn()?;
        MemberEstimate::find_by_id(&conn, id)?
            .map(|e| MemberEstimateResponse::from(&e))
            .ok_or(GcError::EntityNotFound(ErrorCode::NotFoundMemberRequestEstimate))
    }

    /// Hard delete; responses to the estimate are removed with it.
    pub fn delete(&self, id: i64) -> GcResult<()> {
        let conn = self.database.conn()?;
        if !MemberEstimate::delete(&conn, id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundMemberRequestEstimate));
        }
        info!(member_estimate_id = id, "member estimate deleted");
        self.event_bus.emit(AppEvent::EstimateWithdrawn { member_estimate_id: id });
        Ok(())
    }
}

impl Service for MemberEstimateService {
    fn name(&self) -> &str {
        "member_estimate"
    }

    fn state(&self) -> ServiceState {
        self.state
    }

    fn init(&mut self) -> GcResult<()> {
        self.state = ServiceState::Running;
        info!("member estimate service initialized");
        Ok(())
    }

    fn shutdown(&mut self) -> GcResult<()> {
        self.state = ServiceState::Stopped;
        info!("member estimate service stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gc_core::config::DatabaseConfig;

    fn setup() -> (MemberEstimateService, i64, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let db = Database::init(&dir.path().join("test.db"), &DatabaseConfig::default()).unwrap();
        let member_id = Member::new("성이름", "hash", "a@b.com", "010-0000-0000")
            .save(&db.conn().unwrap())
            .unwrap();
        (MemberEstimateService::new(db, EventBus::new(16)), member_id, dir)
    }

    fn request(sub_item_id: i64) -> MemberEstimateRequest {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
        MemberEstimateRequest::new(sub_item_id, "서울 강남구", date, "주말 오전 희망")
    }

    #[test]
    fn test_create_and_list() {
        let (svc, member_id, _dir) = setup();
        let created = svc.create(member_id, &request(1)).unwrap();
        assert_eq!(created.member_id, member_id);

        assert_eq!(svc.find_all().unwrap().member_estimates.len(), 1);
        assert_eq!(svc.find_all_by_member(member_id).unwrap().member_estimates.len(), 1);
        assert_eq!(svc.find_by_id(created.id.unwrap()).unwrap(), created);
    }

    #[test]
    fn test_missing_references() {
        let (svc, member_id, _dir) = setup();
        assert_eq!(svc.create(999, &request(1)).unwrap_err().error_code(), ErrorCode::NotFoundMember);
        assert_eq!(
            svc.create(member_id, &request(999)).unwrap_err().error_code(),
            ErrorCode::NotFoundSubItem
        );
    }

    #[test]
    fn test_delete_missing() {
        let (svc, _member_id, _dir) = setup();
        assert_eq!(
            svc.delete(1).unwrap_err().error_code(),
            ErrorCode::NotFoundMemberRequestEstimate
        );
    }
}
