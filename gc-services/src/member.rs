//! Member service: sign-up, login and withdrawal.
//!
//! Passwords are stored as bcrypt hashes; the work factor comes from
//! `security.bcrypt_cost`.

use tracing::{debug, info};

use gc_core::error::{ErrorCode, GcError, GcResult};
use gc_core::validation::Validate;
use gc_models::{Database, Member};

use crate::dto::{MemberLoginRequest, MemberResponse, MemberSignUpRequest};
use crate::event_bus::{AppEvent, EventBus};
use crate::service::{Service, ServiceState};

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

pub struct MemberService {
    state: ServiceState,
    database: Database,
    event_bus: EventBus,
    bcrypt_cost: u32,
}

impl MemberService {
    pub fn new(database: Database, event_bus: EventBus, bcrypt_cost: u32) -> Self {
        Self {
            state: ServiceState::Created,
            database,
            event_bus,
            bcrypt_cost,
        }
    }

    /// Register a new member. Fails with `M002` if the email is taken by a live member.
    pub fn sign_up(&self, request: &MemberSignUpRequest) -> GcResult<MemberResponse> {
        request.validate()?;
        let conn = self.database.conn()?;
        if Member::exists_by_email(&conn, &request.email)? {
            return Err(GcError::Duplicated(ErrorCode::DuplicatedMemberEmail));
        }

        let hash = bcrypt::hash(&request.password, self.bcrypt_cost)
            .map_err(|e| GcError::PasswordHash(e.to_string()))?;
        let mut member = Member::new(&request.name, &hash, &request.email, &request.phone_number);
        let id = member.save(&conn)?;

        info!(member_id = id, "member signed up");
        self.event_bus.emit(AppEvent::MemberSignedUp { member_id: id });
        Ok(MemberResponse::from(&member))
    }

    /// Check credentials. Unknown email and wrong password both yield `M003`.
    pub fn login(&self, request: &MemberLoginRequest) -> GcResult<MemberResponse> {
        let conn = self.database.conn()?;
        let member = Member::find_by_email(&conn, &request.email)?
            .ok_or(GcError::CertifiedFail(ErrorCode::MemberCertifiedFail))?;

        let matched = bcrypt::verify(&request.password, &member.password)
            .map_err(|e| GcError::PasswordHash(e.to_string()))?;
        if !matched {
            debug!(email = %request.email, "login rejected");
            return Err(GcError::CertifiedFail(ErrorCode::MemberCertifiedFail));
        }

        Ok(MemberResponse::from(&member))
    }

    pub fn find_by_id(&self, id: i64) -> GcResult<MemberResponse> {
        let conn = self.database.conn()?;
        Member::find_by_id(&conn, id)?
            .map(|m| MemberResponse::from(&m))
            .ok_or(GcError::EntityNotFound(ErrorCode::NotFoundMember))
    }

    /// Withdraw a member (soft delete).
    pub fn delete(&self, id: i64) -> GcResult<()> {
        let conn = self.database.conn()?;
        if !Member::soft_delete(&conn, id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundMember));
        }
        info!(member_id = id, "member withdrawn");
        self.event_bus.emit(AppEvent::MemberWithdrawn { member_id: id });
        Ok(())
    }
}

impl Service for MemberService {
    fn name(&self) -> &str {
        "member"
    }

    fn state(&self) -> ServiceState {
        self.state
    }

    fn init(&mut self) -> GcResult<()> {
        self.state = ServiceState::Initializing;
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            self.state = ServiceState::Failed;
            return Err(GcError::ServiceInit(format!(
                "bcrypt cost {} outside {MIN_BCRYPT_COST}..={MAX_BCRYPT_COST}",
                self.bcrypt_cost
            )));
        }
        self.state = ServiceState::Running;
        info!("member service initialized");
        Ok(())
    }

    fn shutdown(&mut self) -> GcResult<()> {
        self.state = ServiceState::Stopped;
        info!("member service stopped");
        Ok(())
    }
}
