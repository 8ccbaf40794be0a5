//! Buckets: members' favorite experts.

use tracing::info;

use gc_core::error::{ErrorCode, GcError, GcResult};
use gc_core::validation::Validate;
use gc_models::{Bucket, Database, Expert, Member};

use crate::dto::{BucketRequest, BucketResponse, BucketsResponse};
use crate::event_bus::{AppEvent, EventBus};
use crate::service::{Service, ServiceState};

pub struct BucketService {
    state: ServiceState,
    database: Database,
    event_bus: EventBus,
}

impl BucketService {
    pub fn new(database: Database, event_bus: EventBus) -> Self {
        Self {
            state: ServiceState::Created,
            database,
            event_bus,
        }
    }

    pub fn find_all(&self) -> GcResult<BucketsResponse> {
        let conn = self.database.conn()?;
        let buckets = Bucket::find_all(&conn)?;
        Ok(BucketsResponse::from(buckets.as_slice()))
    }

    /// Add an expert to a member's bucket. An existing pair is `B002`.
    pub fn create(&self, request: &BucketRequest) -> GcResult<BucketResponse> {
        request.validate()?;
        let (Some(expert_id), Some(member_id)) = (request.expert_id, request.member_id) else {
            return Err(GcError::Internal("validated bucket request is missing ids".into()));
        };

        let conn = self.database.conn()?;
        if !Expert::exists_by_id(&conn, expert_id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundExpert));
        }
        if !Member::exists_by_id(&conn, member_id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundMember));
        }
        if Bucket::exists_by_pair(&conn, expert_id, member_id)? {
            return Err(GcError::Duplicated(ErrorCode::DuplicatedBucket));
        }

        let mut bucket = Bucket::new(expert_id, member_id);
        let id = bucket.save(&conn)?;

        info!(bucket_id = id, expert_id, member_id, "bucket created");
        self.event_bus.emit(AppEvent::BucketAdded {
            bucket_id: id,
            expert_id,
            member_id,
        });
        Ok(BucketResponse::from(&bucket))
    }

    pub fn delete_by_id(&self, id: i64) -> GcResult<()> {
        let conn = self.database.conn()?;
        if !Bucket::delete(&conn, id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundBucket));
        }
        self.event_bus.emit(AppEvent::BucketRemoved { bucket_id: id });
        Ok(())
    }

    /// Whether a bucket exists for exactly this (expert, member) pair.
    pub fn check_status(&self, expert_id: i64, member_id: i64) -> GcResult<bool> {
        let conn = self.database.conn()?;
        Bucket::exists_by_pair(&conn, expert_id, member_id)
    }
}

impl Service for BucketService {
    fn name(&self) -> &str {
        "bucket"
    }

    fn state(&self) -> ServiceState {
        self.state
    }

    fn init(&mut self) -> GcResult<()> {
        self.state = ServiceState::Running;
        info!("bucket service initialized");
        Ok(())
    }

    fn shutdown(&mut self) -> GcResult<()> {
        self.state = ServiceState::Stopped;
        info!("bucket service stopped");
        Ok(())
    }
}
