//! Reviews of experts and the expert's reply.
//!
//! A review carries at most one live reply. Deleting a review also
//! soft-deletes its reply, in the same transaction.

use tracing::info;

use gc_core::error::{ErrorCode, GcError, GcResult};
use gc_core::validation::Validate;
use gc_models::{queries, Database, Expert, Member, Reply, Review, SubItem};

use crate::dto::{ReplyRequest, ReplyResponse, ReviewCreateRequest, ReviewResponse, ReviewUpdateRequest, ReviewsResponse};
use crate::event_bus::{AppEvent, EventBus};
use crate::service::{Service, ServiceState};

pub struct ReviewService {
    state: ServiceState,
    database: Database,
    event_bus: EventBus,
}

impl ReviewService {
    pub fn new(database: Database, event_bus: EventBus) -> Self {
        Self {
            state: ServiceState::Created,
            database,
            event_bus,
        }
    }

    /// Write a review. Expert, writer and sub item must all exist.
    pub fn create(&self, request: &ReviewCreateRequest) -> GcResult<ReviewResponse> {
        request.validate()?;
        let (Some(expert_id), Some(writer_id), Some(sub_item_id)) =
            (request.expert_id, request.writer_id, request.sub_item_id)
        else {
            return Err(GcError::Internal("validated review request is missing ids".into()));
        };

        let conn = self.database.conn()?;
        if !Expert::exists_by_id(&conn, expert_id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundExpert));
        }
        if !Member::exists_by_id(&conn, writer_id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundMember));
        }
        if !SubItem::exists_by_id(&conn, sub_item_id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundSubItem));
        }

        let mut review = Review::new(expert_id, writer_id, sub_item_id, &request.content, request.rating);
        let id = review.save(&conn)?;

        info!(review_id = id, expert_id, rating = review.rating, "review created");
        self.event_bus.emit(AppEvent::ReviewPosted {
            review_id: id,
            expert_id,
            rating: review.rating,
        });
        Ok(ReviewResponse::new(&review, None))
    }

    /// Live reviews of one expert, newest first, with their live reply.
    pub fn find_all_by_expert(&self, expert_id: i64) -> GcResult<ReviewsResponse> {
        let conn = self.database.conn()?;
        if !Expert::exists_by_id(&conn, expert_id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundExpert));
        }
        let reviews = queries::reviews_with_reply_by_expert(&conn, expert_id)?;
        Ok(ReviewsResponse::from(reviews.as_slice()))
    }

    pub fn find_by_id(&self, id: i64) -> GcResult<ReviewResponse> {
        let conn = self.database.conn()?;
        let review = Review::find_by_id(&conn, id)?
            .ok_or(GcError::EntityNotFound(ErrorCode::NotFoundReview))?;
        let reply = Reply::find_by_review(&conn, id)?;
        Ok(ReviewResponse::new(&review, reply.as_ref()))
    }

    pub fn update(&self, id: i64, request: &ReviewUpdateRequest) -> GcResult<i64> {
        request.validate()?;
        let conn = self.database.conn()?;
        let mut review = Review::find_by_id(&conn, id)?
            .ok_or(GcError::EntityNotFound(ErrorCode::NotFoundReview))?;

        review.content = request.content.clone();
        review.rating = request.rating;
        review.update(&conn)?;

        self.event_bus.emit(AppEvent::ReviewEdited {
            review_id: id,
            rating: review.rating,
        });
        Ok(id)
    }

    pub fn delete(&self, id: i64) -> GcResult<()> {
        let deleted = self.database.transaction(|conn| Review::soft_delete(conn, id))?;
        if !deleted {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundReview));
        }
        info!(review_id = id, "review deleted");
        self.event_bus.emit(AppEvent::ReviewRemoved { review_id: id });
        Ok(())
    }

    // ─── Replies ─────────────────────────────────────────────────────────

    /// Reply to a live review. A second live reply is `R003`.
    pub fn create_reply(&self, review_id: i64, request: &ReplyRequest) -> GcResult<ReplyResponse> {
        request.validate()?;
        let conn = self.database.conn()?;
        if Review::find_by_id(&conn, review_id)?.is_none() {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundReview));
        }
        if Reply::find_by_review(&conn, review_id)?.is_some() {
            return Err(GcError::Duplicated(ErrorCode::DuplicatedReply));
        }

        let mut reply = Reply::new(review_id, &request.content);
        let id = reply.save(&conn)?;

        self.event_bus.emit(AppEvent::ReplyPosted { reply_id: id, review_id });
        Ok(ReplyResponse::from(&reply))
    }

    pub fn update_reply(&self, id: i64, request: &ReplyRequest) -> GcResult<i64> {
        request.validate()?;
        let conn = self.database.conn()?;
        let mut reply = Reply::find_by_id(&conn, id)?
            .ok_or(GcError::EntityNotFound(ErrorCode::NotFoundReply))?;

        reply.content = request.content.clone();
        reply.update(&conn)?;

        self.event_bus.emit(AppEvent::ReplyEdited {
            reply_id: id,
            review_id: reply.review_id,
        });
        Ok(id)
    }

    pub fn delete_reply(&self, id: i64) -> GcResult<()> {
        let conn = self.database.conn()?;
        if !Reply::soft_delete(&conn, id)? {
            return Err(GcError::EntityNotFound(ErrorCode::NotFoundReply));
        }
        self.event_bus.emit(AppEvent::ReplyRemoved { reply_id: id });
        Ok(())
    }
}

impl Service for ReviewService {
    fn name(&self) -> &str {
        "review"
    }

    fn state(&self) -> ServiceState {
        self.state
    }

    fn init(&mut self) -> GcResult<()> {
        self.state = ServiceState::Running;
        info!("review service initialized");
        Ok(())
    }

    fn shutdown(&mut self) -> GcResult<()> {
        self.state = ServiceState::Stopped;
        info!("review service stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_core::config::DatabaseConfig;

    fn setup() -> (ReviewService, ReviewCreateRequest, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let db = Database::init(&dir.path().join("test.db"), &DatabaseConfig::default()).unwrap();
        let conn = db.conn().unwrap();
        let expert_id = Expert::new("고수청소", "서울", 10, "깨끗하게 청소합니다").save(&conn).unwrap();
        let member_id = Member::new("성이름", "hash", "a@b.com", "010-0000-0000").save(&conn).unwrap();
        drop(conn);
        let request = ReviewCreateRequest::new(expert_id, member_id, 1, "정말 친절하고 꼼꼼했어요", 5);
        (ReviewService::new(db, EventBus::new(16)), request, dir)
    }

    #[test]
    fn test_review_with_reply_round() {
        let (svc, request, _dir) = setup();
        let review_id = svc.create(&request).unwrap().id.unwrap();
        svc.create_reply(review_id, &ReplyRequest::new("감사합니다")).unwrap();

        let found = svc.find_by_id(review_id).unwrap();
        assert_eq!(found.reply.unwrap().content, "감사합니다");

        let err = svc.create_reply(review_id, &ReplyRequest::new("또 감사합니다")).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::DuplicatedReply);
    }

    #[test]
    fn test_deleted_review_disappears_from_reads() {
        let (svc, request, _dir) = setup();
        let expert_id = request.expert_id.unwrap();
        let review_id = svc.create(&request).unwrap().id.unwrap();
        let reply_id = svc.create_reply(review_id, &ReplyRequest::new("감사합니다")).unwrap().id.unwrap();

        svc.delete(review_id).unwrap();
        assert!(svc.find_all_by_expert(expert_id).unwrap().reviews.is_empty());
        assert_eq!(svc.find_by_id(review_id).unwrap_err().error_code(), ErrorCode::NotFoundReview);
        assert_eq!(svc.delete_reply(reply_id).unwrap_err().error_code(), ErrorCode::NotFoundReply);
    }

    #[test]
    fn test_reply_can_be_rewritten_after_delete() {
        let (svc, request, _dir) = setup();
        let review_id = svc.create(&request).unwrap().id.unwrap();
        let reply_id = svc.create_reply(review_id, &ReplyRequest::new("감사합니다")).unwrap().id.unwrap();

        assert_eq!(svc.update_reply(reply_id, &ReplyRequest::new("수정된 답글")).unwrap(), reply_id);
        svc.delete_reply(reply_id).unwrap();
        svc.create_reply(review_id, &ReplyRequest::new("새 답글")).unwrap();
    }

    #[test]
    fn test_missing_writer() {
        let (svc, mut request, _dir) = setup();
        request.writer_id = Some(999);
        assert_eq!(svc.create(&request).unwrap_err().error_code(), ErrorCode::NotFoundMember);
    }
}
