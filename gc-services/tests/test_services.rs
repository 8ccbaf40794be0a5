//! Integration tests for service coordination.
//!
//! Drives the services through the registry the way the HTTP layer does:
//! member sign-up and withdrawal, the estimate request/response lifecycle,
//! buckets, reviews with replies and the expert rating summary.

mod common;

use gc_core::error::{ErrorCode, GcError};
use gc_services::dto::{
    BucketRequest, ExpertCreateRequest, ExpertResponseEstimateCreateRequest, MemberEstimateRequest,
    MemberLoginRequest, MemberSignUpRequest, ReplyRequest, ReviewCreateRequest, ReviewUpdateRequest,
};
use gc_services::service::ServiceState;

fn sign_up(email: &str) -> MemberSignUpRequest {
    MemberSignUpRequest::new("김고수", "password123!", email, "010-1234-5678")
}

// ---- Registry lifecycle ----

#[tokio::test]
async fn registry_init_brings_every_service_up() {
    let (registry, _dir) = common::create_test_registry().await;

    let health = registry.health_check().await;
    assert_eq!(health.len(), registry.service_count());
    for (name, state, healthy) in &health {
        assert_eq!(*state, ServiceState::Running, "service {name} should be running");
        assert!(healthy);
    }

    registry.shutdown_all().await.unwrap();
    assert!(registry
        .health_check()
        .await
        .iter()
        .all(|(_, state, healthy)| *state == ServiceState::Stopped && !healthy));
}

// ---- Members ----

#[tokio::test]
async fn member_sign_up_login_and_withdraw() {
    let (registry, _dir) = common::create_test_registry().await;
    let members = registry.members.read().await;

    let created = members.sign_up(&sign_up("gosu@example.com")).unwrap();
    let id = created.id.unwrap();

    let logged_in = members
        .login(&MemberLoginRequest::new("gosu@example.com", "password123!"))
        .unwrap();
    assert_eq!(logged_in.id, Some(id));

    members.delete(id).unwrap();
    let err = members
        .login(&MemberLoginRequest::new("gosu@example.com", "password123!"))
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::MemberCertifiedFail);

    // The email is free again once the holder has withdrawn.
    members.sign_up(&sign_up("gosu@example.com")).unwrap();
}

#[tokio::test]
async fn withdrawn_member_cannot_request_estimates() {
    let (registry, _dir) = common::create_test_registry().await;
    let sub_item_id = common::seeded_sub_item(&registry.database);
    let member_id = registry
        .members
        .read()
        .await
        .sign_up(&sign_up("gone@example.com"))
        .unwrap()
        .id
        .unwrap();
    registry.members.read().await.delete(member_id).unwrap();

    let request = MemberEstimateRequest::new(sub_item_id, "서울", common::start_date(), "");
    let err = registry.member_estimates.read().await.create(member_id, &request).unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::NotFoundMember);
}

// ---- Estimates ----

#[tokio::test]
async fn estimate_lifecycle_cascades_responses() {
    let (registry, _dir) = common::create_test_registry().await;
    let member_id = common::seed_member(&registry.database, "seeker@example.com");
    let expert_id = common::seed_expert(&registry.database, "고수레슨");
    let sub_item_id = common::seeded_sub_item(&registry.database);

    let estimate = registry
        .member_estimates
        .read()
        .await
        .create(
            member_id,
            &MemberEstimateRequest::new(sub_item_id, "서울 마포구", common::start_date(), "주 2회 희망"),
        )
        .unwrap();
    let estimate_id = estimate.id.unwrap();
    assert_eq!(estimate.preferred_start_date, common::start_date());

    let responses = registry.expert_response_estimates.read().await;
    let response = responses
        .create(
            expert_id,
            &ExpertResponseEstimateCreateRequest::new(estimate_id, 50_000, "회당 두 시간 수업입니다", false),
        )
        .unwrap();
    let response_id = response.id.unwrap();

    let listed = responses.find_all_by_member_estimate(estimate_id).unwrap();
    assert_eq!(listed.expert_response_estimates_response.len(), 1);

    registry.member_estimates.read().await.delete(estimate_id).unwrap();

    assert_eq!(
        responses.find_by_id(response_id).unwrap_err().error_code(),
        ErrorCode::NotFoundExpertResponseEstimate
    );
    assert_eq!(
        responses.find_all_by_member_estimate(estimate_id).unwrap_err().error_code(),
        ErrorCode::NotFoundMemberRequestEstimate
    );
}

#[tokio::test]
async fn estimate_request_reports_every_missing_field() {
    let (registry, _dir) = common::create_test_registry().await;
    let member_id = common::seed_member(&registry.database, "seeker@example.com");

    let err = registry
        .member_estimates
        .read()
        .await
        .create(member_id, &MemberEstimateRequest::default())
        .unwrap_err();

    assert!(matches!(err, GcError::InvalidInput(_)));
    let fields: Vec<&str> = err.field_errors().iter().map(|f| f.field.as_str()).collect();
    assert!(fields.contains(&"subItemId"));
    assert!(fields.contains(&"location"));
    assert!(fields.contains(&"preferredStartDate"));
}

#[tokio::test]
async fn estimates_listed_per_member() {
    let (registry, _dir) = common::create_test_registry().await;
    let first = common::seed_member(&registry.database, "first@example.com");
    let second = common::seed_member(&registry.database, "second@example.com");
    let sub_item_id = common::seeded_sub_item(&registry.database);
    let estimates = registry.member_estimates.read().await;

    for _ in 0..2 {
        estimates
            .create(first, &MemberEstimateRequest::new(sub_item_id, "부산", common::start_date(), ""))
            .unwrap();
    }
    estimates
        .create(second, &MemberEstimateRequest::new(sub_item_id, "대구", common::start_date(), ""))
        .unwrap();

    assert_eq!(estimates.find_all().unwrap().member_estimates.len(), 3);
    assert_eq!(estimates.find_all_by_member(first).unwrap().member_estimates.len(), 2);
    assert_eq!(estimates.find_all_by_member(second).unwrap().member_estimates.len(), 1);
}

// ---- Experts, buckets and reviews ----

#[tokio::test]
async fn expert_store_name_is_unique_across_updates() {
    let (registry, _dir) = common::create_test_registry().await;
    let experts = registry.experts.read().await;

    experts
        .create(&ExpertCreateRequest::new("첫번째가게", "서울", 3, "첫 번째 가게입니다"))
        .unwrap();
    let second = experts
        .create(&ExpertCreateRequest::new("두번째가게", "서울", 3, "두 번째 가게입니다"))
        .unwrap()
        .id
        .unwrap();

    let err = experts
        .update(second, &ExpertCreateRequest::new("첫번째가게", "서울", 3, "이름을 바꿔봅니다"))
        .unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::DuplicatedExpertStoreName);

    // Keeping one's own name is not a conflict.
    let updated = experts
        .update(second, &ExpertCreateRequest::new("두번째가게", "부산", 7, "이사했습니다"))
        .unwrap();
    assert_eq!(updated, second);
    assert_eq!(experts.find_by_id(second).unwrap().expert.location, "부산");
}

#[tokio::test]
async fn deleting_expert_removes_their_buckets() {
    let (registry, _dir) = common::create_test_registry().await;
    let member_id = common::seed_member(&registry.database, "fan@example.com");
    let expert_id = common::seed_expert(&registry.database, "인기가게");

    let buckets = registry.buckets.read().await;
    buckets.create(&BucketRequest::new(expert_id, member_id)).unwrap();
    assert!(buckets.check_status(expert_id, member_id).unwrap());

    registry.experts.read().await.delete(expert_id).unwrap();
    assert!(!buckets.check_status(expert_id, member_id).unwrap());
    assert!(buckets.find_all().unwrap().buckets.is_empty());
}

#[tokio::test]
async fn rating_summary_tracks_live_reviews() {
    let (registry, _dir) = common::create_test_registry().await;
    let writer = common::seed_member(&registry.database, "writer@example.com");
    let expert_id = common::seed_expert(&registry.database, "평가받는가게");
    let sub_item_id = common::seeded_sub_item(&registry.database);
    let reviews = registry.reviews.read().await;
    let experts = registry.experts.read().await;

    let empty = experts.find_by_id(expert_id).unwrap();
    assert_eq!(empty.review_count, 0);
    assert_eq!(empty.average_rating, 0.0);

    let five = reviews
        .create(&ReviewCreateRequest::new(expert_id, writer, sub_item_id, "최고의 수업이었습니다 강추", 5))
        .unwrap()
        .id
        .unwrap();
    reviews
        .create(&ReviewCreateRequest::new(expert_id, writer, sub_item_id, "시간 약속을 잘 지켜주셨어요", 4))
        .unwrap();

    let detail = experts.find_by_id(expert_id).unwrap();
    assert_eq!(detail.review_count, 2);
    assert!((detail.average_rating - 4.5).abs() < f64::EPSILON);

    reviews.update(five, &ReviewUpdateRequest::new("다시 생각해보니 보통이었어요", 2)).unwrap();
    reviews.delete(five).unwrap();

    let detail = experts.find_by_id(expert_id).unwrap();
    assert_eq!(detail.review_count, 1);
    assert!((detail.average_rating - 4.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn reviews_by_expert_newest_first_with_replies() {
    let (registry, _dir) = common::create_test_registry().await;
    let writer = common::seed_member(&registry.database, "writer@example.com");
    let expert_id = common::seed_expert(&registry.database, "답글다는가게");
    let sub_item_id = common::seeded_sub_item(&registry.database);
    let reviews = registry.reviews.read().await;

    let older = reviews
        .create(&ReviewCreateRequest::new(expert_id, writer, sub_item_id, "첫 번째 후기를 남깁니다", 3))
        .unwrap()
        .id
        .unwrap();
    let newer = reviews
        .create(&ReviewCreateRequest::new(expert_id, writer, sub_item_id, "두 번째 후기를 남깁니다", 4))
        .unwrap()
        .id
        .unwrap();
    reviews.create_reply(older, &ReplyRequest::new("소중한 후기 감사합니다")).unwrap();

    let listed = reviews.find_all_by_expert(expert_id).unwrap().reviews;
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, Some(newer));
    assert!(listed[0].reply.is_none());
    assert_eq!(listed[1].id, Some(older));
    assert_eq!(listed[1].reply.as_ref().map(|r| r.content.as_str()), Some("소중한 후기 감사합니다"));
}

#[tokio::test]
async fn reply_to_deleted_review_is_not_found() {
    let (registry, _dir) = common::create_test_registry().await;
    let writer = common::seed_member(&registry.database, "writer@example.com");
    let expert_id = common::seed_expert(&registry.database, "가게");
    let sub_item_id = common::seeded_sub_item(&registry.database);
    let reviews = registry.reviews.read().await;

    let review_id = reviews
        .create(&ReviewCreateRequest::new(expert_id, writer, sub_item_id, "삭제될 후기를 남깁니다", 1))
        .unwrap()
        .id
        .unwrap();
    reviews.delete(review_id).unwrap();

    let err = reviews.create_reply(review_id, &ReplyRequest::new("답글")).unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::NotFoundReview);
    assert_eq!(reviews.delete(review_id).unwrap_err().error_code(), ErrorCode::NotFoundReview);
}
