//! End-to-end event flow integration tests.
//!
//! Every successful write publishes an `AppEvent` on the registry's bus;
//! failed writes publish nothing.

mod common;

use std::time::Duration;

use gc_services::dto::{
    BucketRequest, ExpertCreateRequest, ExpertResponseEstimateCreateRequest, ExpertResponseEstimateUpdateRequest,
    MainItemCreateRequest, MemberEstimateRequest, MemberSignUpRequest, ReplyRequest, ReviewCreateRequest,
    ReviewUpdateRequest,
};
use gc_services::event_bus::{event_label, AppEvent};

// ---- Member events ----

#[tokio::test]
async fn sign_up_and_withdraw_emit_member_events() {
    let (registry, _dir) = common::create_test_registry().await;
    let mut rx = registry.event_bus().subscribe();
    let members = registry.members.read().await;

    let id = members
        .sign_up(&MemberSignUpRequest::new("김고수", "password123!", "a@b.com", "010-1111-2222"))
        .unwrap()
        .id
        .unwrap();
    members.delete(id).unwrap();

    assert_eq!(rx.recv().await.unwrap(), AppEvent::MemberSignedUp { member_id: id });
    assert_eq!(rx.recv().await.unwrap(), AppEvent::MemberWithdrawn { member_id: id });
}

// ---- Estimate pipeline ----

#[tokio::test]
async fn estimate_pipeline_emits_in_order() {
    let (registry, _dir) = common::create_test_registry().await;
    let member_id = common::seed_member(&registry.database, "seeker@example.com");
    let expert_id = common::seed_expert(&registry.database, "응답가게");
    let sub_item_id = common::seeded_sub_item(&registry.database);
    let mut rx = registry.event_bus().subscribe();

    let estimate_id = registry
        .member_estimates
        .read()
        .await
        .create(member_id, &MemberEstimateRequest::new(sub_item_id, "서울", common::start_date(), ""))
        .unwrap()
        .id
        .unwrap();

    let responses = registry.expert_response_estimates.read().await;
    let response_id = responses
        .create(
            expert_id,
            &ExpertResponseEstimateCreateRequest::new(estimate_id, 120_000, "주말 오전 방문 가능합니다", true),
        )
        .unwrap()
        .id
        .unwrap();
    responses
        .update(response_id, &ExpertResponseEstimateUpdateRequest::new(100_000, "할인 적용했습니다", true))
        .unwrap();
    responses.delete(response_id).unwrap();

    let received: Vec<AppEvent> = vec![
        rx.recv().await.unwrap(),
        rx.recv().await.unwrap(),
        rx.recv().await.unwrap(),
        rx.recv().await.unwrap(),
    ];
    assert_eq!(
        received,
        vec![
            AppEvent::EstimateRequested { member_estimate_id: estimate_id, member_id, sub_item_id },
            AppEvent::EstimateAnswered { response_id, expert_id, member_estimate_id: estimate_id },
            AppEvent::EstimateResponseUpdated { response_id },
            AppEvent::EstimateResponseRemoved { response_id },
        ]
    );
}

// ---- Buckets and reviews ----

#[tokio::test]
async fn bucket_and_review_events_carry_ids() {
    let (registry, _dir) = common::create_test_registry().await;
    let member_id = common::seed_member(&registry.database, "fan@example.com");
    let expert_id = common::seed_expert(&registry.database, "단골가게");
    let sub_item_id = common::seeded_sub_item(&registry.database);
    let mut rx = registry.event_bus().subscribe();

    let bucket_id = registry
        .buckets
        .read()
        .await
        .create(&BucketRequest::new(expert_id, member_id))
        .unwrap()
        .id
        .unwrap();
    match rx.recv().await.unwrap() {
        AppEvent::BucketAdded { bucket_id: id, expert_id: e, member_id: m } => {
            assert_eq!((id, e, m), (bucket_id, expert_id, member_id));
        }
        other => panic!("expected BucketAdded, got {other:?}"),
    }

    let reviews = registry.reviews.read().await;
    let review_id = reviews
        .create(&ReviewCreateRequest::new(expert_id, member_id, sub_item_id, "친절하고 빠른 응대 감사합니다", 5))
        .unwrap()
        .id
        .unwrap();
    let reply_id = reviews
        .create_reply(review_id, &ReplyRequest::new("감사합니다"))
        .unwrap()
        .id
        .unwrap();

    assert_eq!(
        rx.recv().await.unwrap(),
        AppEvent::ReviewPosted { review_id, expert_id, rating: 5 }
    );
    assert_eq!(rx.recv().await.unwrap(), AppEvent::ReplyPosted { reply_id, review_id });
}

#[tokio::test]
async fn creates_and_edits_emit_distinct_events() {
    let (registry, _dir) = common::create_test_registry().await;
    let member_id = common::seed_member(&registry.database, "writer@example.com");
    let sub_item_id = common::seeded_sub_item(&registry.database);
    let mut rx = registry.event_bus().subscribe();

    let experts = registry.experts.read().await;
    let expert_id = experts
        .create(&ExpertCreateRequest::new("새로운가게", "서울", 4, "처음 문을 열었습니다"))
        .unwrap()
        .id
        .unwrap();
    experts
        .update(expert_id, &ExpertCreateRequest::new("새로운가게", "부산", 4, "이사했습니다"))
        .unwrap();
    assert_eq!(rx.recv().await.unwrap(), AppEvent::ExpertRegistered { expert_id });
    assert_eq!(rx.recv().await.unwrap(), AppEvent::ExpertUpdated { expert_id });

    let reviews = registry.reviews.read().await;
    let review_id = reviews
        .create(&ReviewCreateRequest::new(expert_id, member_id, sub_item_id, "친절하고 빠른 응대 감사합니다", 5))
        .unwrap()
        .id
        .unwrap();
    reviews
        .update(review_id, &ReviewUpdateRequest::new("다시 생각해보니 보통이었어요", 3))
        .unwrap();
    let reply_id = reviews
        .create_reply(review_id, &ReplyRequest::new("감사합니다"))
        .unwrap()
        .id
        .unwrap();
    reviews.update_reply(reply_id, &ReplyRequest::new("다시 감사드립니다")).unwrap();

    assert!(matches!(rx.recv().await.unwrap(), AppEvent::ReviewPosted { .. }));
    assert_eq!(rx.recv().await.unwrap(), AppEvent::ReviewEdited { review_id, rating: 3 });
    assert_eq!(rx.recv().await.unwrap(), AppEvent::ReplyPosted { reply_id, review_id });
    let edited = rx.recv().await.unwrap();
    assert_eq!(edited, AppEvent::ReplyEdited { reply_id, review_id });
    assert_eq!(event_label(&edited), "ReplyEdited");
}

#[tokio::test]
async fn catalog_changes_emit_with_main_item_id() {
    let (registry, _dir) = common::create_test_registry().await;
    let mut rx = registry.event_bus().subscribe();

    let main_item_id = registry
        .items
        .read()
        .await
        .create_main_item(&MainItemCreateRequest::new("반려동물", "반려동물 돌봄 서비스"))
        .unwrap()
        .id
        .unwrap();

    let event = rx.recv().await.unwrap();
    assert_eq!(event, AppEvent::CatalogChanged { main_item_id });
    assert_eq!(event_label(&event), "CatalogChanged");
}

// ---- Failures ----

#[tokio::test]
async fn failed_writes_emit_nothing() {
    let (registry, _dir) = common::create_test_registry().await;
    let mut rx = registry.event_bus().subscribe();

    assert!(registry.buckets.read().await.create(&BucketRequest::new(1, 1)).is_err());
    assert!(registry.reviews.read().await.delete(42).is_err());
    assert!(registry.members.read().await.delete(7).is_err());
    assert!(registry
        .expert_response_estimates
        .read()
        .await
        .update(1, &ExpertResponseEstimateUpdateRequest::new(0, "짧음", false))
        .is_err());
    assert!(registry
        .members
        .read()
        .await
        .sign_up(&MemberSignUpRequest::new("Kim", "short", "nope", "123"))
        .is_err());

    let waited = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
    assert!(waited.is_err(), "no event should be published for rejected writes");
}
