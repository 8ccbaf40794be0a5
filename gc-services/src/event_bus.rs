//! Typed event bus for intra-service communication.
//!
//! Uses tokio broadcast channels to decouple services from one another.
//! Any service can emit events without knowing who is listening, and any
//! number of subscribers can independently consume events.

use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

/// Domain state changes published after a write commits.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A member signed up.
    MemberSignedUp {
        member_id: i64,
    },
    /// A member withdrew (soft delete).
    MemberWithdrawn {
        member_id: i64,
    },
    /// An expert registered.
    ExpertRegistered {
        expert_id: i64,
    },
    /// An expert changed their profile.
    ExpertUpdated {
        expert_id: i64,
    },
    /// An expert was removed.
    ExpertRemoved {
        expert_id: i64,
    },
    /// The category taxonomy changed.
    CatalogChanged {
        main_item_id: i64,
    },
    /// A member requested an estimate.
    EstimateRequested {
        member_estimate_id: i64,
        member_id: i64,
        sub_item_id: i64,
    },
    /// A member estimate and its responses were removed.
    EstimateWithdrawn {
        member_estimate_id: i64,
    },
    /// An expert answered an estimate with a price.
    EstimateAnswered {
        response_id: i64,
        expert_id: i64,
        member_estimate_id: i64,
    },
    /// An expert response was repriced.
    EstimateResponseUpdated {
        response_id: i64,
    },
    /// An expert response was removed.
    EstimateResponseRemoved {
        response_id: i64,
    },
    /// A member added an expert to their bucket.
    BucketAdded {
        bucket_id: i64,
        expert_id: i64,
        member_id: i64,
    },
    /// A bucket entry was removed.
    BucketRemoved {
        bucket_id: i64,
    },
    /// A review was written.
    ReviewPosted {
        review_id: i64,
        expert_id: i64,
        rating: i64,
    },
    /// A review's content or rating changed.
    ReviewEdited {
        review_id: i64,
        rating: i64,
    },
    /// A review (and its reply) was soft deleted.
    ReviewRemoved {
        review_id: i64,
    },
    /// An expert replied to a review.
    ReplyPosted {
        reply_id: i64,
        review_id: i64,
    },
    /// A reply was rewritten.
    ReplyEdited {
        reply_id: i64,
        review_id: i64,
    },
    /// A reply was soft deleted.
    ReplyRemoved {
        reply_id: i64,
    },
}

/// Application-wide event bus backed by a tokio broadcast channel.
///
/// Designed for fan-out delivery: every subscriber gets every event.
/// Slow subscribers that fall behind will receive a `Lagged` error
/// and may miss events.
#[derive(Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<AppEvent>>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Subscribe to receive application events.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers.
    pub fn emit(&self, event: AppEvent) {
        let label = event_label(&event);
        match self.sender.send(event) {
            Ok(count) => {
                debug!("event_bus: emitted {label} to {count} subscriber(s)");
            }
            Err(_) => {
                debug!("event_bus: no subscribers for {label}");
            }
        }
    }
}

/// Human-readable label for an event (for logging).
pub fn event_label(event: &AppEvent) -> &'static str {
    match event {
        AppEvent::MemberSignedUp { .. } => "MemberSignedUp",
        AppEvent::MemberWithdrawn { .. } => "MemberWithdrawn",
        AppEvent::ExpertRegistered { .. } => "ExpertRegistered",
        AppEvent::ExpertUpdated { .. } => "ExpertUpdated",
        AppEvent::ExpertRemoved { .. } => "ExpertRemoved",
        AppEvent::CatalogChanged { .. } => "CatalogChanged",
        AppEvent::EstimateRequested { .. } => "EstimateRequested",
        AppEvent::EstimateWithdrawn { .. } => "EstimateWithdrawn",
        AppEvent::EstimateAnswered { .. } => "EstimateAnswered",
        AppEvent::EstimateResponseUpdated { .. } => "EstimateResponseUpdated",
        AppEvent::EstimateResponseRemoved { .. } => "EstimateResponseRemoved",
        AppEvent::BucketAdded { .. } => "BucketAdded",
        AppEvent::BucketRemoved { .. } => "BucketRemoved",
        AppEvent::ReviewPosted { .. } => "ReviewPosted",
        AppEvent::ReviewEdited { .. } => "ReviewEdited",
        AppEvent::ReviewRemoved { .. } => "ReviewRemoved",
        AppEvent::ReplyPosted { .. } => "ReplyPosted",
        AppEvent::ReplyEdited { .. } => "ReplyEdited",
        AppEvent::ReplyRemoved { .. } => "ReplyRemoved",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_emit_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.emit(AppEvent::BucketRemoved { bucket_id: 7 });

        let event = rx.recv().await.unwrap();
        assert_eq!(event, AppEvent::BucketRemoved { bucket_id: 7 });
    }

    #[tokio::test]
    async fn test_event_bus_multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();


        bus.emit(AppEvent::MemberSignedUp { member_id: 42 });

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1, e2);
    }

    #[tokio::test]
    async fn test_event_bus_no_subscribers() {
        let bus = EventBus::new(16);
        // Should not panic even with no subscribers
        bus.emit(AppEvent::CatalogChanged { main_item_id: 1 });
    }

    #[test]
    fn test_event_labels() {
        assert_eq!(
            event_label(&AppEvent::EstimateAnswered {
                response_id: 1,
                expert_id: 1,
                member_estimate_id: 1,
            }),
            "EstimateAnswered"
        );
        assert_eq!(event_label(&AppEvent::ReplyRemoved { reply_id: 1 }), "ReplyRemoved");
    }
}
