//! Event transport abstraction: topic-based publish/subscribe.
//!
//! Delivery is at-most-once and best effort. A subscription is a handle to
//! a private queue of events published after it was registered.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::DomainError;
use crate::event::StoredEvent;

/// Identifier of a live subscription, unique per transport instance.
pub type SubscriptionId = u64;

/// Handle yielding the events delivered to one subscriber.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    topic: String,
    receiver: mpsc::UnboundedReceiver<StoredEvent>,
}

impl Subscription {
    /// Wraps the receiving end of a subscriber queue.
    #[must_use]
    pub fn new(
        id: SubscriptionId,
        topic: impl Into<String>,
        receiver: mpsc::UnboundedReceiver<StoredEvent>,
    ) -> Self {
        Self {
            id,
            topic: topic.into(),
            receiver,
        }
    }

    /// Returns the subscription identifier.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Returns the topic this subscription listens on.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Waits for the next delivered event. Returns `None` once the
    /// transport has dropped this subscriber.
    pub async fn recv(&mut self) -> Option<StoredEvent> {
        self.receiver.recv().await
    }

    /// Returns the next already-delivered event without waiting.
    pub fn try_recv(&mut self) -> Option<StoredEvent> {
        self.receiver.try_recv().ok()
    }

    /// Takes every event delivered so far, in delivery order.
    pub fn drain(&mut self) -> Vec<StoredEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }
}

/// The external event transport used for live fan-out.
#[async_trait]
pub trait EventTransport: Send + Sync {
    /// Delivers `event` to every current subscriber of `topic` and returns
    /// the number of subscribers it was handed to.
    ///
    /// Implementations must return without waiting for any subscriber to
    /// read. The chat write path publishes while holding its writer lock,
    /// so a publish that waits on a slow subscriber stalls every writer.
    /// Buffer per subscriber or hand off to a background task instead.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TransportError` if the event could not be handed
    /// to the transport.
    async fn publish(&self, topic: &str, event: &StoredEvent) -> Result<usize, DomainError>;

    /// Registers a new subscriber on `topic`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TransportError` if the subscriber could not be
    /// registered.
    async fn subscribe(&self, topic: &str) -> Result<Subscription, DomainError>;

    /// Removes a subscriber. Once this returns, nothing more is delivered to
    /// it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TransportError` if the transport failed to
    /// release the subscriber.
    async fn unsubscribe(&self, subscription: Subscription) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn stored(sequence_number: i64) -> StoredEvent {
        StoredEvent {
            event_id: Uuid::new_v4(),
            correlation_id: Uuid::new_v4(),
            entity_id: Uuid::new_v4(),
            user_id: "alice".to_owned(),
            created: Utc::now(),
            sequence_number,
            event_type: "chat.message_posted".to_owned(),
            payload: serde_json::json!({ "content": "hi" }),
        }
    }

    #[test]
    fn test_drain_returns_delivered_events_in_order() {
        // Arrange
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut subscription = Subscription::new(7, "chat", receiver);
        sender.send(stored(1)).unwrap();
        sender.send(stored(2)).unwrap();

        // Act
        let drained = subscription.drain();

        // Assert
        assert_eq!(subscription.id(), 7);
        assert_eq!(subscription.topic(), "chat");
        let sequences: Vec<i64> = drained.iter().map(|e| e.sequence_number).collect();
        assert_eq!(sequences, vec![1, 2]);
        assert!(subscription.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_recv_returns_none_after_sender_dropped() {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut subscription = Subscription::new(1, "chat", receiver);
        drop(sender);

        assert!(subscription.recv().await.is_none());
    }
}
