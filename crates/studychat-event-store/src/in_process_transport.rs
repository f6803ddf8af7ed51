//! In-process implementation of the `EventTransport` trait.
//!
//! Each subscriber owns an unbounded queue, so publishing never waits on a
//! slow reader. Subscribers whose handle was dropped are pruned on the next
//! publish to their topic.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

use studychat_core::error::DomainError;
use studychat_core::event::StoredEvent;
use studychat_core::transport::{EventTransport, Subscription, SubscriptionId};

type Subscribers = HashMap<SubscriptionId, mpsc::UnboundedSender<StoredEvent>>;

/// Topic-based fan-out within a single process.
#[derive(Debug, Default)]
pub struct InProcessTransport {
    topics: Mutex<HashMap<String, Subscribers>>,
    next_id: AtomicU64,
}

impl InProcessTransport {
    /// Creates a transport with no topics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live subscribers registered on `topic`.
    pub async fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.lock().await.get(topic).map_or(0, HashMap::len)
    }
}

#[async_trait]
impl EventTransport for InProcessTransport {
    async fn publish(&self, topic: &str, event: &StoredEvent) -> Result<usize, DomainError> {
        let mut topics = self.topics.lock().await;
        let Some(subscribers) = topics.get_mut(topic) else {
            return Ok(0);
        };

        subscribers.retain(|id, sender| {
            let delivered = sender.send(event.clone()).is_ok();
            if !delivered {
                debug!(subscription_id = id, topic, "pruning closed subscriber");
            }
            delivered
        });
        Ok(subscribers.len())
    }

    async fn subscribe(&self, topic: &str) -> Result<Subscription, DomainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded_channel();
        self.topics
            .lock()
            .await
            .entry(topic.to_owned())
            .or_default()
            .insert(id, sender);

        debug!(subscription_id = id, topic, "subscriber registered");
        Ok(Subscription::new(id, topic, receiver))
    }

    async fn unsubscribe(&self, subscription: Subscription) -> Result<(), DomainError> {
        let mut topics = self.topics.lock().await;
        let topic = subscription.topic();
        if let Some(subscribers) = topics.get_mut(topic) {
            subscribers.remove(&subscription.id());
            if subscribers.is_empty() {
                topics.remove(topic);
            }
        }

        debug!(subscription_id = subscription.id(), "subscriber released");
        Ok(())
    }
}
