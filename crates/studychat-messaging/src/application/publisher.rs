//! Event publisher: hands recorded events to the transport.

use std::fmt;
use std::sync::Arc;

use studychat_core::event::StoredEvent;
use studychat_core::transport::EventTransport;
use tracing::{debug, warn};

/// Publishes recorded events on a single transport topic.
///
/// Publishing is best effort. A transport failure is logged and reported to
/// the caller as `false`; it is never turned into an error on the write path.
#[derive(Clone)]
pub struct EventPublisher {
    transport: Arc<dyn EventTransport>,
    topic: String,
}

impl EventPublisher {
    /// Create a publisher for `topic`.
    #[must_use]
    pub fn new(transport: Arc<dyn EventTransport>, topic: impl Into<String>) -> Self {
        Self {
            transport,
            topic: topic.into(),
        }
    }

    /// Returns the topic events are published on.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Returns the underlying transport, for subscribers.
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn EventTransport> {
        &self.transport
    }

    /// Hands `event` to the transport. Returns `true` if the transport
    /// accepted it.
    pub async fn publish(&self, event: &StoredEvent) -> bool {
        match self.transport.publish(&self.topic, event).await {
            Ok(subscribers) => {
                debug!(
                    event_id = %event.event_id,
                    topic = %self.topic,
                    subscribers,
                    "event published"
                );
                true
            }
            Err(error) => {
                warn!(
                    event_id = %event.event_id,
                    topic = %self.topic,
                    %error,
                    "event publish failed, live subscribers will miss it until their next catch-up"
                );
                false
            }
        }
    }
}

impl fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPublisher")
            .field("topic", &self.topic)
            .finish_non_exhaustive()
    }
}
