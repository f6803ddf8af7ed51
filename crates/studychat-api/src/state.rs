//! Shared application state.

use std::fmt;
use std::sync::Arc;

use studychat_core::clock::Clock;
use studychat_event_store::{InMemoryEventLog, InMemoryMessageRepository, InProcessTransport};
use studychat_messaging::application::event_store::ChatEventStore;
use studychat_messaging::application::publisher::EventPublisher;

use crate::config::AppConfig;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock used to stamp new events.
    pub clock: Arc<dyn Clock>,
    /// The chat event store (log, read store and publisher).
    pub event_store: Arc<ChatEventStore>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, event_store: Arc<ChatEventStore>) -> Self {
        Self { clock, event_store }
    }

    /// Create state backed by the in-memory log, read store and transport.
    #[must_use]
    pub fn in_memory(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        let event_store = ChatEventStore::new(
            Arc::new(InMemoryEventLog::with_cursor_policy(config.cursor_policy)),
            Arc::new(InMemoryMessageRepository::new()),
            EventPublisher::new(Arc::new(InProcessTransport::new()), config.topic.clone()),
            Arc::clone(&clock),
        );
        Self::new(clock, Arc::new(event_store))
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("event_store", &self.event_store)
            .finish_non_exhaustive()
    }
}
