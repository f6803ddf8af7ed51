//! The chat event store: the single write path for domain events.
//!
//! Recording an event runs, under one writer lock:
//! duplicate check, read-model projection (message-posted events only),
//! log append, publish. A failed projection leaves the log untouched; a
//! failed publish leaves the append and the projection in place.

use std::fmt;
use std::sync::Arc;

use studychat_core::clock::Clock;
use studychat_core::error::DomainError;
use studychat_core::event::{DomainEvent, StoredEvent};
use studychat_core::message::Message;
use studychat_core::repository::{EventLog, MessageRepository};
use tokio::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::publisher::EventPublisher;
use crate::domain::events::{ChatEvent, ChatEventKind};
use crate::domain::projection;

/// Event store for the Messaging context.
pub struct ChatEventStore {
    log: Arc<dyn EventLog>,
    messages: Arc<dyn MessageRepository>,
    publisher: EventPublisher,
    clock: Arc<dyn Clock>,
    /// Serializes the write path so publish order equals append order.
    writer: Mutex<()>,
}

impl ChatEventStore {
    /// Create a store over the given log, read store and publisher. `clock`
    /// stamps projected messages.
    #[must_use]
    pub fn new(
        log: Arc<dyn EventLog>,
        messages: Arc<dyn MessageRepository>,
        publisher: EventPublisher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            log,
            messages,
            publisher,
            clock,
            writer: Mutex::new(()),
        }
    }

    /// Returns the publisher used for fan-out.
    #[must_use]
    pub fn publisher(&self) -> &EventPublisher {
        &self.publisher
    }

    /// Records `event`: projects it, appends it to the log and publishes it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DuplicateEvent` if the event ID was recorded
    /// before and `DomainError::PersistenceError` if the projected message
    /// could not be saved. Publish failures are not errors.
    #[instrument(
        skip_all,
        fields(event_id = %event.metadata.event_id, event_type = event.event_type())
    )]
    pub async fn append(&self, event: &ChatEvent) -> Result<StoredEvent, DomainError> {
        let _writer = self.writer.lock().await;

        let event_id = event.metadata.event_id;
        if self.log.contains(event_id).await {
            return Err(DomainError::DuplicateEvent(event_id));
        }

        match &event.kind {
            ChatEventKind::MessagePosted(posted) => {
                let message = projection::project(&event.metadata, posted, self.clock.as_ref());
                self.messages.save(message).await?;
            }
            ChatEventKind::Mention(_) => {}
        }

        let stored = self.log.append(StoredEvent::from_domain_event(event)).await?;
        let published = self.publisher.publish(&stored).await;

        info!(sequence = stored.sequence_number, published, "event recorded");
        Ok(stored)
    }

    /// Returns the events recorded after `cursor`, or all of them.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CursorNotFound` for an unknown cursor if the log
    /// is strict.
    pub async fn events_since(&self, cursor: Option<Uuid>) -> Result<Vec<StoredEvent>, DomainError> {
        self.log.events_since(cursor).await
    }

    /// Returns every persisted message.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PersistenceError` if the read store fails.
    pub async fn messages(&self) -> Result<Vec<Message>, DomainError> {
        self.messages.find_all().await
    }
}

impl fmt::Debug for ChatEventStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatEventStore")
            .field("publisher", &self.publisher)
            .finish_non_exhaustive()
    }
}
