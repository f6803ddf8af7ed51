//! Query handlers for the Messaging context.
//!
//! This module contains query handlers that read the event log and the
//! message read store and return read-only view DTOs.

use serde::Serialize;
use studychat_core::error::DomainError;
use studychat_core::event::StoredEvent;
use studychat_core::message::Message;
use uuid::Uuid;

use crate::application::event_store::ChatEventStore;

/// Events recorded after a catch-up cursor.
#[derive(Debug, Serialize)]
pub struct EventListView {
    /// The events, in log order.
    pub events: Vec<StoredEvent>,
}

/// All persisted messages.
#[derive(Debug, Serialize)]
pub struct MessageListView {
    /// The messages, in insertion order.
    pub messages: Vec<Message>,
}

/// Retrieves every event strictly after `last_event`, or the whole log when
/// no cursor is given.
///
/// # Errors
///
/// Returns `DomainError::CursorNotFound` if the cursor is unknown and the log
/// runs with the strict cursor policy.
pub async fn get_events_since(
    last_event: Option<Uuid>,
    store: &ChatEventStore,
) -> Result<EventListView, DomainError> {
    let events = store.events_since(last_event).await?;
    Ok(EventListView { events })
}

/// Retrieves every persisted message.
///
/// # Errors
///
/// Returns `DomainError::PersistenceError` if the read store fails.
pub async fn get_all_messages(store: &ChatEventStore) -> Result<MessageListView, DomainError> {
    let messages = store.messages().await?;
    Ok(MessageListView { messages })
}
