//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sequence number carried by an event that has not been appended yet.
pub const UNSEQUENCED: i64 = 0;

/// Metadata attached to every domain event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Type name for deserialization routing.
    pub event_type: String,
    /// UUID of the command that produced this event.
    pub correlation_id: Uuid,
    /// Entity the event is about (one per posted message).
    pub entity_id: Uuid,
    /// User that issued the originating command.
    pub user_id: String,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name (used for serialization routing).
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}

/// Stored and wire representation of a domain event.
///
/// This is the shape kept in the event log, handed to the transport and
/// returned by the catch-up query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEvent {
    /// Unique event identifier.
    #[serde(rename = "uuid")]
    pub event_id: Uuid,
    /// UUID of the originating command.
    #[serde(rename = "cmdUuid")]
    pub correlation_id: Uuid,
    /// Entity the event is about.
    pub entity_id: Uuid,
    /// User that issued the originating command.
    pub user_id: String,
    /// Timestamp of event creation.
    pub created: DateTime<Utc>,
    /// 1-based position in the event log, [`UNSEQUENCED`] before append.
    #[serde(rename = "sequence")]
    pub sequence_number: i64,
    /// Event type name for deserialization routing.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Serialized variant payload.
    pub payload: serde_json::Value,
}

impl StoredEvent {
    /// Builds the unsequenced stored form of a domain event.
    #[must_use]
    pub fn from_domain_event(event: &dyn DomainEvent) -> Self {
        let meta = event.metadata();
        Self {
            event_id: meta.event_id,
            correlation_id: meta.correlation_id,
            entity_id: meta.entity_id,
            user_id: meta.user_id.clone(),
            created: meta.occurred_at,
            sequence_number: UNSEQUENCED,
            event_type: event.event_type().to_owned(),
            payload: event.to_payload(),
        }
    }

    /// Rebuilds the metadata envelope from the stored fields.
    #[must_use]
    pub fn metadata(&self) -> EventMetadata {
        EventMetadata {
            event_id: self.event_id,
            event_type: self.event_type.clone(),
            correlation_id: self.correlation_id,
            entity_id: self.entity_id,
            user_id: self.user_id.clone(),
            occurred_at: self.created,
        }
    }
}
