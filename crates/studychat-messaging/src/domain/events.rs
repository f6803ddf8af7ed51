//! Domain events for the Messaging context.

use serde::{Deserialize, Serialize};
use studychat_core::clock::Clock;
use studychat_core::error::DomainError;
use studychat_core::event::{DomainEvent, EventMetadata, StoredEvent};
use uuid::Uuid;

/// Type name of [`ChatEventKind::MessagePosted`] events.
pub const MESSAGE_POSTED: &str = "chat.message_posted";

/// Type name of [`ChatEventKind::Mention`] events.
pub const MENTION: &str = "chat.mention";

/// Emitted when a user posts a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePosted {
    /// The message text.
    pub content: String,
}

/// Emitted when a posted message mentions a user. Transient: never
/// projected into the read store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// The user that was mentioned.
    pub mentioned_user: String,
}

/// Event payload variants for the Messaging context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEventKind {
    /// A message was posted.
    MessagePosted(MessagePosted),
    /// A user was mentioned.
    Mention(Mention),
}

/// Domain event envelope for the Messaging context.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ChatEventKind,
}

impl ChatEvent {
    fn new(
        correlation_id: Uuid,
        entity_id: Uuid,
        user_id: &str,
        kind: ChatEventKind,
        clock: &dyn Clock,
    ) -> Self {
        let event_type = match &kind {
            ChatEventKind::MessagePosted(_) => MESSAGE_POSTED,
            ChatEventKind::Mention(_) => MENTION,
        };
        Self {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: event_type.to_owned(),
                correlation_id,
                entity_id,
                user_id: user_id.to_owned(),
                occurred_at: clock.now(),
            },
            kind,
        }
    }

    /// Creates a `MessagePosted` event with a fresh event ID.
    #[must_use]
    pub fn message_posted(
        correlation_id: Uuid,
        entity_id: Uuid,
        user_id: &str,
        content: &str,
        clock: &dyn Clock,
    ) -> Self {
        let kind = ChatEventKind::MessagePosted(MessagePosted {
            content: content.to_owned(),
        });
        Self::new(correlation_id, entity_id, user_id, kind, clock)
    }

    /// Creates a `Mention` event with a fresh event ID.
    #[must_use]
    pub fn mention(
        correlation_id: Uuid,
        entity_id: Uuid,
        user_id: &str,
        mentioned_user: &str,
        clock: &dyn Clock,
    ) -> Self {
        let kind = ChatEventKind::Mention(Mention {
            mentioned_user: mentioned_user.to_owned(),
        });
        Self::new(correlation_id, entity_id, user_id, kind, clock)
    }
}

impl DomainEvent for ChatEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            ChatEventKind::MessagePosted(_) => MESSAGE_POSTED,
            ChatEventKind::Mention(_) => MENTION,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        match &self.kind {
            ChatEventKind::MessagePosted(payload) => serde_json::to_value(payload),
            ChatEventKind::Mention(payload) => serde_json::to_value(payload),
        }
        .expect("ChatEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

impl TryFrom<&StoredEvent> for ChatEvent {
    type Error = DomainError;

    /// Decodes a stored event by its type tag.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnsupportedEventVariant` for an unknown type tag
    /// and `DomainError::Infrastructure` if the payload does not match it.
    fn try_from(stored: &StoredEvent) -> Result<Self, Self::Error> {
        let decode_error = |e: serde_json::Error| {
            DomainError::Infrastructure(format!("event deserialization failed: {e}"))
        };
        let kind = match stored.event_type.as_str() {
            MESSAGE_POSTED => ChatEventKind::MessagePosted(
                serde_json::from_value(stored.payload.clone()).map_err(decode_error)?,
            ),
            MENTION => ChatEventKind::Mention(
                serde_json::from_value(stored.payload.clone()).map_err(decode_error)?,
            ),
            other => return Err(DomainError::UnsupportedEventVariant(other.to_owned())),
        };
        Ok(Self {
            metadata: stored.metadata(),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use studychat_test_support::FixedClock;

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    #[test]
    fn test_message_posted_populates_metadata() {
        // Arrange
        let correlation_id = Uuid::new_v4();
        let entity_id = Uuid::new_v4();
        let clock = fixed_clock();

        // Act
        let event = ChatEvent::message_posted(correlation_id, entity_id, "alice", "hi", &clock);

        // Assert
        assert_eq!(event.event_type(), MESSAGE_POSTED);
        let meta = event.metadata();
        assert_eq!(meta.event_type, MESSAGE_POSTED);
        assert_eq!(meta.correlation_id, correlation_id);
        assert_eq!(meta.entity_id, entity_id);
        assert_eq!(meta.user_id, "alice");
        assert_eq!(meta.occurred_at, clock.0);
        assert_eq!(
            event.kind,
            ChatEventKind::MessagePosted(MessagePosted {
                content: "hi".to_owned()
            })
        );
    }

    #[test]
    fn test_each_event_gets_a_fresh_id() {
        let clock = fixed_clock();
        let correlation_id = Uuid::new_v4();
        let entity_id = Uuid::new_v4();

        let first = ChatEvent::mention(correlation_id, entity_id, "alice", "bob", &clock);
        let second = ChatEvent::mention(correlation_id, entity_id, "alice", "bob", &clock);

        assert_ne!(first.metadata.event_id, second.metadata.event_id);
    }

    #[test]
    fn test_mention_payload_serializes_mentioned_user() {
        let event =
            ChatEvent::mention(Uuid::new_v4(), Uuid::new_v4(), "alice", "bob", &fixed_clock());

        let payload = event.to_payload();

        assert_eq!(event.event_type(), MENTION);
        assert_eq!(payload, serde_json::json!({ "mentioned_user": "bob" }));
    }

    #[test]
    fn test_try_from_stored_event_decodes_known_variants() {
        // Arrange
        let clock = fixed_clock();
        let posted =
            ChatEvent::message_posted(Uuid::new_v4(), Uuid::new_v4(), "alice", "hi", &clock);
        let mention = ChatEvent::mention(Uuid::new_v4(), Uuid::new_v4(), "alice", "bob", &clock);

        // Act
        let decoded_posted = ChatEvent::try_from(&StoredEvent::from_domain_event(&posted)).unwrap();
        let decoded_mention =
            ChatEvent::try_from(&StoredEvent::from_domain_event(&mention)).unwrap();

        // Assert
        assert_eq!(decoded_posted, posted);
        assert_eq!(decoded_mention, mention);
    }

    #[test]
    fn test_try_from_unknown_type_returns_unsupported_event_variant() {
        // Arrange
        let mut stored = StoredEvent::from_domain_event(&ChatEvent::message_posted(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "alice",
            "hi",
            &fixed_clock(),
        ));
        stored.event_type = "chat.reaction_added".to_owned();

        // Act
        let result = ChatEvent::try_from(&stored);

        // Assert
        match result {
            Err(DomainError::UnsupportedEventVariant(tag)) => {
                assert_eq!(tag, "chat.reaction_added");
            }
            other => panic!("expected UnsupportedEventVariant, got {other:?}"),
        }
    }

    #[test]
    fn test_try_from_malformed_payload_returns_infrastructure_error() {
        let mut stored = StoredEvent::from_domain_event(&ChatEvent::mention(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "alice",
            "bob",
            &fixed_clock(),
        ));
        stored.payload = serde_json::json!({ "unexpected": true });

        let result = ChatEvent::try_from(&stored);

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
