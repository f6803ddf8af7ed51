//! Message read-model projection.

use studychat_core::clock::Clock;
use studychat_core::event::EventMetadata;
use studychat_core::message::Message;

use super::events::MessagePosted;

/// Derives the read-model [`Message`] for a message-posted event.
///
/// `created` is the projection time read from `clock`, not the time the
/// event was emitted.
#[must_use]
pub fn project(metadata: &EventMetadata, posted: &MessagePosted, clock: &dyn Clock) -> Message {
    Message {
        content: posted.content.clone(),
        created: clock.now(),
        sender_user_id: metadata.user_id.clone(),
        cmd_uuid: metadata.correlation_id,
        event_uuid: metadata.event_id,
        entity_id: metadata.entity_id,
    }
}
