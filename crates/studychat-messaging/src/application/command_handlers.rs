//! Command handlers for the Messaging context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: validate the command, derive its events, record
//! them through the event store.

use studychat_core::clock::Clock;
use studychat_core::command::Command;
use studychat_core::error::DomainError;
use studychat_core::event::StoredEvent;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::application::event_store::ChatEventStore;
use crate::domain::commands::PostMessage;
use crate::domain::events::ChatEvent;
use crate::domain::mentions::extract_mentions;

/// Handles the `PostMessage` command: records a `MessagePosted` event and one
/// `Mention` event per distinct `@user` in the content, in that order.
///
/// All events share the command's correlation ID and a fresh entity ID.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the command is invalid, or the first
/// error returned by the event store. Events recorded before a failure stay
/// recorded.
#[instrument(
    skip(command, clock, store),
    fields(
        command = command.command_type(),
        cmd_uuid = %command.correlation_id,
        user_id = %command.issued_by()
    )
)]
pub async fn handle_post_message(
    command: &PostMessage,
    clock: &dyn Clock,
    store: &ChatEventStore,
) -> Result<Vec<StoredEvent>, DomainError> {
    command.validate()?;

    let entity_id = Uuid::new_v4();
    let mut events = vec![ChatEvent::message_posted(
        command.correlation_id,
        entity_id,
        &command.user_id,
        &command.content,
        clock,
    )];
    for mentioned in extract_mentions(&command.content) {
        debug!(mentioned_user = %mentioned, "message mentions user");
        events.push(ChatEvent::mention(
            command.correlation_id,
            entity_id,
            &command.user_id,
            &mentioned,
            clock,
        ));
    }

    let mut stored_events = Vec::with_capacity(events.len());
    for event in &events {
        stored_events.push(store.append(event).await?);
    }
    Ok(stored_events)
}
