//! Client-side event dispatcher.
//!
//! Events reach a client twice over: once from the catch-up query and once
//! from the live transport. The dispatcher drops anything at or below the
//! last sequence it processed, decodes the rest and routes each variant to
//! its handler.

use std::fmt;
use std::sync::Arc;

use studychat_core::clock::Clock;
use studychat_core::error::DomainError;
use studychat_core::event::StoredEvent;
use studychat_messaging::domain::events::{ChatEvent, ChatEventKind};
use studychat_messaging::domain::projection;
use tracing::trace;
use uuid::Uuid;

use crate::view::{MentionNotification, ViewHandler};

/// Routes events to a viewer's handlers and tracks the viewer's cursor.
pub struct EventDispatcher {
    viewer_id: String,
    clock: Arc<dyn Clock>,
    cursor: Option<Uuid>,
    last_sequence: i64,
}

impl EventDispatcher {
    /// Creates a dispatcher for `viewer_id` that has seen nothing yet.
    /// `clock` stamps the display form of posted messages.
    #[must_use]
    pub fn new(viewer_id: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            viewer_id: viewer_id.into(),
            clock,
            cursor: None,
            last_sequence: 0,
        }
    }

    /// The viewer this dispatcher routes for.
    #[must_use]
    pub fn viewer_id(&self) -> &str {
        &self.viewer_id
    }

    /// ID of the last processed event, if any.
    #[must_use]
    pub fn cursor(&self) -> Option<Uuid> {
        self.cursor
    }

    /// Log sequence of the last processed event, 0 before the first one.
    #[must_use]
    pub fn last_sequence(&self) -> i64 {
        self.last_sequence
    }

    /// Forgets the processed position so the next batch is read as the
    /// start of a log. Used when the source no longer recognises the cursor.
    pub fn reset_position(&mut self) {
        self.cursor = None;
        self.last_sequence = 0;
    }

    /// Dispatches an ordered batch of log events and returns how many were
    /// processed (as opposed to skipped as already seen).
    ///
    /// The cursor moves to each event as it is processed, so after an error
    /// it names the last event that made it to a handler.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnsupportedEventVariant` for an event whose type
    /// no handler knows, and `DomainError::Infrastructure` for a payload that
    /// does not decode. Dispatch stops at the failing event.
    pub fn dispatch(
        &mut self,
        events: &[StoredEvent],
        handler: &mut dyn ViewHandler,
    ) -> Result<usize, DomainError> {
        let mut processed = 0;
        for stored in events {
            if stored.sequence_number <= self.last_sequence {
                trace!(
                    event_id = %stored.event_id,
                    sequence = stored.sequence_number,
                    "skipping already processed event"
                );
                continue;
            }

            let event = ChatEvent::try_from(stored)?;
            match &event.kind {
                ChatEventKind::MessagePosted(posted) => {
                    handler.on_message(projection::project(
                        &event.metadata,
                        posted,
                        self.clock.as_ref(),
                    ));
                }
                ChatEventKind::Mention(mention) => {
                    if mention.mentioned_user == self.viewer_id {
                        handler.on_mention(MentionNotification {
                            mentioned_by: event.metadata.user_id.clone(),
                            event_id: event.metadata.event_id,
                            entity_id: event.metadata.entity_id,
                        });
                    }
                }
            }

            self.last_sequence = stored.sequence_number;
            self.cursor = Some(stored.event_id);
            processed += 1;
        }
        Ok(processed)
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("viewer_id", &self.viewer_id)
            .field("cursor", &self.cursor)
            .field("last_sequence", &self.last_sequence)
            .finish_non_exhaustive()
    }
}
