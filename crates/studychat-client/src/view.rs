//! Viewer-side handlers for dispatched events.

use studychat_core::message::Message;
use uuid::Uuid;

/// A notice that the viewer was mentioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionNotification {
    /// The user whose message mentioned the viewer.
    pub mentioned_by: String,
    /// The mention event.
    pub event_id: Uuid,
    /// The entity (message) the mention belongs to.
    pub entity_id: Uuid,
}

impl MentionNotification {
    /// Text shown to the viewer.
    #[must_use]
    pub fn text(&self) -> String {
        format!("You were mentioned in a message from {}", self.mentioned_by)
    }
}

/// Typed handlers the dispatcher routes events to.
pub trait ViewHandler {
    /// A message was posted; `message` is its display form.
    fn on_message(&mut self, message: Message);

    /// The viewer was mentioned.
    fn on_mention(&mut self, notification: MentionNotification);
}

/// In-memory view state of one viewer: the visible message list and the
/// notifications raised so far.
#[derive(Debug, Default, Clone)]
pub struct ChatView {
    messages: Vec<Message>,
    notifications: Vec<MentionNotification>,
}

impl ChatView {
    /// Creates an empty view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Notifications raised for the viewer, oldest first.
    #[must_use]
    pub fn notifications(&self) -> &[MentionNotification] {
        &self.notifications
    }
}

impl ViewHandler for ChatView {
    fn on_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    fn on_mention(&mut self, notification: MentionNotification) {
        self.notifications.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_text_names_the_sender() {
        let notification = MentionNotification {
            mentioned_by: "alice".to_owned(),
            event_id: Uuid::new_v4(),
            entity_id: Uuid::new_v4(),
        };

        assert_eq!(
            notification.text(),
            "You were mentioned in a message from alice"
        );
    }
}
