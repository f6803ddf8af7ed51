//! Commands for the Messaging context.

use studychat_core::command::Command;
use studychat_core::error::DomainError;
use uuid::Uuid;

/// Command to post a chat message.
#[derive(Debug, Clone)]
pub struct PostMessage {
    /// The command UUID, used as correlation ID for every resulting event.
    pub correlation_id: Uuid,
    /// The posting user.
    pub user_id: String,
    /// The message text.
    pub content: String,
}

impl PostMessage {
    /// Checks that the command names a user and carries some text.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a blank user ID or blank content.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.user_id.trim().is_empty() {
            return Err(DomainError::Validation("user id must not be blank".into()));
        }
        if self.content.trim().is_empty() {
            return Err(DomainError::Validation(
                "message content must not be blank".into(),
            ));
        }
        Ok(())
    }
}

impl Command for PostMessage {
    fn command_type(&self) -> &'static str {
        "chat.post_message"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn issued_by(&self) -> &str {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(user_id: &str, content: &str) -> PostMessage {
        PostMessage {
            correlation_id: Uuid::new_v4(),
            user_id: user_id.to_owned(),
            content: content.to_owned(),
        }
    }

    #[test]
    fn test_validate_accepts_user_and_content() {
        assert!(command("alice", "hi").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_user_id() {
        let result = command("  ", "hi").validate();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_blank_content() {
        let result = command("alice", "\n").validate();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_command_trait_exposes_routing_fields() {
        let cmd = command("alice", "hi");

        assert_eq!(cmd.command_type(), "chat.post_message");
        assert_eq!(Command::correlation_id(&cmd), cmd.correlation_id);
        assert_eq!(cmd.issued_by(), "alice");
    }
}
