//! Test repositories: mock `MessageRepository` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use studychat_core::error::DomainError;
use studychat_core::message::Message;
use studychat_core::repository::MessageRepository;

/// A message repository that records every saved message and returns them
/// from `find_all`.
#[derive(Debug, Default)]
pub struct RecordingMessageRepository {
    saved: Mutex<Vec<Message>>,
}

impl RecordingMessageRepository {
    /// Create an empty recording repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all messages that were saved.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved_messages(&self) -> Vec<Message> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageRepository for RecordingMessageRepository {
    async fn save(&self, message: Message) -> Result<Message, DomainError> {
        self.saved.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn find_all(&self) -> Result<Vec<Message>, DomainError> {
        Ok(self.saved.lock().unwrap().clone())
    }
}

/// A message repository that rejects every call with a persistence error.
/// Useful for testing error-handling paths.
#[derive(Debug)]
pub struct FailingMessageRepository;

#[async_trait]
impl MessageRepository for FailingMessageRepository {
    async fn save(&self, _message: Message) -> Result<Message, DomainError> {
        Err(DomainError::PersistenceError("connection refused".into()))
    }

    async fn find_all(&self) -> Result<Vec<Message>, DomainError> {
        Err(DomainError::PersistenceError("connection refused".into()))
    }
}
