//! In-memory implementation of the `MessageRepository` trait.

use async_trait::async_trait;
use tokio::sync::RwLock;

use studychat_core::error::DomainError;
use studychat_core::message::Message;
use studychat_core::repository::MessageRepository;

/// Message read store kept in process memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryMessageRepository {
    messages: RwLock<Vec<Message>>,
}

impl InMemoryMessageRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn save(&self, message: Message) -> Result<Message, DomainError> {
        self.messages.write().await.push(message.clone());
        Ok(message)
    }

    async fn find_all(&self) -> Result<Vec<Message>, DomainError> {
        Ok(self.messages.read().await.clone())
    }
}
