//! Event log and read-store abstractions.

use std::str::FromStr;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;
use crate::event::StoredEvent;
use crate::message::Message;

/// How the event log treats a catch-up cursor that names no logged event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorPolicy {
    /// An unknown cursor is treated as no cursor: the whole log is returned.
    #[default]
    Lenient,
    /// An unknown cursor fails with `DomainError::CursorNotFound`.
    Strict,
}

impl FromStr for CursorPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(DomainError::Validation(format!(
                "unknown cursor policy '{other}', expected 'lenient' or 'strict'"
            ))),
        }
    }
}

/// Append-only, ordered log of domain events.
///
/// Appends are serialized; reads return a snapshot of the log as of the call.
#[async_trait]
pub trait EventLog: Send + Sync {
    /// Appends an event at the end of the log and returns it with its
    /// assigned 1-based sequence number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DuplicateEvent` if an event with the same ID
    /// is already in the log.
    async fn append(&self, event: StoredEvent) -> Result<StoredEvent, DomainError>;

    /// Returns every event strictly after `cursor`, or the whole log when
    /// `cursor` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CursorNotFound` for an unknown cursor when the
    /// log runs with `CursorPolicy::Strict`.
    async fn events_since(&self, cursor: Option<Uuid>) -> Result<Vec<StoredEvent>, DomainError>;

    /// Returns `true` if an event with this ID has been appended.
    async fn contains(&self, event_id: Uuid) -> bool;
}

/// The external message persistence provider.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persists a projected message and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PersistenceError` if the write is rejected.
    async fn save(&self, message: Message) -> Result<Message, DomainError>;

    /// Returns every persisted message in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PersistenceError` if the read fails.
    async fn find_all(&self) -> Result<Vec<Message>, DomainError>;
}
