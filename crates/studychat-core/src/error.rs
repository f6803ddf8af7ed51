//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A catch-up cursor names an event that is not in the log.
    #[error("cursor not found: {0}")]
    CursorNotFound(Uuid),

    /// An event with this identifier has already been appended.
    #[error("duplicate event: {0}")]
    DuplicateEvent(Uuid),

    /// The message persistence provider rejected a read or a write.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Publishing to or subscribing on the event transport failed.
    #[error("transport error: {0}")]
    TransportError(String),

    /// An event carried a type tag that no handler knows.
    #[error("unsupported event variant: {0}")]
    UnsupportedEventVariant(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure error (serialization, timeouts).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
