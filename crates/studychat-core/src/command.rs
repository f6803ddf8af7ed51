//! Command abstractions.

use uuid::Uuid;

/// Trait that all commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// The command UUID. Every event produced while handling the command
    /// carries it as its correlation ID.
    fn correlation_id(&self) -> Uuid;

    /// The user that issued the command.
    fn issued_by(&self) -> &str;
}
