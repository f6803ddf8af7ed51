//! Message read model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A posted chat message as persisted by the read store.
///
/// Derived exactly once from a message-posted event and never mutated
/// afterwards. Mentions have no read-model counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message text.
    pub content: String,
    /// When the message was projected.
    pub created: DateTime<Utc>,
    /// User that posted the message.
    pub sender_user_id: String,
    /// UUID of the command that posted the message.
    pub cmd_uuid: Uuid,
    /// UUID of the message-posted event.
    pub event_uuid: Uuid,
    /// Entity the message belongs to.
    pub entity_id: Uuid,
}
