//! In-memory implementation of the `EventLog` trait.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use studychat_core::error::DomainError;
use studychat_core::event::StoredEvent;
use studychat_core::repository::{CursorPolicy, EventLog};

#[derive(Debug, Default)]
struct LogState {
    events: Vec<StoredEvent>,
    /// Event ID to index in `events`. Positions never change once assigned.
    positions: HashMap<Uuid, usize>,
}

/// Event log kept in process memory.
///
/// Appends take the write lock, so log order is well defined. Readers clone
/// the requested suffix under the read lock and never observe a partially
/// applied append.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    state: RwLock<LogState>,
    cursor_policy: CursorPolicy,
}

impl InMemoryEventLog {
    /// Creates an empty log with the lenient cursor policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty log with the given cursor policy.
    #[must_use]
    pub fn with_cursor_policy(cursor_policy: CursorPolicy) -> Self {
        Self {
            state: RwLock::default(),
            cursor_policy,
        }
    }

    /// Returns the policy applied to unknown cursors.
    #[must_use]
    pub fn cursor_policy(&self) -> CursorPolicy {
        self.cursor_policy
    }

    /// Returns the number of events in the log.
    pub async fn len(&self) -> usize {
        self.state.read().await.events.len()
    }

    /// Returns `true` if nothing has been appended yet.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.events.is_empty()
    }
}

#[async_trait]
impl EventLog for InMemoryEventLog {
    async fn append(&self, mut event: StoredEvent) -> Result<StoredEvent, DomainError> {
        let mut state = self.state.write().await;
        if state.positions.contains_key(&event.event_id) {
            return Err(DomainError::DuplicateEvent(event.event_id));
        }

        let index = state.events.len();
        event.sequence_number = i64::try_from(index + 1)
            .map_err(|e| DomainError::Infrastructure(format!("event log overflow: {e}")))?;
        state.positions.insert(event.event_id, index);
        state.events.push(event.clone());

        debug!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            sequence = event.sequence_number,
            "appended event to log"
        );
        Ok(event)
    }

    async fn events_since(&self, cursor: Option<Uuid>) -> Result<Vec<StoredEvent>, DomainError> {
        let state = self.state.read().await;
        let Some(cursor) = cursor else {
            return Ok(state.events.clone());
        };

        match state.positions.get(&cursor) {
            Some(&index) => Ok(state.events[index + 1..].to_vec()),
            None => match self.cursor_policy {
                CursorPolicy::Lenient => {
                    warn!(%cursor, "unknown cursor, returning the full log");
                    Ok(state.events.clone())
                }
                CursorPolicy::Strict => Err(DomainError::CursorNotFound(cursor)),
            },
        }
    }

    async fn contains(&self, event_id: Uuid) -> bool {
        self.state.read().await.positions.contains_key(&event_id)
    }
}
