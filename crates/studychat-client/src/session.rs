//! Client session: catch-up followed by live delivery.
//!
//! Attaching registers the live subscription *before* reading the backlog,
//! so an event published while the backlog is being read ends up in the
//! subscription queue. The dispatcher drops whatever the backlog already
//! covered when that queue is drained.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use studychat_core::clock::Clock;
use studychat_core::error::DomainError;
use studychat_core::event::StoredEvent;
use studychat_core::transport::{EventTransport, Subscription};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::catch_up::{self, CatchUpSource};
use crate::dispatcher::EventDispatcher;
use crate::view::ChatView;

/// Lifecycle of a client session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No live subscription is held.
    NotAttached,
    /// Subscribed; the backlog is being fetched and dispatched.
    CatchingUp,
    /// Subscribed and caught up; events arrive through the subscription.
    Live,
}

/// Tuning for the backlog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Time allowed for one backlog fetch.
    pub catch_up_timeout: Duration,
    /// Total fetch attempts before attaching fails.
    pub catch_up_attempts: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            catch_up_timeout: Duration::from_secs(5),
            catch_up_attempts: 3,
        }
    }
}

/// One viewer's connection to the chat.
pub struct ChatSession {
    state: SessionState,
    dispatcher: EventDispatcher,
    view: ChatView,
    source: Arc<dyn CatchUpSource>,
    transport: Arc<dyn EventTransport>,
    topic: String,
    subscription: Option<Subscription>,
    config: SessionConfig,
}

impl ChatSession {
    /// Creates a detached session for `viewer_id`.
    #[must_use]
    pub fn new(
        viewer_id: impl Into<String>,
        source: Arc<dyn CatchUpSource>,
        transport: Arc<dyn EventTransport>,
        topic: impl Into<String>,
        clock: Arc<dyn Clock>,
        config: SessionConfig,
    ) -> Self {
        Self {
            state: SessionState::NotAttached,
            dispatcher: EventDispatcher::new(viewer_id, clock),
            view: ChatView::new(),
            source,
            transport,
            topic: topic.into(),
            subscription: None,
            config,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The viewer's message list and notifications.
    #[must_use]
    pub fn view(&self) -> &ChatView {
        &self.view
    }

    /// ID of the last event processed.
    #[must_use]
    pub fn cursor(&self) -> Option<Uuid> {
        self.dispatcher.cursor()
    }

    /// The viewer this session belongs to.
    #[must_use]
    pub fn viewer_id(&self) -> &str {
        self.dispatcher.viewer_id()
    }

    /// Subscribes to live updates, catches up on the backlog since the
    /// cursor and switches to live mode. Returns the number of events
    /// processed while catching up. Attaching an attached session does
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns the subscribe, fetch or dispatch error. The session is
    /// detached again before the error is returned.
    #[instrument(skip(self), fields(viewer = %self.dispatcher.viewer_id()))]
    pub async fn attach(&mut self) -> Result<usize, DomainError> {
        if self.state != SessionState::NotAttached {
            debug!(state = ?self.state, "session already attached");
            return Ok(0);
        }

        self.subscription = Some(self.transport.subscribe(&self.topic).await?);
        self.state = SessionState::CatchingUp;

        match self.catch_up().await {
            Ok(processed) => {
                self.state = SessionState::Live;
                info!(processed, cursor = ?self.dispatcher.cursor(), "session live");
                Ok(processed)
            }
            Err(err) => {
                error!(error = %err, "catch-up failed, detaching");
                self.release().await;
                Err(err)
            }
        }
    }

    async fn catch_up(&mut self) -> Result<usize, DomainError> {
        let cursor = self.dispatcher.cursor();
        let backlog = match self.fetch(cursor).await {
            Err(DomainError::CursorNotFound(unknown)) => {
                warn!(%unknown, "cursor rejected, catching up from the start of the log");
                self.dispatcher.reset_position();
                self.fetch(None).await?
            }
            other => other?,
        };

        // A suffix after the cursor starts past the last processed sequence.
        // Anything earlier means the source ignored the cursor and sent a
        // different log from its start.
        let restarted = cursor.is_some()
            && backlog
                .first()
                .is_some_and(|first| first.sequence_number <= self.dispatcher.last_sequence());
        if restarted {
            warn!(?cursor, "backlog restarts before the cursor, reading it from the start");
            self.dispatcher.reset_position();
        }

        let mut processed = self.dispatcher.dispatch(&backlog, &mut self.view)?;
        let buffered = self
            .subscription
            .as_mut()
            .map(Subscription::drain)
            .unwrap_or_default();
        processed += self.dispatcher.dispatch(&buffered, &mut self.view)?;
        Ok(processed)
    }

    async fn fetch(&self, cursor: Option<Uuid>) -> Result<Vec<StoredEvent>, DomainError> {
        catch_up::fetch_with_retry(
            self.source.as_ref(),
            cursor,
            self.config.catch_up_timeout,
            self.config.catch_up_attempts,
        )
        .await
    }

    /// Dispatches every live event already delivered, without waiting.
    /// Returns the number processed.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error; the session is detached first.
    pub async fn process_pending(&mut self) -> Result<usize, DomainError> {
        if self.state != SessionState::Live {
            return Ok(0);
        }
        let pending = self
            .subscription
            .as_mut()
            .map(Subscription::drain)
            .unwrap_or_default();
        self.dispatch_live(&pending).await
    }

    /// Waits for the next live event and dispatches it. Returns `false` when
    /// the session is not live or the transport closed the subscription, in
    /// which case the session is detached.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error; the session is detached first.
    pub async fn next_event(&mut self) -> Result<bool, DomainError> {
        if self.state != SessionState::Live {
            return Ok(false);
        }
        let Some(subscription) = self.subscription.as_mut() else {
            return Ok(false);
        };

        let next = subscription.recv().await;
        match next {
            Some(event) => {
                self.dispatch_live(&[event]).await?;
                Ok(true)
            }
            None => {
                warn!("live subscription closed by transport");
                self.release().await;
                Ok(false)
            }
        }
    }

    async fn dispatch_live(&mut self, events: &[StoredEvent]) -> Result<usize, DomainError> {
        match self.dispatcher.dispatch(events, &mut self.view) {
            Ok(processed) => Ok(processed),
            Err(err) => {
                error!(error = %err, "live dispatch failed, detaching");
                self.release().await;
                Err(err)
            }
        }
    }

    /// Releases the live subscription. The session ends up `NotAttached`
    /// whatever the transport answers; a later `attach` catches up from the
    /// current cursor.
    ///
    /// # Errors
    ///
    /// Returns the transport's unsubscribe error after the session has been
    /// detached.
    #[instrument(skip(self), fields(viewer = %self.dispatcher.viewer_id()))]
    pub async fn detach(&mut self) -> Result<(), DomainError> {
        self.state = SessionState::NotAttached;
        match self.subscription.take() {
            Some(subscription) => self.transport.unsubscribe(subscription).await,
            None => Ok(()),
        }
    }

    async fn release(&mut self) {
        if let Err(err) = self.detach().await {
            warn!(error = %err, "unsubscribe failed while detaching");
        }
    }
}

impl fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSession")
            .field("state", &self.state)
            .field("dispatcher", &self.dispatcher)
            .field("topic", &self.topic)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
