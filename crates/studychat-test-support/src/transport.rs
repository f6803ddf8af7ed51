//! Test transports: mock `EventTransport` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use studychat_core::error::DomainError;
use studychat_core::event::StoredEvent;
use studychat_core::transport::{EventTransport, Subscription};
use tokio::sync::mpsc;

/// A transport that records every published event and hands out
/// subscriptions that never receive anything.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    published: Mutex<Vec<(String, StoredEvent)>>,
    unsubscribed: Mutex<usize>,
}

impl RecordingTransport {
    /// Create an empty recording transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all `(topic, event)` pairs that were published.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn published_events(&self) -> Vec<(String, StoredEvent)> {
        self.published.lock().unwrap().clone()
    }

    /// Returns how many subscriptions were released.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn unsubscribe_count(&self) -> usize {
        *self.unsubscribed.lock().unwrap()
    }
}

#[async_trait]
impl EventTransport for RecordingTransport {
    async fn publish(&self, topic: &str, event: &StoredEvent) -> Result<usize, DomainError> {
        self.published
            .lock()
            .unwrap()
            .push((topic.to_owned(), event.clone()));
        Ok(0)
    }

    async fn subscribe(&self, topic: &str) -> Result<Subscription, DomainError> {
        let (_sender, receiver) = mpsc::unbounded_channel();
        Ok(Subscription::new(0, topic, receiver))
    }

    async fn unsubscribe(&self, _subscription: Subscription) -> Result<(), DomainError> {
        *self.unsubscribed.lock().unwrap() += 1;
        Ok(())
    }
}

/// A transport whose every operation fails with a transport error.
#[derive(Debug)]
pub struct FailingTransport;

#[async_trait]
impl EventTransport for FailingTransport {
    async fn publish(&self, _topic: &str, _event: &StoredEvent) -> Result<usize, DomainError> {
        Err(DomainError::TransportError("broker unreachable".into()))
    }

    async fn subscribe(&self, _topic: &str) -> Result<Subscription, DomainError> {
        Err(DomainError::TransportError("broker unreachable".into()))
    }

    async fn unsubscribe(&self, _subscription: Subscription) -> Result<(), DomainError> {
        Err(DomainError::TransportError("broker unreachable".into()))
    }
}
