//! Shared test mocks and utilities for Studychat.

mod clock;
mod repository;
mod transport;

pub use clock::{FixedClock, SteppingClock};
pub use repository::{FailingMessageRepository, RecordingMessageRepository};
pub use transport::{FailingTransport, RecordingTransport};
