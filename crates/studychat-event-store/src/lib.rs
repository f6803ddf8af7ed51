//! Studychat Event Store: in-memory infrastructure adapters.
//!
//! Each adapter is an ordinary value: several isolated instances (one per
//! tenant, one per test) can live in the same process.

pub mod in_memory_event_log;
pub mod in_memory_message_repository;
pub mod in_process_transport;

pub use in_memory_event_log::InMemoryEventLog;
pub use in_memory_message_repository::InMemoryMessageRepository;
pub use in_process_transport::InProcessTransport;
