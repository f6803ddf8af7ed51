//! Studychat messaging bounded context.
//!
//! Responsible for turning posted messages into domain events, recording
//! them in the event log, projecting the message read model and fanning
//! events out to live subscribers.

pub mod application;
pub mod domain;
