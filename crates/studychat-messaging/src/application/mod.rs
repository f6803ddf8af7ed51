//! Application services for the Messaging context.

pub mod command_handlers;
pub mod event_store;
pub mod publisher;
pub mod query_handlers;
