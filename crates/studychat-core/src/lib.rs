//! Studychat Core: shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the messaging
//! context, the infrastructure adapters and the client depend on. It
//! contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod message;
pub mod repository;
pub mod transport;
