//! Domain model for the Messaging context.

pub mod commands;
pub mod events;
pub mod mentions;
pub mod projection;
