//! Studychat client core.
//!
//! A [`ChatSession`] keeps one viewer's message list in step with the event
//! log: it catches up on the backlog once per attach, then follows live
//! pushes, routing every event through an [`EventDispatcher`].

pub mod catch_up;
pub mod dispatcher;
pub mod session;
pub mod view;

pub use catch_up::CatchUpSource;
pub use dispatcher::EventDispatcher;
pub use session::{ChatSession, SessionConfig, SessionState};
pub use view::{ChatView, MentionNotification, ViewHandler};
