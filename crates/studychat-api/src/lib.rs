//! Studychat API: HTTP surface over the messaging context.
//!
//! Exposes the catch-up query, the message list, message posting and a
//! server-sent event stream of live events.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the application router with every route mounted.
pub fn app(app_state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/events", routes::events::router())
        .nest("/api/v1/messages", routes::messages::router())
        .with_state(app_state)
}
