//! Routes for event catch-up and the live event stream.

use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::{Json, Router, routing::get};
use futures::stream::{self, Stream};
use serde::Deserialize;
use studychat_core::event::StoredEvent;
use studychat_messaging::application::query_handlers::{self, EventListView};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for GET /.
#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// The viewer asking for the backlog. Only used for logging.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    /// Catch-up cursor: the last event the viewer processed.
    #[serde(rename = "lastUUID")]
    pub last_uuid: Option<Uuid>,
}

/// GET /
#[instrument(skip(state, query), fields(user_id = ?query.user_id, last_uuid = ?query.last_uuid))]
async fn catch_up(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<EventListView>, ApiError> {
    let view = query_handlers::get_events_since(query.last_uuid, &state.event_store).await?;
    debug!(count = view.events.len(), "returning catch-up backlog");
    Ok(Json(view))
}

fn to_sse_event(event: &StoredEvent) -> Result<Event, axum::Error> {
    Event::default()
        .event(event.event_type.as_str())
        .id(event.event_id.to_string())
        .json_data(event)
}

/// GET /live
///
/// Streams every event published after the subscription is registered.
/// The subscriber is pruned from the transport once the client disconnects.
async fn live(
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let publisher = state.event_store.publisher();
    let subscription = publisher.transport().subscribe(publisher.topic()).await?;
    info!(
        subscription_id = subscription.id(),
        topic = %subscription.topic(),
        "live stream attached"
    );

    let events = stream::unfold(subscription, |mut subscription| async move {
        subscription
            .recv()
            .await
            .map(|event| (to_sse_event(&event), subscription))
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// Returns the router for the events endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catch_up))
        .route("/live", get(live))
}
