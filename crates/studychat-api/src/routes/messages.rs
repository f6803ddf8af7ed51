//! Routes for posting and listing chat messages.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use studychat_messaging::application::command_handlers;
use studychat_messaging::application::query_handlers::{self, MessageListView};
use studychat_messaging::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageRequest {
    /// The user posting the message.
    pub user_id: String,
    /// Message text. `@name` tokens become mentions.
    pub content: String,
}

/// Response body returned after a message is posted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageResponse {
    /// Command identifier shared by every produced event.
    pub cmd_uuid: Uuid,
    /// IDs of the events recorded, message first then mentions.
    pub event_ids: Vec<Uuid>,
}

/// POST /
#[instrument(skip(state, request), fields(user_id = %request.user_id))]
async fn post_message(
    State(state): State<AppState>,
    Json(request): Json<PostMessageRequest>,
) -> Result<Json<PostMessageResponse>, ApiError> {
    let command = commands::PostMessage {
        correlation_id: Uuid::new_v4(),
        user_id: request.user_id,
        content: request.content,
    };

    info!(correlation_id = %command.correlation_id, "handling post_message command");

    let stored_events =
        command_handlers::handle_post_message(&command, state.clock.as_ref(), &state.event_store)
            .await?;

    let event_ids = stored_events.iter().map(|e| e.event_id).collect();

    Ok(Json(PostMessageResponse {
        cmd_uuid: command.correlation_id,
        event_ids,
    }))
}

/// GET /
async fn list_messages(State(state): State<AppState>) -> Result<Json<MessageListView>, ApiError> {
    let view = query_handlers::get_all_messages(&state.event_store).await?;
    Ok(Json(view))
}

/// Returns the router for the messages endpoints.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_messages).post(post_message))
}
