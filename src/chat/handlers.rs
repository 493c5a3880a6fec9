use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, instrument};

use crate::error::{internal, ErrorBody};
use crate::state::AppState;

use super::dto::{ChatReply, ChatRequest};
use super::responder;

/// POST /chat
#[instrument(skip(state, body))]
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, Json<ErrorBody>)> {
    let response = responder::respond(state.llm.as_ref(), &body.message)
        .await
        .map_err(|e| {
            error!(error = %e, "chat response failed");
            internal(e)
        })?;

    Ok(Json(ChatReply { response }))
}
