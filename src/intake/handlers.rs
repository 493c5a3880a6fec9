use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, instrument};

use crate::error::{ErrorBody, MessageBody};
use crate::state::AppState;

use super::dto::CommitRequest;

const COMMIT_FAILED: &str = "Failed to commit nutrition data. Please try again.";
const FETCH_FAILED: &str = "Failed to fetch nutrition data. Please try again.";

/// POST /commit — append food records, then the totals aggregate. The two
/// writes are independent; a failure between them leaves the first committed.
#[instrument(skip(state, body))]
pub async fn commit(
    State(state): State<AppState>,
    Json(body): Json<CommitRequest>,
) -> Result<Json<MessageBody>, (StatusCode, Json<ErrorBody>)> {
    if !body.food_data.is_empty() {
        if let Err(e) = state.store.insert_food_records(&body.food_data).await {
            error!(error = %e, "insert food records failed");
            return Err(commit_failed());
        }
    }

    if body.has_totals() {
        if let Err(e) = state.store.insert_totals(body.total_nutrients).await {
            error!(error = %e, "insert nutrient totals failed");
            return Err(commit_failed());
        }
    }

    info!("nutrition data committed");
    Ok(Json(MessageBody {
        message: "Nutrition data successfully committed!".into(),
    }))
}

/// GET /getnutrition — the single most recent totals aggregate, or 404.
#[instrument(skip(state))]
pub async fn get_nutrition(State(state): State<AppState>) -> Response {
    match state.store.latest_totals().await {
        Ok(Some(totals)) => (StatusCode::OK, Json(vec![totals])).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(MessageBody {
                message: "No nutrition data available".into(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "latest nutrient totals failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: FETCH_FAILED.into(),
                }),
            )
                .into_response()
        }
    }
}

fn commit_failed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: COMMIT_FAILED.into(),
        }),
    )
}
