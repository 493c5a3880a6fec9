use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::{error, instrument};

use crate::error::{bad_request, internal, ErrorBody};
use crate::state::AppState;

use super::dto::FoodRecord;
use super::services;

/// POST /analyze-image (multipart, field `image`)
#[instrument(skip(state, mp))]
pub async fn analyze_image(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<Json<Vec<FoodRecord>>, (StatusCode, Json<ErrorBody>)> {
    let mut image: Option<(Bytes, String)> = None;
    while let Ok(Some(field)) = mp.next_field().await {
        let name = field.name().map(|s| s.to_string());
        if name.as_deref() == Some("image") {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "image/jpeg".into());
            let data = field.bytes().await.map_err(internal)?;
            image = Some((data, content_type));
            break;
        }
    }

    let Some((data, content_type)) = image else {
        return Err(bad_request("No image provided"));
    };

    let records = services::analyze_image(
        state.llm.as_ref(),
        state.nutrition.as_ref(),
        data,
        &content_type,
    )
    .await
    .map_err(|e| {
        error!(error = %e, "image analysis failed");
        internal(e)
    })?;

    Ok(Json(records))
}
