mod dto;
pub mod handlers;
pub mod risk;
pub mod services;

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze-image", post(handlers::analyze_image))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}
