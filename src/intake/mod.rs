mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/commit", post(handlers::commit))
        .route("/getnutrition", get(handlers::get_nutrition))
}
