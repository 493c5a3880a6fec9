mod dto;
pub mod handlers;
pub mod responder;

use axum::{routing::post, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/chat", post(handlers::chat))
}
