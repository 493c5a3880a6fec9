use axum::{http::StatusCode, Json};
use serde::Serialize;
use thiserror::Error;

/// Failure talking to an external provider. Distinct from "the provider
/// answered, but had nothing for us" — see [`LookupError`].
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Request(String),
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no matching food found")]
    NotFound,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

pub fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: e.to_string(),
        }),
    )
}

pub fn bad_request(msg: &str) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody { error: msg.into() }),
    )
}
