use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::BoxError;
use tracing::error;

/// Gateway errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("configuration resolution failed: {0}")]
    ConfigResolution(#[source] BoxError),

    #[error("authentication engine failed: {0}")]
    Engine(#[source] BoxError),

    #[error("lazy auth configuration needs a request context; use session_with_context")]
    LazyConfigRequiresContext,

    #[error("engine returned a malformed Set-Cookie header: {0}")]
    Cookie(#[from] cookie::ParseError),

    #[error("engine returned a non-UTF-8 Set-Cookie header")]
    HeaderEncoding,

    #[error("session request failed with status {status}: {message}")]
    SessionFetch { status: StatusCode, message: String },

    #[error("invalid session payload: {0}")]
    SessionBody(#[from] serde_json::Error),

    #[error("invalid session request: {0}")]
    Request(#[from] axum::http::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Details go to the log, not the wire
        error!("authentication dispatch failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "authentication error").into_response()
    }
}
