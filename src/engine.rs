use async_trait::async_trait;
use axum::extract::Request;
use axum::response::Response;
use axum::BoxError;

use crate::config::AuthConfig;

/// The external authentication engine the gateway delegates to.
///
/// The engine owns everything hard: provider flows, CSRF tokens, session
/// storage, token signing. The gateway only routes requests to it and
/// translates its responses back into the host framework.
///
/// `handle` receives the inbound request unchanged together with the
/// configuration resolved for this request, and returns the full HTTP
/// response for the requested action. Failures propagate to the caller
/// unchanged; the gateway never retries, since actions such as `signout`
/// are not safe to replay.
#[async_trait]
pub trait AuthEngine: Send + Sync {
    async fn handle(&self, request: Request, config: &AuthConfig) -> Result<Response, BoxError>;
}
