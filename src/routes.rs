// Router and middleware glue for mounting the gateway on an axum app.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use axum_extra::extract::CookieJar;

use crate::dispatch::{AuthGateway, DispatchOutcome};
use crate::error::AuthError;

/// Create the authentication routes.
///
/// Registers `GET` and `POST` for everything under the gateway's mount
/// prefix. Requests under the prefix that do not name a known action get a
/// 404 from this subtree; use [`gateway_middleware`] instead when such
/// requests should fall through to other handlers.
pub fn routes(gateway: Arc<AuthGateway>) -> Router {
    let pattern = format!("{}/{{*rest}}", gateway.prefix());
    Router::new()
        .route(&pattern, get(handle).post(handle))
        .with_state(gateway)
}

async fn handle(
    State(gateway): State<Arc<AuthGateway>>,
    jar: CookieJar,
    request: Request,
) -> Result<Response, AuthError> {
    match gateway.dispatch(request, jar).await? {
        DispatchOutcome::Handled { jar, response } => Ok((jar, response).into_response()),
        DispatchOutcome::Unhandled(_) => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// Middleware form of the gateway, for
/// `axum::middleware::from_fn_with_state`.
///
/// Requests addressing a known auth action are answered by the engine;
/// everything else continues down the middleware stack untouched.
pub async fn gateway_middleware(
    State(gateway): State<Arc<AuthGateway>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    match gateway.dispatch(request, jar).await? {
        DispatchOutcome::Handled { jar, response } => Ok((jar, response).into_response()),
        DispatchOutcome::Unhandled(request) => Ok(next.run(request).await),
    }
}
