// Server-side session lookup through the engine's `session` action.

use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderMap, Method, StatusCode};

use crate::config::{AuthConfig, ConfigSource, RequestContext};
use crate::dispatch::AuthGateway;
use crate::error::AuthError;
use crate::types::Session;

// Session payloads are small JSON documents; anything past this is a
// misbehaving engine.
const SESSION_BODY_LIMIT: usize = 1024 * 1024;

impl AuthGateway {
    /// Fetch the session for a request, given its headers.
    ///
    /// Only valid with a static configuration: a lazy source cannot be
    /// resolved from headers alone and fails fast with
    /// [`AuthError::LazyConfigRequiresContext`]. Use
    /// [`session_with_context`](Self::session_with_context) in that case.
    pub async fn session(&self, headers: &HeaderMap) -> Result<Option<Session>, AuthError> {
        let config = match self.config_source() {
            ConfigSource::Static(config) => config.clone(),
            ConfigSource::Lazy(_) => return Err(AuthError::LazyConfigRequiresContext),
        };
        self.fetch_session(headers, config).await
    }

    /// Fetch the session for a request, resolving the configuration (static
    /// or lazy) from the given request context first.
    pub async fn session_with_context(
        &self,
        ctx: RequestContext<'_>,
    ) -> Result<Option<Session>, AuthError> {
        let config = self.config_source().resolve(ctx).await?;
        self.fetch_session(ctx.headers, config).await
    }

    async fn fetch_session(
        &self,
        headers: &HeaderMap,
        mut config: AuthConfig,
    ) -> Result<Option<Session>, AuthError> {
        if config.secret.is_none() {
            config.secret = std::env::var("AUTH_SECRET").ok();
        }
        // The lookup runs server-side against the engine directly, so the
        // host header is our own.
        config.trust_host.get_or_insert(true);

        let mut request = Request::builder()
            .method(Method::GET)
            .uri(format!("{}/session", self.prefix()))
            .body(Body::empty())?;
        *request.headers_mut() = headers.clone();

        let response = self
            .engine()
            .handle(request, &config)
            .await
            .map_err(AuthError::Engine)?;
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), SESSION_BODY_LIMIT)
            .await
            .map_err(|e| AuthError::Engine(e.into()))?;
        let data: serde_json::Value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        // An empty payload means "no session", whatever the status.
        let empty = match &data {
            serde_json::Value::Null => true,
            serde_json::Value::Object(map) => map.is_empty(),
            _ => false,
        };
        if empty {
            return Ok(None);
        }

        if status == StatusCode::OK {
            return Ok(Some(serde_json::from_value(data)?));
        }

        let message = data
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("session lookup failed")
            .to_string();
        Err(AuthError::SessionFetch { status, message })
    }
}
