use std::sync::Arc;

use axum::extract::Request;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use tracing::debug;

use crate::config::{ConfigSource, RequestContext};
use crate::cookies::apply_set_cookies;
use crate::engine::AuthEngine;
use crate::error::AuthError;
use crate::types::AuthAction;

/// Default mount prefix for the authentication endpoints.
pub const DEFAULT_PREFIX: &str = "/api/auth";

/// Outcome of dispatching one request.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The request named a known auth action and the engine answered it.
    /// `jar` carries any cookies the response set; returning it alongside
    /// the response lets the host emit them through its own cookie
    /// mechanism.
    Handled { jar: CookieJar, response: Response },
    /// Not an auth request; the untouched request is handed back so the
    /// rest of the application can serve it.
    Unhandled(Request),
}

/// Routes requests under a mount prefix to an authentication engine.
///
/// The gateway owns no authentication logic. It gates on the action path
/// segment, resolves configuration fresh for every request, delegates to
/// the engine, and rewrites `Set-Cookie` responses through the host cookie
/// jar for the actions that mutate session state.
pub struct AuthGateway {
    engine: Arc<dyn AuthEngine>,
    config: ConfigSource,
    prefix: String,
}

impl AuthGateway {
    /// Create a gateway mounted at [`DEFAULT_PREFIX`].
    pub fn new(engine: Arc<dyn AuthEngine>, config: impl Into<ConfigSource>) -> Self {
        Self {
            engine,
            config: config.into(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Change the mount prefix. A leading slash is added and trailing
    /// slashes are dropped, so `"auth/"` mounts at `/auth`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_end_matches('/');
        self.prefix = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub(crate) fn config_source(&self) -> &ConfigSource {
        &self.config
    }

    pub(crate) fn engine(&self) -> &Arc<dyn AuthEngine> {
        &self.engine
    }

    /// The action a path addresses: the first segment after the mount
    /// prefix, if it is a known action. `None` means the request is not for
    /// this gateway.
    pub fn action_for_path(&self, path: &str) -> Option<AuthAction> {
        let rest = path.strip_prefix(self.prefix.as_str())?.strip_prefix('/')?;
        AuthAction::from_str(rest.split('/').next().unwrap_or(""))
    }

    /// Dispatch one request.
    ///
    /// Requests that do not address a known action under the mount prefix
    /// come back as [`DispatchOutcome::Unhandled`] without touching the
    /// engine or the configuration. For handled requests the configuration
    /// is resolved freshly, environment defaults are applied, and the
    /// engine's response is post-processed: responses to `callback`,
    /// `signin` and `signout` have their `Set-Cookie` headers rewritten
    /// through the jar, everything else passes through untouched.
    pub async fn dispatch(
        &self,
        request: Request,
        jar: CookieJar,
    ) -> Result<DispatchOutcome, AuthError> {
        let Some(action) = self.action_for_path(request.uri().path()) else {
            return Ok(DispatchOutcome::Unhandled(request));
        };

        // Resolved fresh on every request: a lazy source may depend on the
        // tenant, headers or cookies of this particular request.
        let mut config = {
            let ctx = RequestContext::from(&request);
            self.config.resolve(ctx).await?
        };
        config.apply_env_defaults();

        debug!(action = %action, path = %request.uri().path(), "dispatching auth request");

        let mut response = self
            .engine
            .handle(request, &config)
            .await
            .map_err(AuthError::Engine)?;

        let jar = if action.mutates_session() {
            apply_set_cookies(jar, &mut response)?
        } else {
            jar
        };

        Ok(DispatchOutcome::Handled { jar, response })
    }
}

impl std::fmt::Debug for AuthGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGateway")
            .field("prefix", &self.prefix)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{gateway_with, StaticEngine};

    #[test]
    fn test_action_matching_requires_prefix_boundary() {
        let gateway = gateway_with(StaticEngine::ok());

        assert_eq!(
            gateway.action_for_path("/api/auth/session"),
            Some(AuthAction::Session)
        );
        assert_eq!(
            gateway.action_for_path("/api/auth/callback/github"),
            Some(AuthAction::Callback)
        );
        // Prefix must be followed by a slash and a known segment.
        assert_eq!(gateway.action_for_path("/api/auth"), None);
        assert_eq!(gateway.action_for_path("/api/auth/"), None);
        assert_eq!(gateway.action_for_path("/api/authx/session"), None);
        assert_eq!(gateway.action_for_path("/other/signin"), None);
        assert_eq!(gateway.action_for_path("/api/auth/unknown"), None);
    }

    #[test]
    fn test_prefix_normalization() {
        let gateway = gateway_with(StaticEngine::ok()).with_prefix("auth/");
        assert_eq!(gateway.prefix(), "/auth");
        assert_eq!(
            gateway.action_for_path("/auth/signin"),
            Some(AuthAction::SignIn)
        );

        let gateway = gateway_with(StaticEngine::ok()).with_prefix("/sso");
        assert_eq!(gateway.prefix(), "/sso");
    }
}
