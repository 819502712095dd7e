use std::env;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::Request;
use axum::http::{HeaderMap, Method, Uri};
use axum::BoxError;

use crate::error::AuthError;

/// Configuration handed to the authentication engine on every dispatch.
///
/// The gateway only interprets `secret` and `trust_host`; everything the
/// engine needs beyond that travels in `options` untouched.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Secret used by the engine for token and cookie signing.
    /// Defaults to the `AUTH_SECRET` environment variable.
    pub secret: Option<String>,
    /// Whether to trust the incoming `Host`/`X-Forwarded-Host` headers.
    /// Defaults to `AUTH_TRUST_HOST`, otherwise to `true` unless `APP_ENV`
    /// is `production`.
    pub trust_host: Option<bool>,
    /// Engine-specific options, passed through verbatim.
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl AuthConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn with_trust_host(mut self, trust_host: bool) -> Self {
        self.trust_host = Some(trust_host);
        self
    }

    pub fn with_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Fill unset fields from the process environment. Explicit values
    /// always win over the environment.
    pub fn apply_env_defaults(&mut self) {
        if self.secret.is_none() {
            self.secret = env::var("AUTH_SECRET").ok();
        }
        if self.trust_host.is_none() {
            self.trust_host = Some(trust_host_from_env());
        }
    }
}

/// Trust-host default: an explicit `AUTH_TRUST_HOST` wins; otherwise hosts
/// are trusted everywhere except a declared production environment.
fn trust_host_from_env() -> bool {
    if let Ok(value) = env::var("AUTH_TRUST_HOST") {
        return is_truthy(&value);
    }
    env::var("APP_ENV")
        .map(|v| v.to_lowercase() != "production")
        .unwrap_or(true)
}

fn is_truthy(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1" || value == "yes"
}

/// Per-request context handed to a lazy configuration resolver.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub method: &'a Method,
    pub uri: &'a Uri,
    pub headers: &'a HeaderMap,
}

impl<'a> RequestContext<'a> {
    pub fn new(method: &'a Method, uri: &'a Uri, headers: &'a HeaderMap) -> Self {
        Self {
            method,
            uri,
            headers,
        }
    }
}

impl<'a> From<&'a Request> for RequestContext<'a> {
    fn from(request: &'a Request) -> Self {
        Self {
            method: request.method(),
            uri: request.uri(),
            headers: request.headers(),
        }
    }
}

/// Resolver for configuration that depends on the incoming request, for
/// example per-tenant secrets looked up in a database.
#[async_trait]
pub trait ResolveConfig: Send + Sync {
    async fn resolve(&self, ctx: RequestContext<'_>) -> Result<AuthConfig, BoxError>;
}

/// Where the gateway gets its configuration from.
///
/// A `Static` source is resolved once at setup; a `Lazy` source is resolved
/// freshly on every dispatch, since its result may vary per request.
pub enum ConfigSource {
    Static(AuthConfig),
    Lazy(Arc<dyn ResolveConfig>),
}

impl ConfigSource {
    pub fn lazy<R: ResolveConfig + 'static>(resolver: R) -> Self {
        ConfigSource::Lazy(Arc::new(resolver))
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, ConfigSource::Lazy(_))
    }

    /// Resolve the configuration for one request. Never cached: a lazy
    /// resolver runs again on the next call.
    pub async fn resolve(&self, ctx: RequestContext<'_>) -> Result<AuthConfig, AuthError> {
        match self {
            ConfigSource::Static(config) => Ok(config.clone()),
            ConfigSource::Lazy(resolver) => resolver
                .resolve(ctx)
                .await
                .map_err(AuthError::ConfigResolution),
        }
    }
}

impl From<AuthConfig> for ConfigSource {
    fn from(config: AuthConfig) -> Self {
        ConfigSource::Static(config)
    }
}

impl fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Static(config) => f.debug_tuple("Static").field(config).finish(),
            ConfigSource::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}
