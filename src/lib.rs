//! Mount a pluggable authentication engine under a path prefix on an axum
//! application.
//!
//! This crate is integration glue: provider flows, sessions, tokens and
//! CSRF all belong to the engine behind the [`AuthEngine`] trait. The
//! gateway registers the engine's HTTP surface (`{prefix}/{action}` for a
//! fixed set of actions), resolves configuration per request, and rewrites
//! the engine's `Set-Cookie` responses through axum's structured cookie
//! jar.
//!
//! ```no_run
//! use std::sync::Arc;
//! use axum::Router;
//! use axum_authgate::{routes, AuthConfig, AuthGateway};
//! # fn engine() -> Arc<dyn axum_authgate::AuthEngine> { unimplemented!() }
//!
//! let gateway = Arc::new(AuthGateway::new(
//!     engine(),
//!     AuthConfig::new().with_secret("dev-secret"),
//! ));
//! let app: Router = Router::new().merge(routes(gateway));
//! ```
//!
//! For per-tenant configuration, construct the gateway with
//! [`ConfigSource::lazy`]; the resolver runs again on every request.

pub mod config;
mod cookies;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod routes;
mod session;
pub mod types;


pub use config::{AuthConfig, ConfigSource, RequestContext, ResolveConfig};
pub use dispatch::{AuthGateway, DispatchOutcome, DEFAULT_PREFIX};
pub use engine::AuthEngine;
pub use error::AuthError;
pub use routes::{gateway_middleware, routes};
pub use types::{AuthAction, Session, SessionUser};
