use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authentication actions the gateway dispatches on.
///
/// The action is the first path segment after the mount prefix; a request
/// whose segment is not one of these is left for the rest of the application
/// to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthAction {
    Providers,
    Session,
    Csrf,
    SignIn,
    SignOut,
    Callback,
    VerifyRequest,
    Error,
}

impl AuthAction {
    /// All actions, in dispatch-table order.
    pub const ALL: [AuthAction; 8] = [
        AuthAction::Providers,
        AuthAction::Session,
        AuthAction::Csrf,
        AuthAction::SignIn,
        AuthAction::SignOut,
        AuthAction::Callback,
        AuthAction::VerifyRequest,
        AuthAction::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthAction::Providers => "providers",
            AuthAction::Session => "session",
            AuthAction::Csrf => "csrf",
            AuthAction::SignIn => "signin",
            AuthAction::SignOut => "signout",
            AuthAction::Callback => "callback",
            AuthAction::VerifyRequest => "verify-request",
            AuthAction::Error => "error",
        }
    }

    /// Parse a path segment into an action. Matching is exact; anything else
    /// is not an auth request.
    pub fn from_str(segment: &str) -> Option<Self> {
        match segment {
            "providers" => Some(AuthAction::Providers),
            "session" => Some(AuthAction::Session),
            "csrf" => Some(AuthAction::Csrf),
            "signin" => Some(AuthAction::SignIn),
            "signout" => Some(AuthAction::SignOut),
            "callback" => Some(AuthAction::Callback),
            "verify-request" => Some(AuthAction::VerifyRequest),
            "error" => Some(AuthAction::Error),
            _ => None,
        }
    }

    /// Whether responses to this action carry session state in `Set-Cookie`
    /// headers that must be rewritten through the host cookie jar.
    pub fn mutates_session(&self) -> bool {
        matches!(
            self,
            AuthAction::Callback | AuthAction::SignIn | AuthAction::SignOut
        )
    }
}

impl fmt::Display for AuthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session payload returned by the engine's `session` action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,

    /// Expiry timestamp, if the engine reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,

    // Additional fields that might be present
    #[serde(flatten)]
    pub additional_claims: serde_json::Map<String, serde_json::Value>,
}

/// User information inside a [`Session`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(flatten)]
    pub additional_claims: serde_json::Map<String, serde_json::Value>,
}
