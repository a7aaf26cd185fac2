//! Credential gateway contract consumed by the auth flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity provider owns credential storage, token issuance, and the
//! federated popup negotiation. Everything in `state` talks to it only through
//! `CredentialGateway`, so the browser implementation can be swapped for a
//! scripted one in tests.
//!
//! ERROR HANDLING
//! ==============
//! Provider failures come back as `GatewayError` values. A user closing the
//! federated popup is its own variant so the UI can treat it as a quiet
//! cancellation instead of a credential failure.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Authenticated user reference issued by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-issued opaque user id.
    pub uid: String,
    /// Email attached to the account, when the provider shares one.
    pub email: Option<String>,
    /// Display name from federated providers.
    pub display_name: Option<String>,
}

impl Identity {
    /// Best label for greeting the user.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

/// Whether a session should survive a browser restart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PersistenceMode {
    /// Kept in `localStorage`; survives restarts.
    #[default]
    Local,
    /// Kept in `sessionStorage`; cleared when the browser session ends.
    Session,
}

impl PersistenceMode {
    /// Parse the config spelling (`local` / `session`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "local" => Some(Self::Local),
            "session" => Some(Self::Session),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Session => "session",
        }
    }
}

/// Failures reported by the identity provider boundary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The user closed the federated sign-in popup before finishing.
    #[error("sign-in was cancelled")]
    Cancelled,

    /// The provider refused the request.
    #[error("{message}")]
    Rejected { code: String, message: String },

    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Transport(String),

    /// No browser environment is available to reach the provider.
    #[error("authentication is not available here")]
    Unavailable,
}

impl GatewayError {
    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected { code: code.into(), message: message.into() }
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Callback fired when the provider reports the current session.
pub type SessionChangeCallback = Box<dyn Fn(Option<Identity>) + Send + Sync>;

/// Narrow contract over the external identity provider.
///
/// Futures are not `Send`: in the browser they wrap JS promises and run on
/// the single UI thread via `spawn_local`.
#[async_trait(?Send)]
pub trait CredentialGateway: Send + Sync {
    /// Select where the next session is persisted. Call before signing in.
    fn set_persistence(&self, mode: PersistenceMode);

    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, GatewayError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, GatewayError>;

    /// Popup-based federated sign-in (Google).
    async fn sign_in_with_federated_provider(&self) -> Result<Identity, GatewayError>;

    async fn sign_out(&self) -> Result<(), GatewayError>;

    /// Register for session reports. The provider calls back once the
    /// restored session is known and again on every later change.
    fn on_session_change(&self, callback: SessionChangeCallback);
}
