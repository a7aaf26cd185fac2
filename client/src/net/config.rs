//! Identity provider configuration baked in at build time.
//!
//! The WASM bundle has no process environment, so values come from
//! `option_env!` when the client is compiled:
//!
//! - `SIMPLIFIED_API_KEY`: identity provider web API key
//! - `SIMPLIFIED_GOOGLE_CLIENT_ID`: OAuth client id for the Google popup
//! - `SIMPLIFIED_PERSISTENCE`: `local` (default) or `session`
//! - `SIMPLIFIED_POPUP_TIMEOUT_SECS`: default 120

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use super::gateway::PersistenceMode;

pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_TOKEN_BASE_URL: &str = "https://securetoken.googleapis.com/v1";
pub const DEFAULT_POPUP_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub api_key: String,
    pub google_client_id: String,
    pub identity_base_url: String,
    pub token_base_url: String,
    pub persistence: PersistenceMode,
    pub popup_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            google_client_id: String::new(),
            identity_base_url: DEFAULT_IDENTITY_BASE_URL.to_owned(),
            token_base_url: DEFAULT_TOKEN_BASE_URL.to_owned(),
            persistence: PersistenceMode::default(),
            popup_timeout_secs: DEFAULT_POPUP_TIMEOUT_SECS,
        }
    }
}

impl GatewayConfig {
    /// Build config from the compile-time environment.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("SIMPLIFIED_API_KEY"),
            option_env!("SIMPLIFIED_GOOGLE_CLIENT_ID"),
            option_env!("SIMPLIFIED_PERSISTENCE"),
            option_env!("SIMPLIFIED_POPUP_TIMEOUT_SECS"),
        )
    }

    /// Build config from optional raw values; bad values fall back to defaults.
    pub fn from_values(
        api_key: Option<&str>,
        google_client_id: Option<&str>,
        persistence: Option<&str>,
        popup_timeout_secs: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            api_key: api_key.unwrap_or_default().trim().to_owned(),
            google_client_id: google_client_id.unwrap_or_default().trim().to_owned(),
            persistence: persistence
                .and_then(PersistenceMode::parse)
                .unwrap_or(defaults.persistence),
            popup_timeout_secs: popup_timeout_secs
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.popup_timeout_secs),
            ..defaults
        }
    }

    /// Whether the provider can be reached at all.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}
