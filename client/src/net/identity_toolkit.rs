//! Credential gateway backed by the identity provider's REST API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` plus a popup window
//! for Google sign-in. Server-side (SSR) and native builds: every call returns
//! `GatewayError::Unavailable` and session reports never fire, so server
//! rendering stays in the pending state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Email/password accounts use `accounts:signUp` and
//! `accounts:signInWithPassword`. The Google popup runs an implicit
//! `id_token` flow back to `/auth/callback` on this origin, which the opener
//! polls for, then exchanges through `accounts:signInWithIdp`. The resulting
//! credential is kept in local or session storage depending on the requested
//! persistence mode.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "identity_toolkit_test.rs"]
mod identity_toolkit_test;

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::config::GatewayConfig;
use super::gateway::{CredentialGateway, GatewayError, Identity, PersistenceMode, SessionChangeCallback};
use crate::util::storage::StorageArea;

pub const CREDENTIAL_STORAGE_KEY: &str = "simplified_auth_credential";
pub const POPUP_CALLBACK_PATH: &str = "/auth/callback";
pub const GOOGLE_PROVIDER_ID: &str = "google.com";

#[cfg(any(test, feature = "hydrate"))]
const GOOGLE_CONSENT_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
#[cfg(feature = "hydrate")]
const POPUP_POLL_MS: u32 = 250;
#[cfg(feature = "hydrate")]
const POPUP_FEATURES: &str = "width=500,height=640,menubar=no,toolbar=no";
#[cfg(any(test, feature = "hydrate"))]
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;
/// Refresh slightly before the provider's expiry.
const EXPIRY_SKEW_MS: f64 = 30_000.0;

// =============================================================================
// STORED CREDENTIAL
// =============================================================================

/// What survives a reload: the identity plus the tokens needed to keep it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub identity: Identity,
    pub id_token: String,
    pub refresh_token: String,
    /// Milliseconds since the Unix epoch.
    pub expires_at_ms: f64,
}

impl StoredCredential {
    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms + EXPIRY_SKEW_MS >= self.expires_at_ms
    }
}

fn storage_area(mode: PersistenceMode) -> StorageArea {
    match mode {
        PersistenceMode::Local => StorageArea::Local,
        PersistenceMode::Session => StorageArea::Session,
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Body returned by `signUp`, `signInWithPassword`, and `signInWithIdp`.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    local_id: String,
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    expires_in: Option<String>,
}

/// Body returned by the secure-token refresh endpoint.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(any(test, feature = "hydrate"))]
fn expiry_from(expires_in: Option<&str>, now_ms: f64) -> f64 {
    let secs = expires_in
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
    #[allow(clippy::cast_precision_loss)]
    let lifetime_ms = secs as f64 * 1000.0;
    now_ms + lifetime_ms
}

#[cfg(any(test, feature = "hydrate"))]
impl AuthResponse {
    fn into_credential(self, now_ms: f64) -> StoredCredential {
        let expires_at_ms = expiry_from(self.expires_in.as_deref(), now_ms);
        StoredCredential {
            identity: Identity {
                uid: self.local_id,
                email: self.email.filter(|e| !e.is_empty()),
                display_name: self.display_name.filter(|n| !n.is_empty()),
            },
            id_token: self.id_token,
            refresh_token: self.refresh_token,
            expires_at_ms,
        }
    }
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// Split a provider error string such as `WEAK_PASSWORD : Password should be
/// at least 6 characters` into code and optional detail.
#[cfg(any(test, feature = "hydrate"))]
fn split_error_code(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once(" : ") {
        Some((code, detail)) => (code.trim(), Some(detail.trim())),
        None => (raw.trim(), None),
    }
}

/// Readable message for a provider error code. Unknown codes pass through.
#[cfg(any(test, feature = "hydrate"))]
fn provider_message(code: &str, detail: Option<&str>) -> String {
    let known = match code {
        "EMAIL_EXISTS" => "The email address is already in use by another account.",
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => "Incorrect email or password.",
        "USER_DISABLED" => "This account has been disabled.",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Try again later.",
        "INVALID_EMAIL" => "The email address is badly formatted.",
        "WEAK_PASSWORD" => "Password should be at least 6 characters.",
        "OPERATION_NOT_ALLOWED" => "This sign-in method is not enabled.",
        _ => return detail.map_or_else(|| code.to_owned(), |d| format!("{code}: {d}")),
    };
    known.to_owned()
}

#[cfg(any(test, feature = "hydrate"))]
fn rejection_from_body(status: u16, body: &str) -> GatewayError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let (code, detail) = split_error_code(&envelope.error.message);
            GatewayError::rejected(code, provider_message(code, detail))
        }
        Err(_) => GatewayError::Transport(format!("identity request failed: {status}")),
    }
}

fn not_configured() -> GatewayError {
    GatewayError::rejected("CONFIGURATION_NOT_FOUND", "Sign-in is not configured for this site.")
}

// =============================================================================
// ENDPOINTS
// =============================================================================

#[cfg(any(test, feature = "hydrate"))]
fn accounts_endpoint(config: &GatewayConfig, method: &str) -> String {
    format!("{}/accounts:{method}?key={}", config.identity_base_url.trim_end_matches('/'), config.api_key)
}

#[cfg(any(test, feature = "hydrate"))]
fn token_endpoint(config: &GatewayConfig) -> String {
    format!("{}/token?key={}", config.token_base_url.trim_end_matches('/'), config.api_key)
}

/// Google consent page URL for the implicit `id_token` popup flow.
#[cfg(any(test, feature = "hydrate"))]
fn google_consent_url(client_id: &str, redirect_uri: &str, nonce: &str) -> Result<String, GatewayError> {
    url::Url::parse_with_params(
        GOOGLE_CONSENT_URL,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "id_token"),
            ("scope", "openid email profile"),
            ("nonce", nonce),
            ("state", nonce),
            ("prompt", "select_account"),
        ],
    )
    .map(String::from)
    .map_err(|e| GatewayError::Transport(e.to_string()))
}

/// Result the popup callback page carries in its URL fragment.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, PartialEq, Eq)]
enum PopupFragment {
    Token(String),
    Denied(String),
}

/// Read `#id_token=...&state=...` (or `#error=...`) from the callback URL.
/// Fragments with a foreign `state` are ignored.
#[cfg(any(test, feature = "hydrate"))]
fn parse_popup_fragment(hash: &str, expected_state: &str) -> Option<PopupFragment> {
    let fragment = hash.strip_prefix('#').unwrap_or(hash);
    if fragment.is_empty() {
        return None;
    }
    let mut token = None;
    let mut error = None;
    let mut state = None;
    for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
        match key.as_ref() {
            "id_token" => token = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            _ => {}
        }
    }
    if state.as_deref() != Some(expected_state) {
        return None;
    }
    match (token, error) {
        (Some(token), _) => Some(PopupFragment::Token(token)),
        (None, Some(error)) => Some(PopupFragment::Denied(error)),
        (None, None) => None,
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn idp_post_body(id_token: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("id_token", id_token)
        .append_pair("providerId", GOOGLE_PROVIDER_ID)
        .finish()
}

// =============================================================================
// GATEWAY
// =============================================================================

/// REST-backed `CredentialGateway`.
pub struct IdentityToolkitGateway {
    config: GatewayConfig,
    persistence: Mutex<PersistenceMode>,
    listeners: Mutex<Vec<Arc<SessionChangeCallback>>>,
}

impl IdentityToolkitGateway {
    pub fn new(config: GatewayConfig) -> Self {
        let persistence = config.persistence;
        Self { config, persistence: Mutex::new(persistence), listeners: Mutex::new(Vec::new()) }
    }

    pub fn persistence(&self) -> PersistenceMode {
        *self.persistence.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, identity: Option<&Identity>) {
        let listeners: Vec<_> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(Arc::clone)
            .collect();
        for listener in listeners {
            listener(identity.cloned());
        }
    }

    /// Persist `credential` in the active area and drop it from the other.
    #[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
    fn store(&self, credential: &StoredCredential) {
        let mode = self.persistence();
        let other = match mode {
            PersistenceMode::Local => PersistenceMode::Session,
            PersistenceMode::Session => PersistenceMode::Local,
        };
        crate::util::storage::remove(storage_area(other), CREDENTIAL_STORAGE_KEY);
        crate::util::storage::save_json(storage_area(mode), CREDENTIAL_STORAGE_KEY, credential);
    }

    fn forget(&self) {
        crate::util::storage::remove(StorageArea::Local, CREDENTIAL_STORAGE_KEY);
        crate::util::storage::remove(StorageArea::Session, CREDENTIAL_STORAGE_KEY);
    }

    /// Stored credential from either area, local first.
    #[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
    fn stored(&self) -> Option<(PersistenceMode, StoredCredential)> {
        [PersistenceMode::Local, PersistenceMode::Session]
            .into_iter()
            .find_map(|mode| {
                crate::util::storage::load_json::<StoredCredential>(storage_area(mode), CREDENTIAL_STORAGE_KEY)
                    .map(|credential| (mode, credential))
            })
    }
}

#[cfg(feature = "hydrate")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(feature = "hydrate")]
fn js_error(err: &wasm_bindgen::JsValue) -> GatewayError {
    GatewayError::Transport(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

#[cfg(feature = "hydrate")]
impl IdentityToolkitGateway {
    async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<AuthResponse, GatewayError> {
        let resp = gloo_net::http::Request::post(url)
            .json(body)
            .map_err(|e| GatewayError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(rejection_from_body(status, &body));
        }
        resp.json::<AuthResponse>()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }

    fn complete(&self, response: AuthResponse) -> Identity {
        let credential = response.into_credential(now_ms());
        self.store(&credential);
        self.notify(Some(&credential.identity));
        credential.identity
    }

    async fn refresh(&self, credential: StoredCredential) -> Result<StoredCredential, GatewayError> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "refresh_token")
            .append_pair("refresh_token", &credential.refresh_token)
            .finish();
        let resp = gloo_net::http::Request::post(&token_endpoint(&self.config))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .map_err(|e| GatewayError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(rejection_from_body(status, &body));
        }
        let refreshed: RefreshResponse = resp.json().await.map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(StoredCredential {
            expires_at_ms: expiry_from(refreshed.expires_in.as_deref(), now_ms()),
            id_token: refreshed.id_token,
            refresh_token: refreshed.refresh_token,
            identity: credential.identity,
        })
    }

    /// Restore the stored session, refreshing an expired token once.
    async fn restore(&self) -> Option<Identity> {
        let (mode, credential) = self.stored()?;
        if !credential.is_expired(now_ms()) {
            return Some(credential.identity);
        }
        match self.refresh(credential).await {
            Ok(refreshed) => {
                crate::util::storage::save_json(storage_area(mode), CREDENTIAL_STORAGE_KEY, &refreshed);
                Some(refreshed.identity)
            }
            Err(e) => {
                log::warn!("stored session could not be refreshed: {e}");
                self.forget();
                None
            }
        }
    }

    /// Open the Google consent popup and wait for an `id_token`.
    async fn run_popup(&self) -> Result<String, GatewayError> {
        let window = web_sys::window().ok_or(GatewayError::Unavailable)?;
        let origin = window.location().origin().map_err(|e| js_error(&e))?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let nonce = format!("{:016x}", (js_sys::Math::random() * 1.0e16) as u64);
        let url = google_consent_url(
            &self.config.google_client_id,
            &format!("{origin}{POPUP_CALLBACK_PATH}"),
            &nonce,
        )?;
        let popup = window
            .open_with_url_and_target_and_features(&url, "simplified-google-signin", POPUP_FEATURES)
            .map_err(|e| js_error(&e))?
            .ok_or_else(|| GatewayError::rejected("POPUP_BLOCKED", "The sign-in popup was blocked by the browser."))?;

        #[allow(clippy::cast_precision_loss)]
        let deadline = now_ms() + self.config.popup_timeout_secs as f64 * 1000.0;
        loop {
            gloo_timers::future::TimeoutFuture::new(POPUP_POLL_MS).await;
            if popup.closed().unwrap_or(true) {
                return Err(GatewayError::Cancelled);
            }
            // Reading the location throws until the popup is back on our origin.
            if let Ok(hash) = popup.location().hash() {
                match parse_popup_fragment(&hash, &nonce) {
                    Some(PopupFragment::Token(token)) => {
                        let _ = popup.close();
                        return Ok(token);
                    }
                    Some(PopupFragment::Denied(reason)) => {
                        let _ = popup.close();
                        if reason == "access_denied" {
                            return Err(GatewayError::Cancelled);
                        }
                        return Err(GatewayError::rejected("POPUP_FAILED", reason));
                    }
                    None => {}
                }
            }
            if now_ms() > deadline {
                let _ = popup.close();
                return Err(GatewayError::rejected("POPUP_TIMEOUT", "The sign-in popup timed out."));
            }
        }
    }
}

#[async_trait(?Send)]
impl CredentialGateway for IdentityToolkitGateway {
    fn set_persistence(&self, mode: PersistenceMode) {
        *self.persistence.lock().unwrap_or_else(PoisonError::into_inner) = mode;
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, GatewayError> {
        if !self.config.is_configured() {
            return Err(not_configured());
        }
        #[cfg(feature = "hydrate")]
        {
            let body = serde_json::json!({ "email": email, "password": password, "returnSecureToken": true });
            let response = self.post_json(&accounts_endpoint(&self.config, "signUp"), &body).await?;
            Ok(self.complete(response))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(GatewayError::Unavailable)
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, GatewayError> {
        if !self.config.is_configured() {
            return Err(not_configured());
        }
        #[cfg(feature = "hydrate")]
        {
            let body = serde_json::json!({ "email": email, "password": password, "returnSecureToken": true });
            let response = self
                .post_json(&accounts_endpoint(&self.config, "signInWithPassword"), &body)
                .await?;
            Ok(self.complete(response))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(GatewayError::Unavailable)
        }
    }

    async fn sign_in_with_federated_provider(&self) -> Result<Identity, GatewayError> {
        if !self.config.is_configured() || self.config.google_client_id.is_empty() {
            return Err(not_configured());
        }
        #[cfg(feature = "hydrate")]
        {
            let id_token = self.run_popup().await?;
            let origin = web_sys::window()
                .ok_or(GatewayError::Unavailable)?
                .location()
                .origin()
                .map_err(|e| js_error(&e))?;
            let body = serde_json::json!({
                "postBody": idp_post_body(&id_token),
                "requestUri": origin,
                "returnSecureToken": true,
                "returnIdpCredential": true,
            });
            let response = self.post_json(&accounts_endpoint(&self.config, "signInWithIdp"), &body).await?;
            Ok(self.complete(response))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(GatewayError::Unavailable)
        }
    }

    async fn sign_out(&self) -> Result<(), GatewayError> {
        self.forget();
        self.notify(None);
        Ok(())
    }

    fn on_session_change(&self, callback: SessionChangeCallback) {
        let callback = Arc::new(callback);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&callback));

        #[cfg(feature = "hydrate")]
        {
            let gateway = Self {
                config: self.config.clone(),
                persistence: Mutex::new(self.persistence()),
                listeners: Mutex::new(Vec::new()),
            };
            leptos::task::spawn_local(async move {
                let restored = gateway.restore().await;
                log::debug!("session restored: signed_in={}", restored.is_some());
                callback(restored);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            drop(callback);
        }
    }
}
