//! Sign-up, sign-in, and federated sign-in orchestration.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages and the landing modal build an `AuthFlow` per screen. Each operation
//! validates the form, calls the credential gateway, and on success updates
//! the shared `SessionStore` and emits exactly one navigation.
//!
//! ERROR HANDLING
//! ==============
//! Validation and gateway failures end the attempt and land in the form's
//! message; nothing is retried and nothing propagates past the view. A second
//! submission while one is in flight is refused with `AuthError::Busy` before
//! touching the form or the gateway.

#[cfg(test)]
#[path = "auth_flow_test.rs"]
mod auth_flow_test;

use std::sync::Arc;

use crate::net::gateway::{CredentialGateway, GatewayError, Identity, PersistenceMode};
use crate::state::auth::SessionStore;
use crate::state::auth_form::{AuthFormState, FormMessage, FormSlot};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const DEFAULT_SUCCESS_ROUTE: &str = "/dashboard";
pub const SIGNED_OUT_ROUTE: &str = "/";
pub const CANCELLED_NOTICE: &str = "Sign-in was cancelled.";

/// Locally detected input problems. Never sent to the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Enter your email address.")]
    MissingEmail,
    #[error("Enter your password.")]
    MissingPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

/// Why an auth operation did not complete.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// A submission is already in flight for this form.
    #[error("a submission is already in progress")]
    Busy,
    /// The form went away (its page unmounted) before the attempt started.
    #[error("the form is no longer available")]
    Detached,
}

/// Email/password pair that passed local validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Validate sign-up input: email present, passwords match, minimum length.
///
/// # Errors
///
/// Returns the first failing check in that order.
pub fn validate_sign_up(email: &str, password: &str, confirm_password: &str) -> Result<Credentials, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

/// Validate sign-in input: both fields present.
///
/// # Errors
///
/// Returns `MissingEmail` or `MissingPassword`.
pub fn validate_sign_in(email: &str, password: &str) -> Result<Credentials, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

/// Holds the form's `submitting` flag for the duration of one attempt.
///
/// Clearing happens in `Drop`, so the flag is released on success, on
/// failure, and when the owning future is dropped mid-flight.
struct SubmitGuard<'a, F: FormSlot> {
    form: &'a F,
}

impl<'a, F: FormSlot> SubmitGuard<'a, F> {
    /// Mark the form as submitting and return the fields to submit.
    fn acquire(form: &'a F) -> Result<(Self, AuthFormState), AuthError> {
        let mut state = form.get().ok_or(AuthError::Detached)?;
        if state.submitting {
            return Err(AuthError::Busy);
        }
        state.submitting = true;
        state.message = None;
        form.set(state.clone());
        Ok((Self { form }, state))
    }

    fn succeed(self) {
        self.form.update(|state| state.reset());
    }

    fn fail(self, err: &AuthError) {
        let message = match err {
            AuthError::Gateway(GatewayError::Cancelled) => FormMessage::notice(CANCELLED_NOTICE),
            other => FormMessage::error(other.to_string()),
        };
        self.form.update(|state| state.message = Some(message));
    }
}

impl<F: FormSlot> Drop for SubmitGuard<'_, F> {
    fn drop(&mut self) {
        self.form.update(|state| state.submitting = false);
    }
}

#[derive(Clone, Copy)]
enum Submission {
    SignUp,
    SignIn,
    Federated,
}

impl Submission {
    fn label(self) -> &'static str {
        match self {
            Self::SignUp => "sign-up",
            Self::SignIn => "sign-in",
            Self::Federated => "federated sign-in",
        }
    }
}

/// Navigation sink. Receives the route to open after an auth transition.
pub type Navigate = Arc<dyn Fn(&str) + Send + Sync>;

/// Auth flow controller for one screen.
#[derive(Clone)]
pub struct AuthFlow {
    gateway: Arc<dyn CredentialGateway>,
    session: SessionStore,
    navigate: Navigate,
    persistence: PersistenceMode,
    success_route: String,
}

impl AuthFlow {
    pub fn new(gateway: Arc<dyn CredentialGateway>, session: SessionStore, navigate: Navigate) -> Self {
        Self {
            gateway,
            session,
            navigate,
            persistence: PersistenceMode::default(),
            success_route: DEFAULT_SUCCESS_ROUTE.to_owned(),
        }
    }

    #[must_use]
    pub fn with_persistence(mut self, mode: PersistenceMode) -> Self {
        self.persistence = mode;
        self
    }

    #[must_use]
    pub fn with_success_route(mut self, route: impl Into<String>) -> Self {
        self.success_route = route.into();
        self
    }

    pub fn success_route(&self) -> &str {
        &self.success_route
    }

    /// Create an account from the form's email, password, and confirmation.
    ///
    /// # Errors
    ///
    /// `Busy` if a submission is in flight, `Validation` before any gateway
    /// call, or `Gateway` with the provider's failure.
    pub async fn sign_up<F: FormSlot>(&self, form: &F) -> Result<Identity, AuthError> {
        self.submit(form, Submission::SignUp).await
    }

    /// Sign in with the form's email and password.
    ///
    /// # Errors
    ///
    /// Same as [`AuthFlow::sign_up`], without the confirmation check.
    pub async fn sign_in<F: FormSlot>(&self, form: &F) -> Result<Identity, AuthError> {
        self.submit(form, Submission::SignIn).await
    }

    /// Sign in through the provider popup. Form fields are not read.
    ///
    /// # Errors
    ///
    /// `Busy`, or `Gateway` (including `GatewayError::Cancelled` when the user
    /// closes the popup).
    pub async fn sign_in_with_provider<F: FormSlot>(&self, form: &F) -> Result<Identity, AuthError> {
        self.submit(form, Submission::Federated).await
    }

    /// Sign out at the provider, clear the session, and return home.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; the session is left untouched in that case.
    pub async fn sign_out(&self) -> Result<(), GatewayError> {
        if let Err(e) = self.gateway.sign_out().await {
            log::warn!("sign-out failed: {e}");
            return Err(e);
        }
        // Home is queued before the session clears so route guards woken by
        // the clear see a flow-owned navigation.
        (self.navigate)(SIGNED_OUT_ROUTE);
        self.session.clear();
        Ok(())
    }

    async fn submit<F: FormSlot>(&self, form: &F, kind: Submission) -> Result<Identity, AuthError> {
        let (guard, snapshot) = SubmitGuard::acquire(form)?;

        let outcome = match kind {
            Submission::SignUp => {
                match validate_sign_up(&snapshot.email, &snapshot.password, &snapshot.confirm_password) {
                    Ok(creds) => {
                        self.gateway.set_persistence(self.persistence);
                        self.gateway
                            .create_account(&creds.email, &creds.password)
                            .await
                            .map_err(AuthError::from)
                    }
                    Err(e) => Err(e.into()),
                }
            }
            Submission::SignIn => match validate_sign_in(&snapshot.email, &snapshot.password) {
                Ok(creds) => {
                    self.gateway.set_persistence(self.persistence);
                    self.gateway
                        .sign_in(&creds.email, &creds.password)
                        .await
                        .map_err(AuthError::from)
                }
                Err(e) => Err(e.into()),
            },
            Submission::Federated => {
                self.gateway.set_persistence(self.persistence);
                self.gateway
                    .sign_in_with_federated_provider()
                    .await
                    .map_err(AuthError::from)
            }
        };

        match outcome {
            Ok(identity) => {
                log::info!("{} succeeded for uid={}", kind.label(), identity.uid);
                guard.succeed();
                self.session.apply_external_update(Some(identity.clone()));
                (self.navigate)(&self.success_route);
                Ok(identity)
            }
            Err(err) => {
                match &err {
                    AuthError::Validation(v) => log::debug!("{} rejected locally: {v}", kind.label()),
                    AuthError::Gateway(GatewayError::Cancelled) => log::debug!("{} cancelled by user", kind.label()),
                    other => log::warn!("{} failed: {other}", kind.label()),
                }
                guard.fail(&err);
                Err(err)
            }
        }
    }
}
