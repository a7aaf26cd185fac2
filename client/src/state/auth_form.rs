//! Per-screen email/password form state.
//!
//! DESIGN
//! ======
//! The auth flow reads and writes the form through `FormSlot` so the same
//! controller drives a Leptos signal in the views and a plain cell in tests.

#[cfg(test)]
#[path = "auth_form_test.rs"]
mod auth_form_test;

use std::cell::RefCell;

use leptos::prelude::{GetUntracked, RwSignal, Set, Update};

/// Which submission the form currently performs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    SignIn,
    SignUp,
}

impl FormMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// Something the user has to fix or retry.
    Error,
    /// Informational, e.g. a cancelled popup.
    Notice,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl FormMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Error, text: text.into() }
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Notice, text: text.into() }
    }
}

/// Transient form fields plus submission status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthFormState {
    pub email: String,
    pub password: String,
    /// Only read in sign-up mode.
    pub confirm_password: String,
    pub message: Option<FormMessage>,
    pub submitting: bool,
}

impl AuthFormState {
    pub fn error_message(&self) -> Option<&str> {
        self.message
            .as_ref()
            .filter(|m| m.kind == MessageKind::Error)
            .map(|m| m.text.as_str())
    }

    /// Clear fields and message. `submitting` is owned by the attempt in
    /// flight and is left alone.
    pub fn reset(&mut self) {
        *self = Self { submitting: self.submitting, ..Self::default() };
    }
}

/// Storage location for an `AuthFormState`.
///
/// A slot can disappear while a submission is in flight (the page owning the
/// signal unmounted). Reads then return `None` and writes are dropped.
pub trait FormSlot {
    fn get(&self) -> Option<AuthFormState>;
    fn set(&self, state: AuthFormState);

    fn update(&self, apply: impl FnOnce(&mut AuthFormState)) {
        if let Some(mut state) = self.get() {
            apply(&mut state);
            self.set(state);
        }
    }
}

impl FormSlot for RefCell<AuthFormState> {
    fn get(&self) -> Option<AuthFormState> {
        Some(self.borrow().clone())
    }

    fn set(&self, state: AuthFormState) {
        *self.borrow_mut() = state;
    }
}

impl FormSlot for RwSignal<AuthFormState> {
    fn get(&self) -> Option<AuthFormState> {
        self.try_get_untracked()
    }

    fn set(&self, state: AuthFormState) {
        let _ = self.try_set(state);
    }

    fn update(&self, apply: impl FnOnce(&mut AuthFormState)) {
        let _ = self.try_update(apply);
    }
}
