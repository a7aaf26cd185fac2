//! Form pieces shared by the login page, signup page, and landing modal.

#[cfg(test)]
#[path = "auth_fields_test.rs"]
mod auth_fields_test;

use leptos::prelude::*;

use crate::state::auth_form::{AuthFormState, FormMessage, FormMode, MessageKind};

/// Submit button caption for `mode`, switching while a request is running.
pub fn submit_label(mode: FormMode, submitting: bool) -> &'static str {
    match (mode, submitting) {
        (FormMode::SignIn, false) => "Sign In",
        (FormMode::SignIn, true) => "Signing In...",
        (FormMode::SignUp, false) => "Create Account",
        (FormMode::SignUp, true) => "Creating Account...",
    }
}

pub fn message_class(message: &FormMessage) -> &'static str {
    match message.kind {
        MessageKind::Error => "auth-message auth-message--error",
        MessageKind::Notice => "auth-message auth-message--notice",
    }
}

/// Email input bound to `form.email`.
#[component]
pub fn EmailField(form: RwSignal<AuthFormState>) -> impl IntoView {
    view! {
        <label class="auth-field">
            <span class="auth-field__label">"Email Address"</span>
            <input
                class="auth-field__input"
                type="email"
                required=true
                autocomplete="email"
                placeholder="you@example.com"
                prop:value=move || form.with(|f| f.email.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| f.email = value);
                }
            />
        </label>
    }
}

/// Which password field a `PasswordField` edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordSlot {
    Password,
    Confirm,
}

impl PasswordSlot {
    /// Visible label and `autocomplete` hint for the input.
    pub fn label_and_autocomplete(self) -> (&'static str, &'static str) {
        match self {
            PasswordSlot::Password => ("Password", "current-password"),
            PasswordSlot::Confirm => ("Confirm Password", "new-password"),
        }
    }
}

/// Password input with a show/hide toggle.
#[component]
pub fn PasswordField(
    form: RwSignal<AuthFormState>,
    field: PasswordSlot,
    #[prop(optional)] hint: Option<&'static str>,
) -> impl IntoView {
    let visible = RwSignal::new(false);
    let (label, autocomplete) = field.label_and_autocomplete();

    view! {
        <label class="auth-field">
            <span class="auth-field__label">{label}</span>
            <span class="auth-field__row">
                <input
                    class="auth-field__input"
                    type=move || if visible.get() { "text" } else { "password" }
                    required=true
                    autocomplete=autocomplete
                    placeholder="••••••••"
                    prop:value=move || {
                        form.with(|f| match field {
                            PasswordSlot::Password => f.password.clone(),
                            PasswordSlot::Confirm => f.confirm_password.clone(),
                        })
                    }
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| match field {
                            PasswordSlot::Password => f.password = value,
                            PasswordSlot::Confirm => f.confirm_password = value,
                        });
                    }
                />
                <button
                    class="auth-field__reveal"
                    type="button"
                    on:click=move |_| visible.update(|v| *v = !*v)
                >
                    {move || if visible.get() { "Hide" } else { "Show" }}
                </button>
            </span>
            {hint.map(|text| view! { <span class="auth-field__hint">{text}</span> })}
        </label>
    }
}

/// Error or notice left by the last submission.
#[component]
pub fn FormMessageBanner(form: RwSignal<AuthFormState>) -> impl IntoView {
    move || {
        form.with(|f| f.message.clone()).map(|message| {
            let class = message_class(&message);
            view! {
                <div class=class role="alert">
                    {message.text}
                </div>
            }
        })
    }
}

/// "Continue with Google" button. `on_click` starts the popup flow.
#[component]
pub fn GoogleButton(form: RwSignal<AuthFormState>, on_click: Callback<()>) -> impl IntoView {
    view! {
        <button
            class="auth-google"
            type="button"
            disabled=move || form.with(|f| f.submitting)
            on:click=move |_| on_click.run(())
        >
            <span class="auth-google__mark" aria-hidden="true">"G"</span>
            {move || if form.with(|f| f.submitting) { "Signing in..." } else { "Continue with Google" }}
        </button>
    }
}
