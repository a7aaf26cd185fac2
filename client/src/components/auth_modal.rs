//! Sign-in / sign-up dialog opened from the landing page.

#[cfg(test)]
#[path = "auth_modal_test.rs"]
mod auth_modal_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::app::AuthServices;
use crate::components::auth_fields::{
    EmailField, FormMessageBanner, GoogleButton, PasswordField, PasswordSlot, submit_label,
};
use crate::state::auth_flow::Navigate;
use crate::state::auth_form::{AuthFormState, FormMode};

pub fn heading(mode: FormMode) -> &'static str {
    match mode {
        FormMode::SignIn => "Welcome Back",
        FormMode::SignUp => "Create Your Account",
    }
}

/// Prompt and link caption offered for switching to the other mode.
pub fn switch_prompt(mode: FormMode) -> (&'static str, &'static str) {
    match mode {
        FormMode::SignIn => ("Don't have an account?", "Sign Up"),
        FormMode::SignUp => ("Already have an account?", "Sign In"),
    }
}

/// Modal auth form. Closes itself before navigating on success.
#[component]
pub fn AuthModal(open: RwSignal<bool>, mode: RwSignal<FormMode>) -> impl IntoView {
    let services = expect_context::<AuthServices>();
    let form = RwSignal::new(AuthFormState::default());

    let navigation = services.navigation;
    let navigate: Navigate = Arc::new(move |path: &str| {
        open.set(false);
        navigation.request(path);
    });
    let flow = services.flow_with(navigate);

    let close = move || {
        if !form.with_untracked(|f| f.submitting) {
            open.set(false);
            form.update(AuthFormState::reset);
        }
    };

    let on_toggle_mode = move |_: leptos::ev::MouseEvent| {
        if form.with_untracked(|f| f.submitting) {
            return;
        }
        mode.update(|m| *m = m.toggled());
        form.update(AuthFormState::reset);
    };

    let submit_flow = flow.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        #[cfg(feature = "hydrate")]
        {
            let flow = submit_flow.clone();
            let current = mode.get_untracked();
            leptos::task::spawn_local(async move {
                let _ = match current {
                    FormMode::SignIn => flow.sign_in(&form).await,
                    FormMode::SignUp => flow.sign_up(&form).await,
                };
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &submit_flow;
        }
    };

    let on_google = Callback::new(move |()| {
        #[cfg(feature = "hydrate")]
        {
            let flow = flow.clone();
            leptos::task::spawn_local(async move {
                let _ = flow.sign_in_with_provider(&form).await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &flow;
        }
    });

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            close();
        }
    };

    move || {
        open.get().then(|| {
            view! {
                <div class="dialog-backdrop" on:click=move |_| close()>
                    <div
                        class="dialog dialog--auth"
                        role="dialog"
                        aria-modal="true"
                        tabindex="0"
                        on:click=move |ev| ev.stop_propagation()
                        on:keydown=on_keydown
                    >
                        <button class="dialog__close" type="button" aria-label="Close" on:click=move |_| close()>
                            "×"
                        </button>
                        <h2>{move || heading(mode.get())}</h2>

                        <GoogleButton form=form on_click=on_google/>
                        <div class="auth-divider"><span>"or"</span></div>

                        <form class="auth-form" on:submit=on_submit.clone()>
                            <EmailField form=form/>
                            <PasswordField form=form field=PasswordSlot::Password/>
                            <Show when=move || mode.get() == FormMode::SignUp>
                                <PasswordField form=form field=PasswordSlot::Confirm/>
                            </Show>
                            <FormMessageBanner form=form/>
                            <button
                                class="auth-form__submit"
                                type="submit"
                                disabled=move || form.with(|f| f.submitting)
                            >
                                {move || submit_label(mode.get(), form.with(|f| f.submitting))}
                            </button>
                        </form>

                        <p class="auth-switch">
                            {move || switch_prompt(mode.get()).0}
                            " "
                            <button
                                class="auth-switch__link"
                                type="button"
                                disabled=move || form.with(|f| f.submitting)
                                on:click=on_toggle_mode
                            >
                                {move || switch_prompt(mode.get()).1}
                            </button>
                        </p>
                    </div>
                </div>
            }
        })
    }
}
