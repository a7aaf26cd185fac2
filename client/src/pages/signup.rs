//! Account creation page: email, password, and confirmation, or Google.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;

use crate::app::AuthServices;
use crate::components::auth_fields::{
    EmailField, FormMessageBanner, GoogleButton, PasswordField, PasswordSlot, submit_label,
};
use crate::components::navbar::Navbar;
use crate::state::auth_form::{AuthFormState, FormMode};

const PASSWORD_HINT: &str = "At least 6 characters";

#[component]
pub fn SignupPage() -> impl IntoView {
    let services = expect_context::<AuthServices>();
    let form = RwSignal::new(AuthFormState::default());

    let flow = services.flow();

    let submit_flow = flow.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        #[cfg(feature = "hydrate")]
        {
            let flow = submit_flow.clone();
            leptos::task::spawn_local(async move {
                let _ = flow.sign_up(&form).await;
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

    view! {
        <div class="auth-page">
            <Navbar/>
            <div class="auth-card">
                <a href="/" class="auth-card__logo" aria-label="SimplifiED home">"📚"</a>
                <h1>"Create Account"</h1>
                <p class="auth-card__subtitle">"Join SimplifiED to start your learning journey"</p>

                <GoogleButton form=form on_click=on_google/>
                <div class="auth-divider"><span>"or sign up with email"</span></div>

                <form class="auth-form" on:submit=on_submit>
                    <EmailField form=form/>
                    <PasswordField form=form field=PasswordSlot::Password hint=PASSWORD_HINT/>
                    <PasswordField form=form field=PasswordSlot::Confirm/>
                    <FormMessageBanner form=form/>
                    <button class="auth-form__submit" type="submit" disabled=move || form.with(|f| f.submitting)>
                        {move || submit_label(FormMode::SignUp, form.with(|f| f.submitting))}
                    </button>
                </form>

                <p class="auth-switch">
                    "Already have an account? "
                    <a href="/login" class="auth-switch__link">"Sign In"</a>
                </p>
            </div>
        </div>
    }
}
