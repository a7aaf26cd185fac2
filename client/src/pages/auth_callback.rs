//! Landing route for the Google sign-in popup.
//!
//! The opener window reads the token from this page's URL fragment and
//! closes the popup, so the page only needs to render a placeholder.

use leptos::prelude::*;

#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    view! {
        <div class="auth-callback">
            <p>"Completing sign-in..."</p>
            <p class="auth-callback__hint">
                "If this window stays open, close it and return to "
                <a href="/">"SimplifiED"</a>
                "."
            </p>
        </div>
    }
}
