//! Top navigation bar with theme toggle and session-aware links.

use leptos::prelude::*;

use crate::app::AuthServices;
use crate::state::auth::{Session, SessionStatus};
use crate::state::theme::ThemeState;
use crate::util::theme;

#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let theme_state = expect_context::<RwSignal<ThemeState>>();
    let services = expect_context::<AuthServices>();

    let flow = services.flow();
    let signing_out = RwSignal::new(false);

    let on_toggle_theme = move |_: leptos::ev::MouseEvent| {
        let next = theme::toggle(theme_state.get_untracked().dark);
        theme_state.set(ThemeState { dark: next });
    };

    let on_sign_out = move |_: leptos::ev::MouseEvent| {
        if signing_out.get_untracked() {
            return;
        }
        signing_out.set(true);
        #[cfg(feature = "hydrate")]
        {
            let flow = flow.clone();
            leptos::task::spawn_local(async move {
                let _ = flow.sign_out().await;
                signing_out.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &flow;
            signing_out.set(false);
        }
    };

    let status = move || session.with(Session::status);

    view! {
        <nav class="navbar">
            <a href="/" class="navbar__brand">
                <span aria-hidden="true">"📚"</span>
                <span>"SimplifiED"</span>
            </a>
            <div class="navbar__links">
                <a href="/about" class="navbar__link">"About"</a>
                <button
                    class="navbar__theme"
                    type="button"
                    title=move || theme_state.get().toggle_label()
                    on:click=on_toggle_theme
                >
                    {move || if theme_state.get().dark { "☀" } else { "☾" }}
                </button>
                {move || match status() {
                    SessionStatus::Unknown => ().into_any(),
                    SessionStatus::SignedOut => view! {
                        <a href="/login" class="navbar__link">"Sign In"</a>
                        <a href="/signup" class="navbar__link navbar__link--primary">"Sign Up"</a>
                    }
                    .into_any(),
                    SessionStatus::SignedIn => view! {
                        <a href="/dashboard" class="navbar__link">"Dashboard"</a>
                        <button
                            class="navbar__link"
                            type="button"
                            disabled=move || signing_out.get()
                            on:click=on_sign_out.clone()
                        >
                            "Sign Out"
                        </button>
                    }
                    .into_any(),
                }}
            </div>
        </nav>
    }
}
