//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns the process-wide `SessionStore`, wires the credential gateway's
//! session reports into it, and mirrors it into a `RwSignal<Session>` so route
//! guards and navbars re-render on every change.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::protected_route::ProtectedRoute;
use crate::net::config::GatewayConfig;
use crate::net::gateway::{CredentialGateway, PersistenceMode};
use crate::net::identity_toolkit::IdentityToolkitGateway;
use crate::pages::{
    about::AboutPage, auth_callback::AuthCallbackPage, dashboard::DashboardPage, landing::LandingPage,
    login::LoginPage, new_lecture::NewLecturePage, signup::SignupPage,
};
use crate::state::auth::{Session, SessionStore};
use crate::state::auth_flow::{AuthFlow, Navigate};
use crate::state::theme::ThemeState;
use crate::util::auth::NavigationRequests;
use crate::util::theme;

/// Auth collaborators shared through context.
#[derive(Clone)]
pub struct AuthServices {
    pub gateway: Arc<dyn CredentialGateway>,
    pub session: SessionStore,
    pub persistence: PersistenceMode,
    pub navigation: NavigationRequests,
}

impl AuthServices {
    /// Build an `AuthFlow` that queues its routes on the app-wide
    /// navigation requests.
    pub fn flow(&self) -> AuthFlow {
        let navigation = self.navigation;
        self.flow_with(Arc::new(move |path: &str| navigation.request(path)))
    }

    /// Build an `AuthFlow` with a caller-supplied navigate hook.
    pub fn flow_with(&self, navigate: Navigate) -> AuthFlow {
        AuthFlow::new(Arc::clone(&self.gateway), self.session.clone(), navigate).with_persistence(self.persistence)
    }
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides theme and auth contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = GatewayConfig::from_build_env();
    let persistence = config.persistence;
    let gateway: Arc<dyn CredentialGateway> = Arc::new(IdentityToolkitGateway::new(config));
    let store = SessionStore::new();

    let session = RwSignal::new(store.snapshot());
    let bridge = store.subscribe(move |next: &Session| session.set(next.clone()));
    on_cleanup(move || bridge.unsubscribe());

    let feed = store.clone();
    gateway.on_session_change(Box::new(move |identity| feed.apply_external_update(identity)));

    // Server render always starts light; the stored preference loads after hydration.
    let theme_state = RwSignal::new(ThemeState::default());
    Effect::new(move || theme_state.set(ThemeState { dark: theme::read_preference() }));
    Effect::new(move || theme::apply(theme_state.get().dark));

    let navigation = NavigationRequests::new();
    provide_context(AuthServices { gateway, session: store, persistence, navigation });
    provide_context(session);
    provide_context(theme_state);

    view! {
        <Stylesheet id="leptos" href="/pkg/simplified.css"/>
        <Title text="SimplifiED"/>

        <Router>
            <NavigationHost navigation/>
            <div class=move || theme_state.get().class()>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=LandingPage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("signup") view=SignupPage/>
                    <Route path=StaticSegment("about") view=AboutPage/>
                    <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=AuthCallbackPage/>
                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! { <ProtectedRoute><DashboardPage/></ProtectedRoute> }
                    />
                    <Route
                        path=StaticSegment("new-lecture")
                        view=|| view! { <ProtectedRoute><NewLecturePage/></ProtectedRoute> }
                    />
                </Routes>
            </div>
        </Router>
    }
}

/// Performs queued auth navigation. Lives beside `<Routes>` so route changes
/// never dispose it.
#[component]
fn NavigationHost(navigation: NavigationRequests) -> impl IntoView {
    navigation.install();
}
