//! Shared auth routing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes must apply identical unauthenticated redirect behavior,
//! and must not redirect before the initial session check has resolved.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::Session;

/// Where signed-out visitors are sent when opening a protected route.
pub const UNAUTHENTICATED_REDIRECT: &str = "/signup";

/// Outcome of evaluating a protected route against the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the protected view.
    Allow,
    /// Navigate away to the given path.
    Redirect(&'static str),
    /// Session not restored yet; render a neutral loading state.
    Pending,
}

/// Decide access to a protected route. Deterministic and side-effect free.
pub fn decide(session: &Session) -> RouteDecision {
    if session.identity.is_some() {
        RouteDecision::Allow
    } else if session.resolved {
        RouteDecision::Redirect(UNAUTHENTICATED_REDIRECT)
    } else {
        RouteDecision::Pending
    }
}

/// App-wide queue of routes requested by auth flows.
///
/// Auth flows hold only `Send + Sync` handles and the router's navigate
/// closure is neither, so the route travels through a signal owned by `App`.
/// It outlives every page, so a request survives the requesting view being
/// unmounted.
#[derive(Clone, Copy)]
pub struct NavigationRequests {
    pending: RwSignal<Option<String>>,
    issued: RwSignal<u64>,
}

impl NavigationRequests {
    pub fn new() -> Self {
        Self { pending: RwSignal::new(None), issued: RwSignal::new(0) }
    }

    /// Queue `path`. The latest request wins if several land before the
    /// navigation effect runs.
    pub fn request(&self, path: &str) {
        let _ = self.issued.try_update_untracked(|n| *n += 1);
        self.pending.set(Some(path.to_owned()));
    }

    /// Number of requests made so far.
    pub fn issued(&self) -> u64 {
        self.issued.try_get_untracked().unwrap_or(0)
    }

    /// Route waiting for the navigation effect, if any.
    pub fn pending(&self) -> Option<String> {
        self.pending.try_get_untracked().flatten()
    }

    /// Navigate whenever a route is queued. Must run inside `<Router>`.
    pub fn install(self) {
        let navigate = use_navigate();
        let pending = self.pending;
        Effect::new(move || {
            if let Some(path) = pending.get() {
                pending.set(None);
                navigate(&path, NavigateOptions::default());
            }
        });
    }
}

impl Default for NavigationRequests {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a protected route mounted when `mounted_at` requests had been
/// issued may send the visitor to the sign-up page itself. Once an auth flow
/// has asked for a route (sign-out going home), that request owns the
/// navigation and the guard stands down.
pub fn guard_may_redirect(mounted_at: u64, issued_now: u64) -> bool {
    issued_now == mounted_at
}
