//! Signed-in home: greeting and the entry point for recording a lecture.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::navbar::Navbar;
use crate::net::gateway::Identity;
use crate::state::auth::Session;

pub fn greeting(identity: Option<&Identity>) -> String {
    match identity {
        Some(identity) => {
            let name = identity.email.as_deref().unwrap_or_else(|| identity.label());
            format!("Welcome back, {name}!")
        }
        None => "Welcome back!".to_owned(),
    }
}

/// Rendered behind `ProtectedRoute`, so an identity is normally present.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();

    view! {
        <div class="dashboard-page">
            <Navbar/>
            <main class="dashboard">
                <h1 class="dashboard__greeting">{move || session.with(|s| greeting(s.identity.as_ref()))}</h1>
                <p class="dashboard__lead">
                    "Record a lecture and SimplifiED will turn it into clear, easy-to-read notes."
                </p>
                <a href="/new-lecture" class="dashboard__action">"Record a New Lecture"</a>
                <section class="dashboard__lectures">
                    <h2>"Your Lectures"</h2>
                    <p class="dashboard__empty">"No lectures yet. Your recordings will appear here."</p>
                </section>
            </main>
        </div>
    }
}
