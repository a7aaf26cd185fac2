//! Route wrapper that gates children on the current session.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::app::AuthServices;
use crate::state::auth::Session;
use crate::util::auth::{RouteDecision, decide, guard_may_redirect};

/// Render `children` only for signed-in users.
///
/// While the initial session check is running a neutral loading state is
/// shown; signed-out visitors are redirected once the check resolves. A
/// signed-out state reached through an auth flow (sign-out) leaves the
/// navigation to that flow.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let navigation = expect_context::<AuthServices>().navigation;
    let mounted_at = navigation.issued();

    move || match session.with(decide) {
        RouteDecision::Redirect(path) if guard_may_redirect(mounted_at, navigation.issued()) => {
            view! { <Redirect path=path/> }.into_any()
        }
        RouteDecision::Pending | RouteDecision::Redirect(_) => view! {
            <div class="route-loading">
                <p>"Loading..."</p>
            </div>
        }
        .into_any(),
        RouteDecision::Allow => children().into_any(),
    }
}
