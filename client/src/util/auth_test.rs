use super::*;
use crate::net::gateway::Identity;

fn identity() -> Identity {
    Identity { uid: "u1".to_owned(), email: Some("a@b.com".to_owned()), display_name: None }
}

#[test]
fn pending_while_unresolved_without_identity() {
    let session = Session { identity: None, resolved: false };
    assert_eq!(decide(&session), RouteDecision::Pending);
}

#[test]
fn redirects_to_signup_when_resolved_and_signed_out() {
    let session = Session { identity: None, resolved: true };
    assert_eq!(decide(&session), RouteDecision::Redirect("/signup"));
}

#[test]
fn allows_when_identity_present() {
    let session = Session { identity: Some(identity()), resolved: true };
    assert_eq!(decide(&session), RouteDecision::Allow);
}

#[test]
fn decision_is_stable_across_calls() {
    let session = Session { identity: None, resolved: true };
    assert_eq!(decide(&session), decide(&session.clone()));
}

#[test]
fn navigation_requests_count_and_keep_latest() {
    let requests = NavigationRequests::new();
    assert_eq!(requests.issued(), 0);
    assert_eq!(requests.pending(), None);

    requests.request("/dashboard");
    requests.request("/");
    assert_eq!(requests.issued(), 2);
    assert_eq!(requests.pending().as_deref(), Some("/"));
}

#[test]
fn guard_redirects_when_no_flow_has_asked_for_a_route() {
    let requests = NavigationRequests::new();
    let mounted_at = requests.issued();
    assert!(guard_may_redirect(mounted_at, requests.issued()));
}

#[test]
fn guard_stands_down_after_sign_out_asks_for_home() {
    let requests = NavigationRequests::new();
    let mounted_at = requests.issued();

    // Sign-out clears the session and queues "/" before the guard re-renders.
    requests.request("/");
    assert!(!guard_may_redirect(mounted_at, requests.issued()));
    assert_eq!(requests.pending().as_deref(), Some("/"));
}
