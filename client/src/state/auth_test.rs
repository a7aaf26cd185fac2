use std::sync::{Arc, Mutex};

use super::*;

fn user(uid: &str) -> Identity {
    Identity { uid: uid.to_owned(), email: Some(format!("{uid}@example.com")), display_name: None }
}

fn recorder(store: &SessionStore) -> (Arc<Mutex<Vec<Session>>>, Subscription) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let sub = store.subscribe(move |session| sink.lock().unwrap().push(session.clone()));
    (seen, sub)
}

// =============================================================
// Session defaults
// =============================================================

#[test]
fn session_default_is_unresolved_without_identity() {
    let session = Session::default();
    assert!(session.identity.is_none());
    assert!(!session.resolved);
    assert_eq!(session.status(), SessionStatus::Unknown);
}

#[test]
fn session_status_distinguishes_signed_out_from_unknown() {
    let signed_out = Session { identity: None, resolved: true };
    assert_eq!(signed_out.status(), SessionStatus::SignedOut);

    let signed_in = Session { identity: Some(user("u1")), resolved: true };
    assert_eq!(signed_in.status(), SessionStatus::SignedIn);
    assert!(signed_in.is_signed_in());
}

// =============================================================
// Store mutations
// =============================================================

#[test]
fn external_update_resolves_and_sets_identity() {
    let store = SessionStore::new();
    store.apply_external_update(Some(user("u1")));
    let session = store.snapshot();
    assert!(session.resolved);
    assert_eq!(session.identity, Some(user("u1")));
}

#[test]
fn external_update_with_none_resolves_signed_out() {
    let store = SessionStore::new();
    let (seen, _sub) = recorder(&store);
    store.apply_external_update(None);
    assert_eq!(store.snapshot().status(), SessionStatus::SignedOut);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn unchanged_update_does_not_notify() {
    let store = SessionStore::new();
    store.apply_external_update(Some(user("u1")));
    let (seen, _sub) = recorder(&store);
    store.apply_external_update(Some(user("u1")));
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn clear_drops_identity_but_stays_resolved() {
    let store = SessionStore::new();
    store.apply_external_update(Some(user("u1")));
    store.clear();
    let session = store.snapshot();
    assert!(session.resolved);
    assert!(session.identity.is_none());
}

// =============================================================
// Subscribe / notify
// =============================================================

#[test]
fn listeners_run_in_subscription_order() {
    let store = SessionStore::new();
    let order = Arc::new(Mutex::new(Vec::new()));
    let first = Arc::clone(&order);
    let second = Arc::clone(&order);
    let _a = store.subscribe(move |_| first.lock().unwrap().push("a"));
    let _b = store.subscribe(move |_| second.lock().unwrap().push("b"));

    store.apply_external_update(Some(user("u1")));
    assert_eq!(*order.lock().unwrap(), vec!["a", "b"]);
}

#[test]
fn listener_sees_fully_applied_session_and_can_read_store() {
    let store = SessionStore::new();
    let reader = store.clone();
    let observed = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&observed);
    let _sub = store.subscribe(move |session| {
        *sink.lock().unwrap() = Some((session.clone(), reader.snapshot()));
    });

    store.apply_external_update(Some(user("u2")));
    let (passed, read) = observed.lock().unwrap().clone().unwrap();
    assert_eq!(passed, read);
    assert!(passed.resolved);
    assert_eq!(passed.identity, Some(user("u2")));
}

#[test]
fn unsubscribe_twice_is_harmless_and_stops_notifications() {
    let store = SessionStore::new();
    let (seen, sub) = recorder(&store);
    store.apply_external_update(None);
    sub.unsubscribe();
    sub.unsubscribe();
    assert!(!sub.is_active());

    store.apply_external_update(Some(user("u1")));
    store.clear();
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn unsubscribe_during_notification_skips_later_listener() {
    let store = SessionStore::new();
    let late_calls = Arc::new(Mutex::new(0));
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

    let slot_for_first = Arc::clone(&slot);
    let _first = store.subscribe(move |_| {
        if let Some(sub) = slot_for_first.lock().unwrap().as_ref() {
            sub.unsubscribe();
        }
    });
    let counter = Arc::clone(&late_calls);
    let second = store.subscribe(move |_| *counter.lock().unwrap() += 1);
    *slot.lock().unwrap() = Some(second);

    store.apply_external_update(Some(user("u1")));
    assert_eq!(*late_calls.lock().unwrap(), 0);
}

#[test]
fn dropping_subscription_keeps_listener() {
    let store = SessionStore::new();
    let (seen, sub) = recorder(&store);
    drop(sub);
    store.apply_external_update(None);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn unsubscribe_after_store_dropped_is_noop() {
    let store = SessionStore::new();
    let (_seen, sub) = recorder(&store);
    drop(store);
    sub.unsubscribe();
    assert!(!sub.is_active());
}
