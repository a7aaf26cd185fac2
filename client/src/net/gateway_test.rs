use super::*;

fn identity(uid: &str, email: Option<&str>, name: Option<&str>) -> Identity {
    Identity {
        uid: uid.to_owned(),
        email: email.map(str::to_owned),
        display_name: name.map(str::to_owned),
    }
}

// =============================================================
// Identity
// =============================================================

#[test]
fn label_prefers_display_name() {
    let id = identity("u1", Some("a@b.com"), Some("Ada"));
    assert_eq!(id.label(), "Ada");
}

#[test]
fn label_falls_back_to_email_then_uid() {
    assert_eq!(identity("u1", Some("a@b.com"), None).label(), "a@b.com");
    assert_eq!(identity("u1", None, None).label(), "u1");
}

#[test]
fn identity_serde_uses_field_names() {
    let id = identity("u1", Some("a@b.com"), None);
    let json = serde_json::to_value(&id).unwrap();
    assert_eq!(json["uid"], "u1");
    assert_eq!(json["email"], "a@b.com");
    assert!(json["display_name"].is_null());
}

// =============================================================
// PersistenceMode
// =============================================================

#[test]
fn persistence_mode_parses_known_spellings() {
    assert_eq!(PersistenceMode::parse("local"), Some(PersistenceMode::Local));
    assert_eq!(PersistenceMode::parse(" SESSION "), Some(PersistenceMode::Session));
    assert_eq!(PersistenceMode::parse("forever"), None);
}

#[test]
fn persistence_mode_defaults_to_local() {
    assert_eq!(PersistenceMode::default(), PersistenceMode::Local);
    assert_eq!(PersistenceMode::Session.as_str(), "session");
}

// =============================================================
// GatewayError
// =============================================================

#[test]
fn rejected_error_displays_provider_message_verbatim() {
    let err = GatewayError::rejected("EMAIL_EXISTS", "The email address is already in use.");
    assert_eq!(err.to_string(), "The email address is already in use.");
    assert!(!err.is_cancellation());
}

#[test]
fn cancelled_error_is_cancellation() {
    assert!(GatewayError::Cancelled.is_cancellation());
    assert!(!GatewayError::Unavailable.is_cancellation());
}
