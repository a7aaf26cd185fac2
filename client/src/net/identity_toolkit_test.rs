use futures::executor::block_on;

use super::*;

fn configured() -> GatewayConfig {
    GatewayConfig::from_values(Some("k123"), Some("client.apps"), None, None)
}

// =============================================================
// Wire parsing
// =============================================================

#[test]
fn auth_response_maps_to_credential() {
    let body = r#"{
        "localId": "u1",
        "idToken": "id-tok",
        "refreshToken": "refresh-tok",
        "email": "a@b.com",
        "expiresIn": "3600"
    }"#;
    let response: AuthResponse = serde_json::from_str(body).unwrap();
    let credential = response.into_credential(1_000.0);
    assert_eq!(credential.identity.uid, "u1");
    assert_eq!(credential.identity.email.as_deref(), Some("a@b.com"));
    assert_eq!(credential.identity.display_name, None);
    assert_eq!(credential.id_token, "id-tok");
    assert!((credential.expires_at_ms - 3_601_000.0).abs() < f64::EPSILON);
}

#[test]
fn auth_response_drops_empty_profile_fields() {
    let body = r#"{"localId":"u1","idToken":"t","refreshToken":"r","email":"","displayName":""}"#;
    let response: AuthResponse = serde_json::from_str(body).unwrap();
    let credential = response.into_credential(0.0);
    assert_eq!(credential.identity.email, None);
    assert_eq!(credential.identity.display_name, None);
}

#[test]
fn refresh_response_uses_snake_case_fields() {
    let body = r#"{"id_token":"t2","refresh_token":"r2","expires_in":"60"}"#;
    let response: RefreshResponse = serde_json::from_str(body).unwrap();
    assert_eq!(response.id_token, "t2");
    assert_eq!(response.refresh_token, "r2");
    assert_eq!(response.expires_in.as_deref(), Some("60"));
}

#[test]
fn expiry_defaults_to_one_hour_on_bad_input() {
    assert!((expiry_from(Some("soon"), 0.0) - 3_600_000.0).abs() < f64::EPSILON);
    assert!((expiry_from(None, 0.0) - 3_600_000.0).abs() < f64::EPSILON);
}

#[test]
fn stored_credential_expires_with_skew() {
    let credential = StoredCredential {
        identity: Identity { uid: "u1".to_owned(), email: None, display_name: None },
        id_token: "t".to_owned(),
        refresh_token: "r".to_owned(),
        expires_at_ms: 100_000.0,
    };
    assert!(!credential.is_expired(0.0));
    assert!(credential.is_expired(80_000.0));
}

// =============================================================
// Error mapping
// =============================================================

#[test]
fn split_error_code_separates_detail() {
    assert_eq!(
        split_error_code("WEAK_PASSWORD : Password should be at least 6 characters"),
        ("WEAK_PASSWORD", Some("Password should be at least 6 characters"))
    );
    assert_eq!(split_error_code("EMAIL_EXISTS"), ("EMAIL_EXISTS", None));
}

#[test]
fn provider_message_translates_known_codes() {
    assert_eq!(provider_message("EMAIL_EXISTS", None), "The email address is already in use by another account.");
    assert_eq!(provider_message("INVALID_LOGIN_CREDENTIALS", None), "Incorrect email or password.");
}

#[test]
fn provider_message_passes_unknown_codes_through() {
    assert_eq!(provider_message("QUOTA_EXCEEDED", None), "QUOTA_EXCEEDED");
    assert_eq!(provider_message("QUOTA_EXCEEDED", Some("slow down")), "QUOTA_EXCEEDED: slow down");
}

#[test]
fn rejection_from_body_reads_error_envelope() {
    let body = r#"{"error":{"code":400,"message":"EMAIL_NOT_FOUND","errors":[]}}"#;
    assert_eq!(
        rejection_from_body(400, body),
        GatewayError::rejected("EMAIL_NOT_FOUND", "Incorrect email or password.")
    );
}

#[test]
fn rejection_from_body_falls_back_to_transport_error() {
    assert_eq!(
        rejection_from_body(502, "<html>bad gateway</html>"),
        GatewayError::Transport("identity request failed: 502".to_owned())
    );
}

// =============================================================
// Endpoints and popup
// =============================================================

#[test]
fn accounts_endpoint_includes_method_and_key() {
    assert_eq!(
        accounts_endpoint(&configured(), "signUp"),
        "https://identitytoolkit.googleapis.com/v1/accounts:signUp?key=k123"
    );
    assert_eq!(token_endpoint(&configured()), "https://securetoken.googleapis.com/v1/token?key=k123");
}

#[test]
fn google_consent_url_encodes_redirect_and_scope() {
    let url = google_consent_url("client.apps", "https://app.test/auth/callback", "n1").unwrap();
    assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
    assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.test%2Fauth%2Fcallback"));
    assert!(url.contains("response_type=id_token"));
    assert!(url.contains("scope=openid+email+profile"));
    assert!(url.contains("state=n1"));
}

#[test]
fn popup_fragment_yields_token_for_matching_state() {
    assert_eq!(
        parse_popup_fragment("#id_token=abc.def&state=n1&authuser=0", "n1"),
        Some(PopupFragment::Token("abc.def".to_owned()))
    );
}

#[test]
fn popup_fragment_ignores_foreign_state_and_empty_hash() {
    assert_eq!(parse_popup_fragment("#id_token=abc&state=other", "n1"), None);
    assert_eq!(parse_popup_fragment("", "n1"), None);
    assert_eq!(parse_popup_fragment("#state=n1", "n1"), None);
}

#[test]
fn popup_fragment_reports_denial() {
    assert_eq!(
        parse_popup_fragment("#error=access_denied&state=n1", "n1"),
        Some(PopupFragment::Denied("access_denied".to_owned()))
    );
}

#[test]
fn idp_post_body_names_google_provider() {
    assert_eq!(idp_post_body("a.b"), "id_token=a.b&providerId=google.com");
}

// =============================================================
// Gateway outside the browser
// =============================================================

#[test]
fn unconfigured_gateway_rejects_before_network() {
    let gateway = IdentityToolkitGateway::new(GatewayConfig::default());
    let err = block_on(gateway.sign_in("a@b.com", "pw")).unwrap_err();
    assert_eq!(err, not_configured());
}

#[test]
fn configured_gateway_is_unavailable_without_browser() {
    let gateway = IdentityToolkitGateway::new(configured());
    assert_eq!(block_on(gateway.create_account("a@b.com", "abcdef")), Err(GatewayError::Unavailable));
    assert_eq!(block_on(gateway.sign_in_with_federated_provider()), Err(GatewayError::Unavailable));
}

#[test]
fn set_persistence_is_remembered() {
    let gateway = IdentityToolkitGateway::new(configured());
    assert_eq!(gateway.persistence(), PersistenceMode::Local);
    gateway.set_persistence(PersistenceMode::Session);
    assert_eq!(gateway.persistence(), PersistenceMode::Session);
}

#[test]
fn sign_out_notifies_registered_listeners() {
    let gateway = IdentityToolkitGateway::new(configured());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    gateway.on_session_change(Box::new(move |identity| sink.lock().unwrap().push(identity)));

    block_on(gateway.sign_out()).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![None]);
}
