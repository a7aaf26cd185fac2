use super::*;

#[test]
fn from_values_uses_defaults_when_absent() {
    let config = GatewayConfig::from_values(None, None, None, None);
    assert_eq!(config, GatewayConfig::default());
    assert!(!config.is_configured());
}

#[test]
fn from_values_trims_keys_and_parses_options() {
    let config = GatewayConfig::from_values(Some(" key "), Some("client.apps"), Some("session"), Some("30"));
    assert_eq!(config.api_key, "key");
    assert_eq!(config.google_client_id, "client.apps");
    assert_eq!(config.persistence, PersistenceMode::Session);
    assert_eq!(config.popup_timeout_secs, 30);
    assert!(config.is_configured());
}

#[test]
fn from_values_ignores_invalid_persistence_and_timeout() {
    let config = GatewayConfig::from_values(Some("key"), None, Some("forever"), Some("0"));
    assert_eq!(config.persistence, PersistenceMode::Local);
    assert_eq!(config.popup_timeout_secs, DEFAULT_POPUP_TIMEOUT_SECS);

    let config = GatewayConfig::from_values(Some("key"), None, None, Some("soon"));
    assert_eq!(config.popup_timeout_secs, DEFAULT_POPUP_TIMEOUT_SECS);
}
