use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_to_all_interfaces_on_port_3000() {
    let config = HostConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
}

#[test]
fn port_overrides_default() {
    let config = HostConfig::from_lookup(lookup(&[("PORT", "8080")])).unwrap();
    assert_eq!(config.bind_addr.port(), 8080);
}

#[test]
fn bind_addr_takes_precedence_over_port() {
    let config =
        HostConfig::from_lookup(lookup(&[("PORT", "8080"), ("SIMPLIFIED_BIND_ADDR", "127.0.0.1:4000")])).unwrap();
    assert_eq!(config.bind_addr, "127.0.0.1:4000".parse().unwrap());
}

#[test]
fn blank_values_are_treated_as_unset() {
    let config = HostConfig::from_lookup(lookup(&[("PORT", "  "), ("SIMPLIFIED_BIND_ADDR", "")])).unwrap();
    assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
}

#[test]
fn malformed_port_is_rejected() {
    let err = HostConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPort { ref value } if value == "http"));
    assert_eq!(err.to_string(), "invalid PORT \"http\"");
}

#[test]
fn malformed_bind_addr_is_rejected() {
    let err = HostConfig::from_lookup(lookup(&[("SIMPLIFIED_BIND_ADDR", "localhost")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
}
