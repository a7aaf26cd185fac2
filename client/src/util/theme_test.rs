#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn parse_preference_accepts_only_booleans() {
    assert_eq!(parse_preference("true"), Some(true));
    assert_eq!(parse_preference(" false "), Some(false));
    assert_eq!(parse_preference("dark"), None);
}

#[test]
fn read_preference_is_false_in_non_hydrate_tests() {
    assert!(!read_preference());
}

#[test]
fn toggle_flips_boolean_value() {
    assert!(toggle(false));
    assert!(!toggle(true));
}

#[test]
fn apply_is_noop_but_callable() {
    apply(false);
    apply(true);
}
