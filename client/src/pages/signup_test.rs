use super::*;
use crate::state::auth_flow::MIN_PASSWORD_LEN;

#[test]
fn password_hint_matches_enforced_minimum() {
    assert!(PASSWORD_HINT.contains(&MIN_PASSWORD_LEN.to_string()));
}
