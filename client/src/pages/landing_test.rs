use super::*;

#[test]
fn signed_in_visitors_go_straight_to_dashboard() {
    let action = hero_action(SessionStatus::SignedIn);
    assert_eq!(action, HeroAction::GoToDashboard);
    assert_eq!(action.label(), "Go to Dashboard");
}

#[test]
fn everyone_else_gets_the_sign_up_modal() {
    for status in [SessionStatus::Unknown, SessionStatus::SignedOut] {
        let action = hero_action(status);
        assert_eq!(action, HeroAction::OpenAuthModal(FormMode::SignUp));
        assert_eq!(action.label(), "Try SimplifiED Now");
    }
}

#[test]
fn feature_titles_are_unique_and_nonempty() {
    let mut titles: Vec<_> = FEATURES.iter().map(|f| f.title).collect();
    assert!(titles.iter().all(|t| !t.is_empty()));
    titles.sort_unstable();
    titles.dedup();
    assert_eq!(titles.len(), FEATURES.len());
}
