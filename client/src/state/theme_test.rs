use super::*;

#[test]
fn theme_state_default_is_light() {
    let theme = ThemeState::default();
    assert!(!theme.dark);
    assert_eq!(theme.class(), "theme-light");
}

#[test]
fn theme_state_labels_follow_mode() {
    let dark = ThemeState { dark: true };
    assert_eq!(dark.class(), "theme-dark");
    assert_eq!(dark.toggle_label(), "Switch to light mode");
    assert_eq!(ThemeState::default().toggle_label(), "Switch to dark mode");
}
