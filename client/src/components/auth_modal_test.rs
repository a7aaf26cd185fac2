use super::*;

#[test]
fn heading_follows_mode() {
    assert_eq!(heading(FormMode::SignIn), "Welcome Back");
    assert_eq!(heading(FormMode::SignUp), "Create Your Account");
}

#[test]
fn switch_prompt_offers_the_other_mode() {
    assert_eq!(switch_prompt(FormMode::SignIn).1, "Sign Up");
    assert_eq!(switch_prompt(FormMode::SignUp).1, "Sign In");
    assert_eq!(switch_prompt(FormMode::SignIn.toggled()), switch_prompt(FormMode::SignUp));
}
