use super::*;

fn identity(email: Option<&str>, display_name: Option<&str>) -> Identity {
    Identity {
        uid: "uid-1".to_owned(),
        email: email.map(str::to_owned),
        display_name: display_name.map(str::to_owned),
    }
}

#[test]
fn greeting_uses_email_when_present() {
    let who = identity(Some("ada@example.com"), Some("Ada"));
    assert_eq!(greeting(Some(&who)), "Welcome back, ada@example.com!");
}

#[test]
fn greeting_falls_back_to_display_name_then_uid() {
    assert_eq!(greeting(Some(&identity(None, Some("Ada")))), "Welcome back, Ada!");
    assert_eq!(greeting(Some(&identity(None, None))), "Welcome back, uid-1!");
}

#[test]
fn greeting_without_identity_is_generic() {
    assert_eq!(greeting(None), "Welcome back!");
}
