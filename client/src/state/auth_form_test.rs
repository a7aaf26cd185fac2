use leptos::prelude::Dispose;

use super::*;

#[test]
fn form_mode_toggles_both_ways() {
    assert_eq!(FormMode::default(), FormMode::SignIn);
    assert_eq!(FormMode::SignIn.toggled(), FormMode::SignUp);
    assert_eq!(FormMode::SignUp.toggled(), FormMode::SignIn);
}

#[test]
fn error_message_ignores_notices() {
    let mut form = AuthFormState { message: Some(FormMessage::notice("Sign-in was cancelled.")), ..Default::default() };
    assert_eq!(form.error_message(), None);

    form.message = Some(FormMessage::error("Passwords do not match"));
    assert_eq!(form.error_message(), Some("Passwords do not match"));
}

#[test]
fn reset_clears_fields_and_message_but_keeps_flag() {
    let mut form = AuthFormState {
        email: "a@b.com".to_owned(),
        password: "secret".to_owned(),
        confirm_password: "secret".to_owned(),
        message: Some(FormMessage::error("boom")),
        submitting: true,
    };
    form.reset();
    assert_eq!(form, AuthFormState { submitting: true, ..Default::default() });

    form.submitting = false;
    form.reset();
    assert_eq!(form, AuthFormState::default());
}

#[test]
fn refcell_slot_update_applies_in_place() {
    let slot = RefCell::new(AuthFormState::default());
    slot.update(|f| f.email = "a@b.com".to_owned());
    assert_eq!(FormSlot::get(&slot).unwrap().email, "a@b.com");
}

#[test]
fn signal_slot_reads_and_writes_while_alive() {
    let slot = RwSignal::new(AuthFormState::default());
    FormSlot::update(&slot, |f| f.email = "a@b.com".to_owned());
    assert_eq!(FormSlot::get(&slot).unwrap().email, "a@b.com");
}

#[test]
fn disposed_signal_slot_reads_none_and_drops_writes() {
    let slot = RwSignal::new(AuthFormState::default());
    slot.dispose();
    assert_eq!(FormSlot::get(&slot), None);
    FormSlot::set(&slot, AuthFormState { submitting: true, ..Default::default() });
    FormSlot::update(&slot, |f| f.submitting = false);
    assert_eq!(FormSlot::get(&slot), None);
}
