//! Submit lifecycle of a bound form handle.

use std::cell::Cell;

use kiln_forms::auth_schema::{change_password_schema, sign_in_schema, PasswordPolicy};
use kiln_forms::i18n::KeyTranslator;
use kiln_forms::{build, FieldDescriptor, FieldRegistry, FormBuilder, FormHandle, Submission};
use serde_json::{json, Value};

fn sign_in_handle() -> FormHandle {
    FormHandle::new(
        sign_in_schema(&KeyTranslator, &PasswordPolicy::default()),
        json!({"username": "", "password": "", "rememberMe": false}),
    )
}

#[tokio::test]
async fn invalid_submit_does_not_call_back() {
    let handle = sign_in_handle();
    let called = Cell::new(false);
    let flag = &called;

    let outcome = handle.submit(move |_| async move { flag.set(true) }).await;

    assert!(matches!(outcome, Submission::Invalid(_)));
    assert!(!called.get());
    assert_eq!(handle.errors("username"), ["auth.username-required"]);
    assert_eq!(handle.submit_attempts(), 1);
}

#[tokio::test]
async fn valid_submit_passes_accepted_values() {
    let handle = sign_in_handle();
    handle.set_value("username", "ada_l");
    handle.set_value("password", "analytical engine");

    let outcome = handle.submit(|data: Value| async move { data }).await;

    let Submission::Completed(data) = outcome else {
        panic!("expected completion, got {outcome:?}");
    };
    assert_eq!(data["username"], json!("ada_l"));
    assert_eq!(data["rememberMe"], json!(false));
    assert!(!handle.is_submitting());
}

#[tokio::test]
async fn errors_refresh_after_first_attempt() {
    let handle = sign_in_handle();
    assert!(matches!(handle.submit(|_| async {}).await, Submission::Invalid(_)));
    assert!(handle.field("username").has_errors());

    handle.set_value("username", "ada");
    assert!(!handle.field("username").has_errors());
    assert!(handle.field("password").has_errors());

    handle.set_value("username", "a!");
    assert!(handle.field("username").has_errors());
}

#[tokio::test]
async fn fixing_one_side_of_a_mismatch_clears_the_other() {
    let handle = FormHandle::new(
        change_password_schema(&KeyTranslator, &PasswordPolicy::default()),
        json!({
            "currentPassword": "correct horse",
            "newPassword": "analytical",
            "newPasswordConfirm": "analytical engine",
        }),
    );
    assert!(matches!(handle.submit(|_| async {}).await, Submission::Invalid(_)));
    assert_eq!(handle.errors("newPasswordConfirm"), ["auth.password-must-match"]);

    handle.set_value("newPassword", "analytical engine");

    assert!(handle.errors("newPasswordConfirm").is_empty());
    assert!(handle.errors("newPassword").is_empty());
    assert!(handle.validate().is_ok());
}

#[tokio::test]
async fn edits_do_not_reveal_errors_on_clean_fields() {
    let handle = FormHandle::new(
        change_password_schema(&KeyTranslator, &PasswordPolicy::default()),
        json!({
            "currentPassword": "correct horse",
            "newPassword": "analytical engine",
            "newPasswordConfirm": "analytical engine",
        }),
    );
    assert!(matches!(handle.submit(|_| async {}).await, Submission::Completed(())));

    handle.set_value("newPassword", "difference engine");

    assert!(handle.errors("newPassword").is_empty());
    assert!(handle.errors("newPasswordConfirm").is_empty());
    assert!(handle.validate().is_err());
    assert_eq!(handle.errors("newPasswordConfirm"), ["auth.password-must-match"]);
}

#[tokio::test]
async fn submit_control_is_disabled_while_pending() {
    let handle = sign_in_handle();
    handle.set_value("username", "ada");
    handle.set_value("password", "analytical engine");
    let form = FormBuilder::new()
        .field(FieldDescriptor::text("username", "Username"))
        .field(FieldDescriptor::password("password", "Password"))
        .build();
    let registry = FieldRegistry::basic();

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let submit = handle.submit(|_| async move {
        rx.await.ok();
    });
    let observe = async {
        tokio::task::yield_now().await;
        let rendered = build(&registry, &form, &handle).unwrap();
        let second = handle.submit(|_| async {}).await;
        tx.send(()).ok();
        (rendered, second)
    };

    let (first, (rendered, second)) = tokio::join!(submit, observe);

    assert!(matches!(first, Submission::Completed(())));
    assert!(matches!(second, Submission::Busy));
    assert!(rendered.submit_state.disabled);
    assert!(rendered.submit_state.pending);
    assert!(rendered.field("username").unwrap().markup.contains("disabled"));

    let rendered = build(&registry, &form, &handle).unwrap();
    assert!(!rendered.submit_state.disabled);
}
