//! Sign-in and password change flows against a scripted auth client.

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use kiln_auth::{
    sign_in_social, AuthClient, AuthError, ChangePasswordForm, ChangePasswordRequest, ProviderId,
    SignInForm, SignInOutcome, SignedIn, ToastEvent, ToastKind, ToastLog, UsernameCredentials,
};
use kiln_forms::auth_schema::PasswordPolicy;
use kiln_forms::i18n::{Catalog, KeyTranslator};
use kiln_forms::Submission;
use tokio::sync::Notify;

#[derive(Default)]
struct ScriptedClient {
    reject_with: Option<String>,
    gate: Option<Arc<Notify>>,
    sign_ins: Mutex<Vec<UsernameCredentials>>,
    password_changes: Mutex<Vec<ChangePasswordRequest>>,
}

impl ScriptedClient {
    fn rejecting(message: &str) -> Self {
        Self {
            reject_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    fn sign_in_count(&self) -> usize {
        self.sign_ins.lock().unwrap().len()
    }

    fn outcome(&self) -> Result<(), AuthError> {
        match &self.reject_with {
            Some(message) => Err(AuthError::Remote {
                status: Some(401),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl AuthClient for ScriptedClient {
    fn sign_in_username<'a>(
        &'a self,
        credentials: &'a UsernameCredentials,
    ) -> BoxFuture<'a, kiln_auth::Result<SignedIn>> {
        Box::pin(async move {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.sign_ins.lock().unwrap().push(credentials.clone());
            self.outcome().map(|()| SignedIn {
                username: credentials.username.clone(),
                redirect: None,
            })
        })
    }

    fn sign_in_social<'a>(
        &'a self,
        provider: ProviderId,
        callback_url: Option<&'a str>,
    ) -> BoxFuture<'a, kiln_auth::Result<String>> {
        Box::pin(async move {
            Ok(format!(
                "https://auth.example.com/{provider}?callback={}",
                callback_url.unwrap_or("/")
            ))
        })
    }

    fn change_password<'a>(
        &'a self,
        request: &'a ChangePasswordRequest,
    ) -> BoxFuture<'a, kiln_auth::Result<()>> {
        Box::pin(async move {
            self.password_changes.lock().unwrap().push(request.clone());
            self.outcome()
        })
    }
}

fn filled_form() -> SignInForm {
    let form = SignInForm::new(Arc::new(KeyTranslator), &PasswordPolicy::default(), false);
    form.handle().set_value("username", "ada");
    form.handle().set_value("password", "analytical engine");
    form
}

#[tokio::test]
async fn successful_sign_in_notifies_loading_then_success() {
    let client = ScriptedClient::default();
    let toasts = ToastLog::new();

    let outcome = filled_form().submit(&client, &toasts).await;

    assert_eq!(outcome, SignInOutcome::Success);
    assert_eq!(client.sign_in_count(), 1);
    let sent = client.sign_ins.lock().unwrap()[0].clone();
    assert_eq!(sent.username, "ada");
    assert!(sent.remember_me);

    let events = toasts.events();
    assert_eq!(events.len(), 3);
    assert!(matches!(&events[0], ToastEvent::Shown(t) if t.kind == ToastKind::Loading));
    assert_eq!(events[1], ToastEvent::Dismissed);
    assert!(matches!(&events[2], ToastEvent::Shown(t) if t.title == "auth.sign-in-success"));
}

#[tokio::test]
async fn rejected_sign_in_shows_untranslated_remote_message() {
    let client = ScriptedClient::rejecting("Invalid username or password");
    let toasts = ToastLog::new();
    let catalog = Catalog::from_pairs([
        ("auth.sign-in-loading", "Signing in..."),
        ("auth.sign-in-error", "Could not sign in"),
    ]);
    let form = SignInForm::new(Arc::new(catalog), &PasswordPolicy::default(), true);

    let outcome = form.submit(&client, &toasts).await;

    assert_eq!(
        outcome,
        SignInOutcome::Failure("Invalid username or password".to_string())
    );
    assert_eq!(toasts.shown_kinds(), [ToastKind::Loading, ToastKind::Error]);
    let visible = toasts.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Could not sign in");
    assert_eq!(
        visible[0].description.as_deref(),
        Some("Invalid username or password")
    );
}

#[tokio::test]
async fn invalid_form_never_reaches_the_client() {
    let client = ScriptedClient::default();
    let toasts = ToastLog::new();
    let form = SignInForm::new(Arc::new(KeyTranslator), &PasswordPolicy::default(), false);
    form.handle().set_value("username", "ab");

    let outcome = form.submit(&client, &toasts).await;

    assert!(matches!(outcome, SignInOutcome::Failure(_)));
    assert_eq!(client.sign_in_count(), 0);
    assert!(toasts.events().is_empty());
    assert_eq!(form.handle().errors("username"), ["auth.username-too-short"]);
    assert_eq!(form.handle().errors("password"), ["auth.password-required"]);
}

#[tokio::test]
async fn second_submit_while_pending_is_ignored() {
    let gate = Arc::new(Notify::new());
    let client = ScriptedClient::gated(gate.clone());
    let toasts = ToastLog::new();
    let form = filled_form();

    let first = form.submit(&client, &toasts);
    let second = async {
        tokio::task::yield_now().await;
        let outcome = form.submit(&client, &toasts).await;
        gate.notify_one();
        outcome
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first, SignInOutcome::Success);
    assert_eq!(second, SignInOutcome::Pending);
    assert_eq!(client.sign_in_count(), 1);
    assert_eq!(toasts.shown_kinds(), [ToastKind::Loading, ToastKind::Success]);
}

#[tokio::test]
async fn social_sign_in_returns_redirect() {
    let client = ScriptedClient::default();
    let url = sign_in_social(&client, ProviderId::Discord, Some("/welcome"))
        .await
        .unwrap();
    assert_eq!(url, "https://auth.example.com/discord?callback=/welcome");
}

#[tokio::test]
async fn password_change_resets_form_on_success() {
    let client = ScriptedClient::default();
    let toasts = ToastLog::new();
    let form = ChangePasswordForm::new(Arc::new(KeyTranslator), &PasswordPolicy::default());
    form.handle().set_value("currentPassword", "old password");
    form.handle().set_value("newPassword", "new password");
    form.handle().set_value("newPasswordConfirm", "new password");
    form.handle().set_value("revokeOtherSessions", true);

    let submission = form.submit(&client, &toasts).await;

    assert!(matches!(submission, Submission::Completed(Ok(()))));
    let sent = client.password_changes.lock().unwrap()[0].clone();
    assert_eq!(sent.new_password, "new password");
    assert!(sent.revoke_other_sessions);
    assert!(form.handle().is_default());
    assert_eq!(toasts.shown_kinds(), [ToastKind::Loading, ToastKind::Success]);
}

#[tokio::test]
async fn password_change_reuse_is_caught_before_the_client() {
    let client = ScriptedClient::default();
    let toasts = ToastLog::new();
    let form = ChangePasswordForm::new(Arc::new(KeyTranslator), &PasswordPolicy::default());
    form.handle().set_value("currentPassword", "same password");
    form.handle().set_value("newPassword", "same password");
    form.handle().set_value("newPasswordConfirm", "same password");

    let submission = form.submit(&client, &toasts).await;

    let Submission::Invalid(errors) = submission else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), ["newPassword"]);
    assert!(client.password_changes.lock().unwrap().is_empty());
    assert!(toasts.events().is_empty());
}
