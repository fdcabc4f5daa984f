//! The password change form, laid out with the fancy preset.

use std::sync::Arc;

use kiln_forms::auth_schema::{change_password_schema, PasswordPolicy};
use kiln_forms::i18n::Translator;
use kiln_forms::{
    build, FieldDescriptor, FieldRegistry, FormBuilder, FormDescriptor, FormHandle,
    SubmitDescriptor, Submission,
};
use serde_json::json;
use tracing::{info, warn};

use crate::client::{AuthClient, ChangePasswordRequest};
use crate::error::Result;
use crate::notify::Notifier;

/// Change-password form bound to [`change_password_schema`].
pub struct ChangePasswordForm {
    translator: Arc<dyn Translator>,
    descriptor: FormDescriptor,
    handle: FormHandle,
}

impl std::fmt::Debug for ChangePasswordForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordForm")
            .field("descriptor", &self.descriptor)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl ChangePasswordForm {
    /// Creates the form with empty passwords.
    pub fn new(translator: Arc<dyn Translator>, policy: &PasswordPolicy) -> Self {
        let t = translator.as_ref();
        let password = |name: &str, key: &str| {
            FieldDescriptor::password(name, t.t(&format!("auth.{key}")))
                .description(t.t(&format!("auth.{key}-description")))
                .help_text(t.t(&format!("auth.{key}-info")))
        };

        let descriptor = FormBuilder::new()
            .field(password("currentPassword", "current-password").option("autocomplete", "current-password"))
            .field(password("newPassword", "new-password").option("autocomplete", "new-password"))
            .field(password("newPasswordConfirm", "new-password-confirm").option("autocomplete", "new-password"))
            .field(
                FieldDescriptor::checkbox("revokeOtherSessions", t.t("auth.revoke-other-sessions"))
                    .description(t.t("auth.revoke-other-sessions-description"))
                    .help_text(t.t("auth.revoke-other-sessions-info")),
            )
            .submit(SubmitDescriptor::new(t.t("auth.change-password")))
            .build();

        let handle = FormHandle::new(
            change_password_schema(t, policy),
            json!({
                "currentPassword": "",
                "newPassword": "",
                "newPasswordConfirm": "",
                "revokeOtherSessions": false,
            }),
        );

        Self {
            translator,
            descriptor,
            handle,
        }
    }

    /// Returns the form descriptor.
    pub fn descriptor(&self) -> &FormDescriptor {
        &self.descriptor
    }

    /// Returns the bound form handle.
    pub fn handle(&self) -> &FormHandle {
        &self.handle
    }

    /// Validates and asks `client` to change the password.
    ///
    /// The form is reset after a successful change.
    pub async fn submit(
        &self,
        client: &dyn AuthClient,
        notifier: &dyn Notifier,
    ) -> Submission<Result<()>> {
        let t = self.translator.as_ref();
        let submission = self
            .handle
            .submit(|data| async move {
                let request: ChangePasswordRequest = serde_json::from_value(data)?;
                notifier.loading(&t.t("auth.change-password-loading"));
                let result = client.change_password(&request).await;
                notifier.dismiss();
                match &result {
                    Ok(()) => notifier.success(&t.t("auth.change-password-success")),
                    Err(e) => notifier.error(&t.t("auth.change-password-error"), Some(&e.to_string())),
                }
                result
            })
            .await;

        match &submission {
            Submission::Completed(Ok(())) => {
                info!(
                    revoked_others = self.handle.value("revokeOtherSessions") == Some(json!(true)),
                    "password changed"
                );
                self.handle.reset();
            }
            Submission::Completed(Err(e)) => warn!(error = %e, "password change failed"),
            Submission::Invalid(_) | Submission::Busy => {}
        }
        submission
    }

    /// Renders the form with the fancy preset.
    pub fn render(&self, action: &str) -> Result<String> {
        let rendered = build(&FieldRegistry::fancy(), &self.descriptor, &self.handle)?;
        Ok(rendered.render(action, "post"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_forms::i18n::KeyTranslator;

    #[test]
    fn test_render_uses_fancy_cards() {
        let form = ChangePasswordForm::new(Arc::new(KeyTranslator), &PasswordPolicy::default());
        let html = form.render("/account/password").unwrap();
        assert!(html.contains("space-y-6 lg:max-w-lg"));
        assert_eq!(html.matches("rounded-md border").count(), 4);
        assert!(html.contains("auth.new-password-info"));
        assert!(html.contains("btn btn-primary w-full"));
    }

    #[test]
    fn test_submit_disabled_until_edited() {
        let form = ChangePasswordForm::new(Arc::new(KeyTranslator), &PasswordPolicy::default());
        let rendered = build(&FieldRegistry::fancy(), form.descriptor(), form.handle()).unwrap();
        assert!(rendered.submit_state.disabled);

        form.handle().set_value("currentPassword", "old password");
        let rendered = build(&FieldRegistry::fancy(), form.descriptor(), form.handle()).unwrap();
        assert!(!rendered.submit_state.disabled);
    }
}
