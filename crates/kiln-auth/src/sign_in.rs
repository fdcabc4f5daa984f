//! The sign-in screen.

use std::sync::Arc;

use ironhtml::html;
use ironhtml_elements::{Div, Form, Span, A, H2, P};
use kiln_forms::auth_schema::{sign_in_schema, PasswordPolicy};
use kiln_forms::i18n::Translator;
use kiln_forms::{
    build, FieldDescriptor, FieldRegistry, FormBuilder, FormDescriptor, FormHandle,
    SubmitDescriptor, Submission,
};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::client::{AuthClient, UsernameCredentials};
use crate::error::{AuthError, Result};
use crate::notify::Notifier;
use crate::provider::{social_providers, ProviderId};

/// Username pre-filled in development builds.
pub const DEV_USERNAME: &str = "user";
/// Password pre-filled in development builds.
pub const DEV_PASSWORD: &str = "!Ab12345";

/// Result of a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// An earlier attempt is still in flight; nothing was done.
    Pending,
    /// The user is signed in.
    Success,
    /// The attempt failed, either on validation or remotely.
    Failure(String),
}

/// URLs the sign-in page links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInRoutes {
    /// Where the username form posts.
    pub sign_in: String,
    /// Where the social buttons post.
    pub social: String,
    /// The sign-up page.
    pub sign_up: String,
    /// Where to return after an OAuth sign-in.
    pub callback_url: Option<String>,
}

impl Default for SignInRoutes {
    fn default() -> Self {
        Self {
            sign_in: "/auth/sign-in".to_string(),
            social: "/auth/sign-in/social".to_string(),
            sign_up: "/auth/sign-up".to_string(),
            callback_url: None,
        }
    }
}

/// The username/password sign-in form.
pub struct SignInForm {
    translator: Arc<dyn Translator>,
    descriptor: FormDescriptor,
    handle: FormHandle,
}

impl std::fmt::Debug for SignInForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInForm")
            .field("descriptor", &self.descriptor)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl SignInForm {
    /// Creates the form.
    ///
    /// With `dev` set the development credentials are pre-filled and the
    /// form may be submitted without edits.
    pub fn new(translator: Arc<dyn Translator>, policy: &PasswordPolicy, dev: bool) -> Self {
        let t = translator.as_ref();
        let descriptor = FormBuilder::new()
            .field(FieldDescriptor::text("username", t.t("auth.username")).option("autocomplete", "username"))
            .field(
                FieldDescriptor::password("password", t.t("auth.password"))
                    .option("autocomplete", "current-password"),
            )
            .submit(SubmitDescriptor::new(t.t("auth.sign-in")).class("w-100").allow_default_values(dev))
            .build();

        let defaults = if dev {
            json!({"username": DEV_USERNAME, "password": DEV_PASSWORD, "rememberMe": true})
        } else {
            json!({"username": "", "password": "", "rememberMe": true})
        };
        let handle = FormHandle::new(sign_in_schema(t, policy), defaults);

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

    /// Validates and signs in.
    ///
    /// Invalid input fails without contacting `client` or notifying. A call
    /// made while another attempt is in flight returns
    /// [`SignInOutcome::Pending`]. Otherwise a loading toast is shown, the
    /// client is awaited, toasts are dismissed and exactly one success or
    /// error toast follows.
    pub async fn submit(&self, client: &dyn AuthClient, notifier: &dyn Notifier) -> SignInOutcome {
        let t = self.translator.as_ref();
        let submission = self
            .handle
            .submit(|data| async move {
                let credentials: UsernameCredentials = match serde_json::from_value(data) {
                    Ok(credentials) => credentials,
                    Err(e) => return Err(AuthError::from(e)),
                };

                notifier.loading(&t.t("auth.sign-in-loading"));
                debug!(username = %credentials.username, "signing in");
                let result = client.sign_in_username(&credentials).await;
                notifier.dismiss();

                match &result {
                    Ok(_) => notifier.success(&t.t("auth.sign-in-success")),
                    // Remote messages are shown untranslated.
                    Err(e) => notifier.error(&t.t("auth.sign-in-error"), Some(&e.to_string())),
                }
                result
            })
            .await;

        match submission {
            Submission::Busy => SignInOutcome::Pending,
            Submission::Invalid(errors) => {
                debug!(fields = errors.len(), "sign-in form invalid");
                SignInOutcome::Failure(errors.to_string())
            }
            Submission::Completed(Ok(signed_in)) => {
                info!(username = %signed_in.username, "signed in");
                SignInOutcome::Success
            }
            Submission::Completed(Err(e)) => {
                warn!(error = %e, "sign-in failed");
                SignInOutcome::Failure(e.to_string())
            }
        }
    }

    /// Renders the form with `registry`.
    pub fn render(&self, registry: &FieldRegistry, action: &str) -> Result<String> {
        let rendered = build(registry, &self.descriptor, &self.handle)?;
        Ok(rendered.render(action, "post"))
    }
}

/// Starts a social sign-in and returns the URL to redirect to.
pub async fn sign_in_social(
    client: &dyn AuthClient,
    provider: ProviderId,
    callback_url: Option<&str>,
) -> Result<String> {
    info!(%provider, ?callback_url, "starting social sign-in");
    client.sign_in_social(provider, callback_url).await
}

/// Renders the complete sign-in card.
///
/// The card holds the title, the description, the username form, an "or"
/// separator, one button per social provider and a link to sign-up.
pub fn render_sign_in_page(
    form: &SignInForm,
    registry: &FieldRegistry,
    routes: &SignInRoutes,
) -> Result<String> {
    let t = form.translator.as_ref();
    let form_html = form.render(registry, &routes.sign_in)?;

    let title = t.t("auth.sign-in");
    let description = t.t("auth.sign-in-description");
    let or = t.t("auth.or");
    let no_account = t.t("auth.dont-have-an-account");
    let sign_up = t.t("auth.sign-up");
    let buttons: String = social_providers()
        .iter()
        .map(|provider| provider.render_button(t))
        .collect();
    let callback = routes.callback_url.clone().unwrap_or_default();

    let page = html! { div.class("card w-100 mx-auto") }
        .attr("style", "max-width: 28rem")
        .child::<Div, _>(|header| {
            header
                .class("card-header")
                .child::<H2, _>(|h| h.class("card-title h4").text(&title))
                .child::<P, _>(|p| p.class("card-text text-muted").text(&description))
        })
        .child::<Div, _>(|body| {
            body.class("card-body d-grid gap-4")
                .raw(&form_html)
                .child::<Div, _>(|sep| {
                    sep.class("d-flex align-items-center justify-content-between")
                        .raw("<hr class=\"flex-grow-1\">")
                        .child::<Span, _>(|s| s.class("px-3 text-muted").text(&or))
                        .raw("<hr class=\"flex-grow-1\">")
                })
                .child::<Form, _>(|f| {
                    f.attr("action", &routes.social)
                        .attr("method", "post")
                        .child::<Div, _>(|d| {
                            d.class("d-grid gap-3")
                                .when(routes.callback_url.is_some(), |d| {
                                    d.raw(format!(
                                        r#"<input type="hidden" name="callbackURL" value="{}">"#,
                                        kiln_forms::widgets::html_escape(&callback)
                                    ))
                                })
                                .raw(&buttons)
                        })
                })
                .child::<Div, _>(|footer| {
                    footer
                        .class("d-flex align-items-center justify-content-center gap-2")
                        .child::<P, _>(|p| p.class("mb-0").text(&no_account))
                        .child::<A, _>(|a| a.attr("href", &routes.sign_up).class("p-0").text(&sign_up))
                })
        });

    Ok(page.render())
}
