//! # kiln-auth
//!
//! Sign-in and account screens built on `kiln-forms`.
//!
//! This crate provides:
//! - The [`AuthClient`] seam to the authentication server
//! - [`SignInForm`] with loading/success/error toasts around the remote call
//! - Social sign-in buttons for Google, Discord and GitHub
//! - [`ChangePasswordForm`] laid out with the fancy preset
//! - [`Notifier`] implementations: [`ToastLog`] and [`TracingNotifier`]
//!
//! ## Sign-in page
//!
//! ```rust
//! use std::sync::Arc;
//! use kiln_auth::{render_sign_in_page, SignInForm, SignInRoutes};
//! use kiln_forms::auth_schema::PasswordPolicy;
//! use kiln_forms::i18n::KeyTranslator;
//! use kiln_forms::FieldRegistry;
//!
//! let form = SignInForm::new(Arc::new(KeyTranslator), &PasswordPolicy::default(), false);
//! let html = render_sign_in_page(&form, &FieldRegistry::basic(), &SignInRoutes::default())
//!     .expect("sign-in form uses registered field types");
//! assert!(html.contains(r#"value="github""#));
//! ```
//!
//! ## Submitting
//!
//! [`SignInForm::submit`] validates the form, then calls the client and
//! reports through a [`Notifier`]. The result is a [`SignInOutcome`]; a
//! second call while the first is pending returns
//! [`SignInOutcome::Pending`] without doing anything.

mod change_password;
mod client;
mod error;
mod notify;
mod provider;
mod sign_in;

pub use change_password::ChangePasswordForm;
pub use client::{AuthClient, ChangePasswordRequest, SignedIn, UsernameCredentials};
pub use error::{AuthError, Result};
pub use notify::{Notifier, Toast, ToastEvent, ToastKind, ToastLog, TracingNotifier};
pub use provider::{social_provider, social_providers, ProviderId, SocialProvider};
pub use sign_in::{
    render_sign_in_page, sign_in_social, SignInForm, SignInOutcome, SignInRoutes, DEV_PASSWORD,
    DEV_USERNAME,
};
