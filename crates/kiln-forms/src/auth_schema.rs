//! Validation schemas for the authentication screens.
//!
//! Schemas are built per use with the active [`Translator`], so messages are
//! already localized when they land in [`crate::ValidationErrors`].

use std::sync::LazyLock;

use regex::Regex;

use crate::i18n::Translator;
use crate::schema::{fields_differ, fields_equal, FieldRule, ObjectSchema};
use crate::validation::{MaxLengthValidator, MinLengthValidator, RegexValidator, RequiredValidator};

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid username regex"));

/// Username length bounds.
pub const USERNAME_MIN: usize = 3;
/// Username length bounds.
pub const USERNAME_MAX: usize = 32;
/// Maximum display-name length.
pub const NAME_MAX: usize = 64;

/// Length bounds for passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum number of characters.
    pub min_length: usize,
    /// Maximum number of characters.
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
        }
    }
}

impl PasswordPolicy {
    /// Sets the minimum length.
    #[must_use]
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}

/// Rule for a username.
pub fn username_rule(t: &dyn Translator) -> FieldRule {
    let min = USERNAME_MIN.to_string();
    let max = USERNAME_MAX.to_string();
    FieldRule::string()
        .required_message(t.t("auth.username-required"))
        .validator(RequiredValidator::with_message(t.t("auth.username-required")))
        .validator(MinLengthValidator::with_message(
            USERNAME_MIN,
            t.translate("auth.username-too-short", &[("min", &min)]),
        ))
        .validator(MaxLengthValidator::with_message(
            USERNAME_MAX,
            t.translate("auth.username-too-long", &[("max", &max)]),
        ))
        .validator(RegexValidator::from_regex(
            USERNAME_RE.clone(),
            t.t("auth.username-invalid"),
        ))
}

/// Rule for a display name.
pub fn name_rule(t: &dyn Translator) -> FieldRule {
    let max = NAME_MAX.to_string();
    FieldRule::string()
        .required_message(t.t("auth.name-required"))
        .validator(RequiredValidator::with_message(t.t("auth.name-required")))
        .validator(MaxLengthValidator::with_message(
            NAME_MAX,
            t.translate("auth.name-too-long", &[("max", &max)]),
        ))
}

/// Rule for a password under `policy`.
pub fn password_rule(t: &dyn Translator, policy: &PasswordPolicy) -> FieldRule {
    let min = policy.min_length.to_string();
    let max = policy.max_length.to_string();
    FieldRule::string()
        .required_message(t.t("auth.password-required"))
        .validator(RequiredValidator::with_message(t.t("auth.password-required")))
        .validator(MinLengthValidator::with_message(
            policy.min_length,
            t.translate("auth.password-too-short", &[("min", &min)]),
        ))
        .validator(MaxLengthValidator::with_message(
            policy.max_length,
            t.translate("auth.password-too-long", &[("max", &max)]),
        ))
}

/// Sign-in: `username`, `password`, optional `rememberMe`.
pub fn sign_in_schema(t: &dyn Translator, policy: &PasswordPolicy) -> ObjectSchema {
    ObjectSchema::new()
        .field("username", username_rule(t))
        .field("password", password_rule(t, policy))
        .field("rememberMe", FieldRule::boolean().optional())
}

/// Sign-up: `name`, `username`, `password` and a matching
/// `passwordConfirm`.
pub fn sign_up_schema(t: &dyn Translator, policy: &PasswordPolicy) -> ObjectSchema {
    ObjectSchema::new()
        .field("name", name_rule(t))
        .field("username", username_rule(t))
        .field("password", password_rule(t, policy))
        .field("passwordConfirm", password_rule(t, policy))
        .refine(
            "passwordConfirm",
            t.t("auth.password-must-match"),
            fields_equal("password", "passwordConfirm"),
        )
}

/// Profile update: `username` and `name`, both optional.
pub fn update_user_schema(t: &dyn Translator) -> ObjectSchema {
    ObjectSchema::new()
        .field("username", username_rule(t).optional())
        .field("name", name_rule(t).optional())
}

/// Password change.
///
/// The new password must differ from the current one (reported on
/// `newPassword`) and the confirmation must match (reported on
/// `newPasswordConfirm`).
pub fn change_password_schema(t: &dyn Translator, policy: &PasswordPolicy) -> ObjectSchema {
    ObjectSchema::new()
        .field("revokeOtherSessions", FieldRule::boolean().optional())
        .field("currentPassword", password_rule(t, policy))
        .field("newPassword", password_rule(t, policy))
        .extend(ObjectSchema::new().field("newPasswordConfirm", password_rule(t, policy)))
        .refine(
            "newPassword",
            t.t("auth.password-must-different"),
            fields_differ("newPassword", "currentPassword"),
        )
        .refine(
            "newPasswordConfirm",
            t.t("auth.password-must-match"),
            fields_equal("newPassword", "newPasswordConfirm"),
        )
}
