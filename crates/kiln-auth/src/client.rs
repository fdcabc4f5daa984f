//! The auth-client seam.
//!
//! Transport and server logic live behind [`AuthClient`]; this crate only
//! sequences calls and notifications around it.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::provider::ProviderId;

/// Body of a username sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameCredentials {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
    /// Whether to keep the session after the browser closes.
    #[serde(default)]
    pub remember_me: bool,
}

/// Body of a password change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// The password in use.
    pub current_password: String,
    /// The replacement.
    pub new_password: String,
    /// Whether to sign out every other session.
    #[serde(default)]
    pub revoke_other_sessions: bool,
}

/// Successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedIn {
    /// The signed-in user.
    pub username: String,
    /// Where the client should go next.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// Client for the authentication server.
///
/// # Example
///
/// ```ignore
/// struct Offline;
///
/// impl AuthClient for Offline {
///     fn sign_in_username<'a>(&'a self, _: &'a UsernameCredentials) -> BoxFuture<'a, Result<SignedIn>> {
///         Box::pin(async move { Err(AuthError::Transport("offline".into())) })
///     }
///     // ...
/// }
/// ```
pub trait AuthClient: Send + Sync {
    /// Signs in with a username and password.
    fn sign_in_username<'a>(
        &'a self,
        credentials: &'a UsernameCredentials,
    ) -> BoxFuture<'a, Result<SignedIn>>;

    /// Starts an OAuth sign-in and returns the provider URL to redirect to.
    fn sign_in_social<'a>(
        &'a self,
        provider: ProviderId,
        callback_url: Option<&'a str>,
    ) -> BoxFuture<'a, Result<String>>;

    /// Changes the signed-in user's password.
    fn change_password<'a>(
        &'a self,
        request: &'a ChangePasswordRequest,
    ) -> BoxFuture<'a, Result<()>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credentials_from_form_values() {
        let credentials: UsernameCredentials = serde_json::from_value(json!({
            "username": "ada",
            "password": "analytical",
            "rememberMe": true,
        }))
        .unwrap();
        assert!(credentials.remember_me);

        let credentials: UsernameCredentials =
            serde_json::from_value(json!({"username": "ada", "password": "analytical"})).unwrap();
        assert!(!credentials.remember_me);
    }

    #[test]
    fn test_change_password_ignores_confirmation() {
        let request: ChangePasswordRequest = serde_json::from_value(json!({
            "currentPassword": "old password",
            "newPassword": "new password",
            "newPasswordConfirm": "new password",
        }))
        .unwrap();
        assert_eq!(request.new_password, "new password");
        assert!(!request.revoke_other_sessions);
    }
}
