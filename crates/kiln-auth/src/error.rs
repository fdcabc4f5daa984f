//! Error types for the auth flows.

use thiserror::Error;

/// Authentication-specific errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The auth server rejected the request. The message is shown to the
    /// user as is.
    #[error("{message}")]
    Remote {
        /// HTTP-like status code, when known.
        status: Option<u16>,
        /// Server-provided message.
        message: String,
    },

    /// The auth server could not be reached.
    #[error("auth server unreachable: {0}")]
    Transport(String),

    /// Unknown social provider id.
    #[error("unknown social provider `{0}`")]
    UnknownProvider(String),

    /// Form configuration error.
    #[error("form error: {0}")]
    Form(#[from] kiln_forms::FormError),

    /// Accepted form values did not match the request shape.
    #[error("invalid request payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl AuthError {
    /// Creates a [`AuthError::Remote`] error without a status.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            status: None,
            message: message.into(),
        }
    }
}

/// Result type alias for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;
