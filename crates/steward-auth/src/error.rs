//! Authentication error types.

use steward_core::error::StewardError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("temporary passwords must be at least {min} characters, got {requested}")]
    PasswordTooShort { min: usize, requested: usize },

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for StewardError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::TokenExpired | AuthError::TokenInvalid(_) => {
                StewardError::AuthenticationFailed {
                    reason: err.to_string(),
                }
            }
            AuthError::PasswordTooShort { .. } => StewardError::Validation {
                field: "length".into(),
                message: err.to_string(),
            },
            AuthError::Crypto(msg) => StewardError::Internal(msg),
        }
    }
}
