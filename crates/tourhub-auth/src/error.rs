//! Authentication error types.

use thiserror::Error;
use tourhub_core::error::TourError;
use tourhub_core::models::role::Role;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no session token presented")]
    TokenMissing,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("role {required} required, caller is {actual}")]
    RoleMismatch { required: Role, actual: Role },

    #[error("invalid identity claims: {0}")]
    InvalidClaims(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for TourError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenMissing | AuthError::TokenExpired | AuthError::TokenInvalid(_) => {
                TourError::AuthenticationFailed {
                    reason: err.to_string(),
                }
            }
            AuthError::RoleMismatch { .. } => TourError::AuthorizationDenied {
                reason: err.to_string(),
            },
            AuthError::InvalidClaims(message) => TourError::Validation { message },
            AuthError::Crypto(msg) => TourError::Crypto(msg),
        }
    }
}
