//! Authentication error types.

use thiserror::Error;
use wherebuy_core::EmailError;

use crate::appwrite::AppwriteError;
use crate::services::auth::MIN_PASSWORD_LENGTH;

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email address failed validation before any network call.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The password does not meet the minimum length.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// Registration was attempted without a display name.
    #[error("name is required")]
    NameRequired,

    /// The email/password pair was rejected.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// The stored session secret is no longer valid.
    #[error("session expired")]
    SessionExpired,

    /// The auth platform failed in a way we do not classify.
    #[error("authentication service error: {0}")]
    Platform(AppwriteError),
}
