//! Authentication service.
//!
//! Wraps the platform account API with the flows the routes need:
//! register-then-login, login, logout, and session revalidation. Input
//! validation happens here, before any network call, so the platform only
//! sees requests that can plausibly succeed.

pub mod error;

use tracing::instrument;
use wherebuy_core::Email;

use crate::appwrite::AccountClient;
use crate::models::CurrentUser;

pub use error::AuthError;

/// Minimum password length, matching the platform's own policy.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A successful login: the user snapshot to store in the session, plus the
/// platform session secret that authenticates their writes.
#[derive(Debug, Clone)]
pub struct Login {
    pub user: CurrentUser,
    pub session_secret: String,
}

/// Service for account registration and session management.
#[derive(Debug, Clone)]
pub struct AuthService {
    account: AccountClient,
}

impl AuthService {
    #[must_use]
    pub const fn new(account: AccountClient) -> Self {
        Self { account }
    }

    /// Registers a new account and logs it in.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Login, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::NameRequired);
        }
        let email = Email::parse(email)?;
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword);
        }

        match self.account.create(email.as_str(), password, name).await {
            Ok(account) => {
                tracing::info!(user_id = %account.id, "Account registered");
            }
            Err(e) if e.is_conflict() => return Err(AuthError::EmailTaken),
            Err(e) => return Err(AuthError::Platform(e)),
        }

        self.login(email.as_str(), password).await
    }

    /// Creates a session for an existing account and fetches the account
    /// details the session will carry.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Login, AuthError> {
        let email = Email::parse(email)?;

        let session = match self
            .account
            .create_email_session(email.as_str(), password)
            .await
        {
            Ok(session) => session,
            Err(e) if e.is_unauthorized() => return Err(AuthError::InvalidCredentials),
            Err(e) => return Err(AuthError::Platform(e)),
        };

        let account = self
            .account
            .get(&session.secret)
            .await
            .map_err(AuthError::Platform)?;

        let user = CurrentUser {
            id: account.id,
            email: Email::parse(&account.email)?,
            name: account.name,
        };
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Login {
            user,
            session_secret: session.secret,
        })
    }

    /// Revalidates a stored session secret against the platform.
    ///
    /// Returns `Ok(None)` when the session has expired or was revoked
    /// remotely, so callers can treat that as "logged out" rather than an
    /// error.
    #[instrument(skip(self, session_secret))]
    pub async fn current_user(
        &self,
        session_secret: &str,
    ) -> Result<Option<CurrentUser>, AuthError> {
        match self.account.get(session_secret).await {
            Ok(account) => Ok(Some(CurrentUser {
                id: account.id,
                email: Email::parse(&account.email)?,
                name: account.name,
            })),
            Err(e) if e.is_unauthorized() => Ok(None),
            Err(e) => Err(AuthError::Platform(e)),
        }
    }

    /// Deletes the session server-side, invalidating its secret.
    ///
    /// A session that is already gone counts as success; logout must not
    /// fail because the platform beat us to it.
    #[instrument(skip(self, session_secret))]
    pub async fn logout(&self, session_secret: &str) -> Result<(), AuthError> {
        match self.account.delete_session(session_secret).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_unauthorized() || e.is_not_found() => Ok(()),
            Err(e) => Err(AuthError::Platform(e)),
        }
    }
}
