//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a logged-in user in route handlers,
//! plus helpers for establishing and tearing down the login state in the
//! session.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Extractor that requires a logged-in user.
///
/// If nobody is logged in, full-page requests are redirected to the login
/// page and HTMX fragment requests get a plain 401.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but nobody is logged in.
pub enum AuthRejection {
    /// Redirect to login page (for full-page requests).
    RedirectToLogin,
    /// Unauthorized response (for HTMX fragment requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        // Get the current user from the session
        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                // HTMX sends this header on every fragment request
                let is_fragment = parts.headers.contains_key("hx-request");
                if is_fragment {
                    AuthRejection::Unauthorized
                } else {
                    AuthRejection::RedirectToLogin
                }
            })?;

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is
/// logged in. Used by pages that render for guests and authed users alike.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Helper to store a fresh login in the session: the user snapshot plus the
/// platform session secret that backs it.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn establish_login(
    session: &Session,
    user: &CurrentUser,
    session_secret: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await?;
    session
        .insert(session_keys::PLATFORM_SESSION, session_secret)
        .await
}

/// Helper to read the platform session secret for the current login.
///
/// Returns `None` when nobody is logged in or the secret is missing, which
/// callers should treat the same as an expired session.
pub async fn platform_session(session: &Session) -> Option<String> {
    session
        .get::<String>(session_keys::PLATFORM_SESSION)
        .await
        .ok()
        .flatten()
}

/// Helper to destroy the login state (logout). Flushes the whole session so
/// both the user snapshot and the platform secret are gone.
///
/// # Errors
///
/// Returns an error if the session store cannot be modified.
pub async fn clear_login(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
