//! Authentication route handlers.
//!
//! Handles login, registration, and logout against the platform account
//! API. Failures redirect back to the form with a short error code in the
//! query string; the page handlers translate codes into the messages shown
//! in the banner.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_login, establish_login, platform_session};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, MIN_PASSWORD_LENGTH};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub user: Option<CurrentUser>,
    pub error: Option<String>,
}

/// Maps a redirect error code to the message shown in the banner.
///
/// Unknown codes pass through unchanged; Askama escapes them on render.
fn error_message(code: &str) -> String {
    match code {
        "credentials" => "Invalid email or password.".to_string(),
        "email_taken" => "An account with this email already exists.".to_string(),
        "invalid_email" => "Please enter a valid email address.".to_string(),
        "password_too_short" => {
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters.")
        }
        "name_required" => "Please enter your name.".to_string(),
        "session" => "Could not start your session. Please try again.".to_string(),
        "failed" => "Something went wrong. Please try again.".to_string(),
        other => other.to_string(),
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    LoginTemplate {
        user,
        error: query.error.as_deref().map(error_message),
        success: query.success,
    }
}

/// Handle login form submission.
///
/// Creates an email/password session on the platform and stores the result
/// in the local session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.auth().login(&form.email, &form.password).await {
        Ok(login) => {
            if let Err(e) = establish_login(&session, &login.user, &login.session_secret).await {
                tracing::error!("Failed to set session: {e}");
                return Redirect::to("/auth/login?error=session").into_response();
            }

            set_sentry_user(&login.user.id, Some(login.user.email.as_str()));
            Redirect::to("/dashboard").into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Login failed: invalid credentials");
            Redirect::to("/auth/login?error=credentials").into_response()
        }
        Err(AuthError::InvalidEmail(_)) => {
            Redirect::to("/auth/login?error=invalid_email").into_response()
        }
        Err(e) => {
            tracing::error!("Login failed: {e}");
            Redirect::to("/auth/login?error=failed").into_response()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    RegisterTemplate {
        user,
        error: query.error.as_deref().map(error_message),
    }
}

/// Handle registration form submission.
///
/// Creates the account and logs it straight in; there is no activation
/// step.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    match state
        .auth()
        .register(&form.name, &form.email, &form.password)
        .await
    {
        Ok(login) => {
            if let Err(e) = establish_login(&session, &login.user, &login.session_secret).await {
                tracing::error!("Failed to set session after registration: {e}");
                return Redirect::to("/auth/login?error=session").into_response();
            }

            set_sentry_user(&login.user.id, Some(login.user.email.as_str()));
            Redirect::to("/dashboard").into_response()
        }
        Err(AuthError::EmailTaken) => {
            Redirect::to("/auth/register?error=email_taken").into_response()
        }
        Err(AuthError::WeakPassword) => {
            Redirect::to("/auth/register?error=password_too_short").into_response()
        }
        Err(AuthError::NameRequired) => {
            Redirect::to("/auth/register?error=name_required").into_response()
        }
        Err(AuthError::InvalidEmail(_)) => {
            Redirect::to("/auth/register?error=invalid_email").into_response()
        }
        Err(e) => {
            tracing::error!("Registration failed: {e}");
            Redirect::to("/auth/register?error=failed").into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Deletes the platform session (best effort), then destroys the local
/// session regardless so the user is logged out either way.
pub async fn logout(State(state): State<AppState>, session: Session) -> Redirect {
    if let Some(secret) = platform_session(&session).await
        && let Err(e) = state.auth().logout(&secret).await
    {
        tracing::warn!("Failed to delete platform session: {e}");
    }

    if let Err(e) = clear_login(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    clear_sentry_user();
    Redirect::to("/")
}
