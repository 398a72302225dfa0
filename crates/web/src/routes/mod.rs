//! HTTP route handlers for the web app.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Landing page
//! GET  /health                  - Health check
//! GET  /dashboard               - Account overview (requires auth)
//!
//! # Auth
//! GET  /auth/login              - Login page
//! POST /auth/login              - Login action
//! GET  /auth/register           - Register page
//! POST /auth/register           - Register action
//! POST /auth/logout             - Logout action
//!
//! # Wherebuy
//! GET  /wherebuy                - Browse locations
//! POST /wherebuy                - Add a location (requires auth)
//! GET  /wherebuy/search         - Filtered list fragment (HTMX)
//! GET  /wherebuy/{id}/detail    - Detail card fragment (HTMX)
//! POST /wherebuy/{id}/delete    - Delete a location (requires auth, creator only)
//! ```

pub mod auth;
pub mod dashboard;
pub mod home;
pub mod wherebuy;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the wherebuy routes router.
pub fn wherebuy_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wherebuy::index).post(wherebuy::create))
        .route("/search", get(wherebuy::search))
        .route("/{id}/detail", get(wherebuy::detail))
        .route("/{id}/delete", post(wherebuy::delete))
}

/// Create all routes for the web app.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing page
        .route("/", get(home::home))
        // Account overview
        .route("/dashboard", get(dashboard::dashboard))
        // Auth routes
        .nest("/auth", auth_routes())
        // Wherebuy routes
        .nest("/wherebuy", wherebuy_routes())
}
