//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/dashboard.html")]
pub struct DashboardTemplate {
    pub user: Option<CurrentUser>,
}

/// Display the account overview for the logged-in user.
pub async fn dashboard(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    DashboardTemplate { user: Some(user) }
}
