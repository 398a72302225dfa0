//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;

/// A feature highlight shown on the landing page.
#[derive(Clone)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

/// Static feature highlights for the landing page grid.
fn features() -> Vec<Feature> {
    vec![
        Feature {
            title: "Share your finds",
            description:
                "Found a good deal? Pin the shop with its product, price, and exact coordinates \
                 so others can buy it too.",
        },
        Feature {
            title: "Search as you type",
            description:
                "Filter every shared location by product, description, or address and see \
                 results instantly, keystroke by keystroke.",
        },
        Feature {
            title: "Navigate there",
            description:
                "Every physical shop links straight to Google Maps, so getting there is one \
                 tap away.",
        },
    ]
}

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub user: Option<CurrentUser>,
    pub features: Vec<Feature>,
}

/// Display the landing page.
pub async fn home(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    HomeTemplate {
        user,
        features: features(),
    }
}
