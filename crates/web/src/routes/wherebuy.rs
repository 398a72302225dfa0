//! Wherebuy route handlers.
//!
//! The browse page plus the HTMX fragments it drives: the live-filtered
//! location list and the detail card. Creates and deletes are plain form
//! posts that redirect back to the page with a message in the query string.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Deserializer};
use tower_sessions::Session;
use wherebuy_core::{Location, LocationDraft, LocationId};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{RequireAuth, platform_session};
use crate::models::CurrentUser;
use crate::routes::auth::MessageQuery;
use crate::search::filter_locations;
use crate::services::locations::{BROWSE_LIST_LIMIT, LocationError};
use crate::state::AppState;

// =============================================================================
// Form and Query Types
// =============================================================================

/// New location form data.
///
/// Numeric fields deserialize leniently: the browser's number inputs can
/// submit empty strings, which become zero rather than a 422.
#[derive(Debug, Deserialize)]
pub struct LocationForm {
    pub product_name: String,
    pub description: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    pub currency: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: f64,
    pub address: String,
    pub contact_info: String,
    pub contact_type: String,
}

impl LocationForm {
    /// Converts the raw form into a draft. The select-backed fields fall
    /// back to their defaults when tampered with; real validation happens
    /// in [`LocationDraft::validate`].
    fn into_draft(self) -> LocationDraft {
        LocationDraft {
            product_name: self.product_name,
            description: self.description,
            price: self.price,
            currency: self.currency.parse().unwrap_or_default(),
            latitude: self.latitude,
            longitude: self.longitude,
            address: self.address,
            contact_info: self.contact_info,
            contact_type: self.contact_type.parse().unwrap_or_default(),
        }
    }
}

/// Deserialize empty or unparseable number fields as zero.
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| s.trim().parse().ok()).unwrap_or_default())
}

/// Live search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Browse page template.
#[derive(Template, WebTemplate)]
#[template(path = "wherebuy/index.html")]
pub struct WherebuyTemplate {
    pub user: Option<CurrentUser>,
    pub locations: Vec<Location>,
    /// Failure loading the list itself, shown inside the list area.
    pub load_error: Option<String>,
    /// Message carried over from a redirect, shown in the page banner.
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Location list template (HTMX fragment).
#[derive(Template, WebTemplate)]
#[template(path = "wherebuy/partials/location_list.html")]
pub struct LocationListTemplate {
    pub locations: Vec<Location>,
    pub load_error: Option<String>,
}

/// Location detail card template (HTMX fragment).
#[derive(Template, WebTemplate)]
#[template(path = "wherebuy/partials/location_detail.html")]
pub struct LocationDetailTemplate {
    pub location: Location,
    pub is_creator: bool,
}

// =============================================================================
// Page Routes
// =============================================================================

/// Display the browse page with the most recent locations.
///
/// A load failure renders the page with an inline error instead of failing
/// the whole request; the add form stays usable.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let (locations, load_error) = match state.locations().list(Some(BROWSE_LIST_LIMIT)).await {
        Ok(locations) => (locations, None),
        Err(e) => {
            tracing::error!("Failed to load locations: {e}");
            (
                Vec::new(),
                Some("Failed to load locations. Please try again.".to_string()),
            )
        }
    };

    WherebuyTemplate {
        user: Some(user),
        locations,
        load_error,
        error: query.error,
        success: query.success,
    }
}

// =============================================================================
// HTMX Fragments
// =============================================================================

/// Return the location list filtered by the live search query.
pub async fn search(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    match state.locations().list(Some(BROWSE_LIST_LIMIT)).await {
        Ok(all) => {
            let locations = filter_locations(&all, &query.q)
                .into_iter()
                .cloned()
                .collect();
            LocationListTemplate {
                locations,
                load_error: None,
            }
        }
        Err(e) => {
            tracing::error!("Failed to load locations for search: {e}");
            LocationListTemplate {
                locations: Vec::new(),
                load_error: Some("Failed to load locations. Please try again.".to_string()),
            }
        }
    }
}

/// Return the detail card for one location.
pub async fn detail(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let location = state.locations().get(&LocationId::from(id)).await?;
    let is_creator = location.is_created_by(&user.id);

    add_breadcrumb(
        "wherebuy",
        "Viewed location detail",
        Some(&[("location_id", location.id.as_str())]),
    );

    Ok(LocationDetailTemplate {
        location,
        is_creator,
    })
}

// =============================================================================
// Mutations
// =============================================================================

/// Handle new-location form submission.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<LocationForm>,
) -> Response {
    let draft = form.into_draft();
    if let Err(e) = draft.validate() {
        return redirect_with_error(&e.to_string());
    }

    let Some(secret) = platform_session(&session).await else {
        return Redirect::to("/auth/login").into_response();
    };

    match state.locations().create(&draft, &user, &secret).await {
        Ok(location) => {
            add_breadcrumb(
                "wherebuy",
                "Created location",
                Some(&[("location_id", location.id.as_str())]),
            );
            Redirect::to("/wherebuy?success=Location%20added").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create location: {e}");
            redirect_with_error("Failed to add location. Please try again.")
        }
    }
}

/// Handle location deletion.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(id): Path<String>,
) -> Response {
    let Some(secret) = platform_session(&session).await else {
        return Redirect::to("/auth/login").into_response();
    };

    let id = LocationId::from(id);
    match state.locations().delete(&id, &user.id, &secret).await {
        Ok(()) => {
            add_breadcrumb(
                "wherebuy",
                "Deleted location",
                Some(&[("location_id", id.as_str())]),
            );
            Redirect::to("/wherebuy?success=Location%20deleted").into_response()
        }
        Err(LocationError::NotCreator) => {
            redirect_with_error("Only the creator can delete a location.")
        }
        Err(LocationError::NotFound) => redirect_with_error("That location no longer exists."),
        Err(e) => {
            tracing::error!("Failed to delete location: {e}");
            redirect_with_error("Failed to delete location. Please try again.")
        }
    }
}

/// Redirect back to the browse page with an error message in the query
/// string.
fn redirect_with_error(message: &str) -> Response {
    let url = format!("/wherebuy?error={}", urlencoding::encode(message));
    Redirect::to(&url).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form_from(query: &str) -> LocationForm {
        serde_urlencoded::from_str(query).unwrap()
    }

    const BASE: &str = "product_name=Bananas&description=Sweet&currency=VND&address=12%20Market%20St&contact_info=0123&contact_type=both";

    #[test]
    fn test_form_parses_numbers() {
        let form = form_from(&format!("{BASE}&price=2.5&latitude=10.8&longitude=106.6"));
        assert!((form.price - 2.5).abs() < f64::EPSILON);
        assert!((form.latitude - 10.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_form_coerces_empty_numbers_to_zero() {
        let form = form_from(&format!("{BASE}&price=&latitude=&longitude="));
        assert!(form.price.abs() < f64::EPSILON);
        assert!(form.latitude.abs() < f64::EPSILON);
        assert!(form.longitude.abs() < f64::EPSILON);
    }

    #[test]
    fn test_form_coerces_garbage_numbers_to_zero() {
        let form = form_from(&format!("{BASE}&price=abc&latitude=1.2.3&longitude=106.6"));
        assert!(form.price.abs() < f64::EPSILON);
        assert!(form.latitude.abs() < f64::EPSILON);
        assert!((form.longitude - 106.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_into_draft_defaults_tampered_selects() {
        let mut form = form_from(&format!("{BASE}&price=1&latitude=0&longitude=0"));
        form.currency = "NOT_A_CURRENCY_AT_ALL".to_string();
        form.contact_type = "carrier-pigeon".to_string();

        let draft = form.into_draft();
        assert_eq!(draft.currency.as_str(), "VND");
        assert_eq!(draft.contact_type, wherebuy_core::ContactType::Both);
    }
}
