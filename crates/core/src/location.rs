//! The shopping-location entity and its input forms.
//!
//! A [`Location`] mirrors a document in the remote `locations` collection,
//! including the store-assigned `$id`. [`LocationDraft`] is the validated
//! shape of user input before creator identity and timestamps are stamped
//! on, and [`LocationPatch`] carries a partial update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ContactType, Currency, LocationId, UserId};

/// Field length limits, shared with the remote collection schema.
///
/// The provisioning procedure creates string attributes with exactly these
/// sizes, so draft validation and the store reject the same inputs.
pub mod limits {
    /// `productName` attribute size.
    pub const PRODUCT_NAME: usize = 255;
    /// `description` attribute size.
    pub const DESCRIPTION: usize = 1000;
    /// `currency` attribute size.
    pub const CURRENCY: usize = 10;
    /// `address` attribute size.
    pub const ADDRESS: usize = 500;
    /// `contactInfo` attribute size.
    pub const CONTACT_INFO: usize = 255;
    /// `userId` attribute size.
    pub const USER_ID: usize = 50;
    /// `userName` attribute size.
    pub const USER_NAME: usize = 255;
    /// `createdAt`/`updatedAt` attribute size (ISO-8601 strings).
    pub const TIMESTAMP: usize = 50;
}

/// Errors from validating user-supplied location input.
///
/// Numeric fields are never rejected for being unparsable: the form layer
/// coerces garbage to 0 before validation. Range checks still apply.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty.
    #[error("{field} is required")]
    Required {
        /// Name of the empty field.
        field: &'static str,
    },
    /// A text field exceeds its attribute size.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Name of the oversized field.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
    },
    /// Price is below zero.
    #[error("price must not be negative")]
    NegativePrice,
    /// Latitude outside -90..=90 degrees.
    #[error("latitude must be between -90 and 90")]
    LatitudeOutOfRange,
    /// Longitude outside -180..=180 degrees.
    #[error("longitude must be between -180 and 180")]
    LongitudeOutOfRange,
}

/// A shared shopping location, as stored in the remote collection.
///
/// Field names serialize in camelCase to match the collection attributes;
/// the store's own `$id` metadata maps onto [`Location::id`]. `userId` and
/// `userName` are the denormalized creator identity, stamped at creation
/// and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Store-assigned document id.
    #[serde(rename = "$id")]
    pub id: LocationId,
    /// What is sold here.
    pub product_name: String,
    /// Free-form description of the product or deal.
    pub description: String,
    /// Asking price, non-negative.
    pub price: f64,
    /// Currency code for the price.
    pub currency: Currency,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Human-readable address.
    pub address: String,
    /// Free-form phone/email/URL for reaching the seller.
    pub contact_info: String,
    /// Whether the place can be visited, ordered from, or both.
    pub contact_type: ContactType,
    /// Creator's user id.
    pub user_id: UserId,
    /// Creator's display name.
    pub user_name: String,
    /// Creation time, stamped by the access layer.
    pub created_at: DateTime<Utc>,
    /// Last update time; absent until the first partial update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Location {
    /// Whether the given user created this location.
    #[must_use]
    pub fn is_created_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Whether a map-navigation action should be offered.
    #[must_use]
    pub const fn offers_navigation(&self) -> bool {
        self.contact_type.offers_navigation()
    }

    /// External map-search URL centered on the stored coordinates.
    #[must_use]
    pub fn maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            self.latitude, self.longitude
        )
    }
}

/// Validated user input for a new location.
///
/// Carries everything the user supplies; the access layer merges in the
/// creator identity and creation timestamp when persisting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDraft {
    pub product_name: String,
    pub description: String,
    pub price: f64,
    pub currency: Currency,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub contact_info: String,
    pub contact_type: ContactType,
}

impl LocationDraft {
    /// Check required fields, length limits, and numeric ranges.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in field order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_within("product name", &self.product_name, limits::PRODUCT_NAME)?;
        require_within("description", &self.description, limits::DESCRIPTION)?;

        if self.price < 0.0 {
            return Err(ValidationError::NegativePrice);
        }

        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::LongitudeOutOfRange);
        }

        require_within("address", &self.address, limits::ADDRESS)?;
        require_within("contact info", &self.contact_info, limits::CONTACT_INFO)?;

        Ok(())
    }
}

fn require_within(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    if value.len() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// A partial update to an existing location.
///
/// Only the fields present are sent to the store; creator identity and
/// `createdAt` are never part of a patch. The access layer stamps
/// `updatedAt` alongside whatever is given here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<ContactType>,
}

impl LocationPatch {
    /// Whether the patch changes anything at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.currency.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.address.is_none()
            && self.contact_info.is_none()
            && self.contact_type.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> LocationDraft {
        LocationDraft {
            product_name: "Fresh Bananas".to_owned(),
            description: "Organic, $2/kg".to_owned(),
            price: 2.0,
            currency: Currency::parse("USD").unwrap(),
            latitude: 10.8,
            longitude: 106.6,
            address: "123 Market St".to_owned(),
            contact_info: "+1-555-0100".to_owned(),
            contact_type: ContactType::Both,
        }
    }

    fn location() -> Location {
        let d = draft();
        Location {
            id: LocationId::new("loc1"),
            product_name: d.product_name,
            description: d.description,
            price: d.price,
            currency: d.currency,
            latitude: d.latitude,
            longitude: d.longitude,
            address: d.address,
            contact_info: d.contact_info,
            contact_type: d.contact_type,
            user_id: UserId::new("u1"),
            user_name: "Alice".to_owned(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_blank_required_fields_rejected() {
        let mut d = draft();
        d.product_name = "   ".to_owned();
        assert_eq!(
            d.validate(),
            Err(ValidationError::Required {
                field: "product name"
            })
        );

        let mut d = draft();
        d.address = String::new();
        assert_eq!(
            d.validate(),
            Err(ValidationError::Required { field: "address" })
        );
    }

    #[test]
    fn test_length_limits_match_schema() {
        let mut d = draft();
        d.description = "x".repeat(limits::DESCRIPTION + 1);
        assert_eq!(
            d.validate(),
            Err(ValidationError::TooLong {
                field: "description",
                max: limits::DESCRIPTION
            })
        );

        let mut d = draft();
        d.description = "x".repeat(limits::DESCRIPTION);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut d = draft();
        d.price = -0.01;
        assert_eq!(d.validate(), Err(ValidationError::NegativePrice));

        d.price = 0.0;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_coordinate_ranges() {
        let mut d = draft();
        d.latitude = 90.5;
        assert_eq!(d.validate(), Err(ValidationError::LatitudeOutOfRange));

        let mut d = draft();
        d.longitude = -180.5;
        assert_eq!(d.validate(), Err(ValidationError::LongitudeOutOfRange));

        let mut d = draft();
        d.latitude = -90.0;
        d.longitude = 180.0;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_maps_url_contains_exact_coordinates() {
        let loc = location();
        assert_eq!(
            loc.maps_url(),
            "https://www.google.com/maps/search/?api=1&query=10.8,106.6"
        );
    }

    #[test]
    fn test_navigation_follows_contact_type() {
        let mut loc = location();
        loc.contact_type = ContactType::Online;
        assert!(!loc.offers_navigation());

        loc.contact_type = ContactType::Offline;
        assert!(loc.offers_navigation());
    }

    #[test]
    fn test_creator_check() {
        let loc = location();
        assert!(loc.is_created_by(&UserId::new("u1")));
        assert!(!loc.is_created_by(&UserId::new("u2")));
    }

    #[test]
    fn test_document_wire_shape() {
        let json = serde_json::json!({
            "$id": "6651f2a0003c",
            "$collectionId": "locations",
            "$databaseId": "wherebuy",
            "$permissions": [],
            "productName": "Fresh Bananas",
            "description": "Organic, $2/kg",
            "price": 2.0,
            "currency": "USD",
            "latitude": 10.8,
            "longitude": 106.6,
            "address": "123 Market St",
            "contactInfo": "+1-555-0100",
            "contactType": "both",
            "userId": "u1",
            "userName": "Alice",
            "createdAt": "2026-08-20T09:30:00.000Z"
        });

        let loc: Location = serde_json::from_value(json).unwrap();
        assert_eq!(loc.id.as_str(), "6651f2a0003c");
        assert_eq!(loc.product_name, "Fresh Bananas");
        assert_eq!(loc.user_name, "Alice");
        assert_eq!(loc.contact_type, ContactType::Both);
        assert!(loc.updated_at.is_none());
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = LocationPatch {
            price: Some(3.5),
            ..LocationPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "price": 3.5 }));
        assert!(!patch.is_empty());
        assert!(LocationPatch::default().is_empty());
    }
}
