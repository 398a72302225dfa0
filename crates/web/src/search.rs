//! In-memory filtering for the browse view.
//!
//! The browse page loads the most recent locations once and narrows them on
//! every keystroke, so filtering has to be cheap and purely in-memory. A
//! query matches a location when it appears, case-insensitively, in the
//! product name, the description, or the address.

use wherebuy_core::Location;

/// Filters `locations` by `query`, preserving order.
///
/// A query that is empty or all whitespace matches everything. Otherwise
/// the raw query (lowercased, whitespace intact) must be a substring of at
/// least one of the three searched fields.
#[must_use]
pub fn filter_locations<'a>(locations: &'a [Location], query: &str) -> Vec<&'a Location> {
    if query.trim().is_empty() {
        return locations.iter().collect();
    }

    let needle = query.to_lowercase();
    locations
        .iter()
        .filter(|location| {
            location.product_name.to_lowercase().contains(&needle)
                || location.description.to_lowercase().contains(&needle)
                || location.address.to_lowercase().contains(&needle)
        })
        .collect()
}
