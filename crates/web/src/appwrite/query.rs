//! Builders for Appwrite query strings.
//!
//! Document listing accepts `queries[]` parameters whose values are JSON
//! objects of the form `{"method": "...", "attribute": "...", "values": [...]}`.
//! These helpers mirror the `Query` factory of the official SDKs so call
//! sites read the same way.

use serde_json::json;

/// Factory for query strings accepted by document list endpoints.
pub struct Query;

impl Query {
    /// Matches documents where `attribute` equals `value`.
    #[must_use]
    pub fn equal(attribute: &str, value: &str) -> String {
        json!({
            "method": "equal",
            "attribute": attribute,
            "values": [value],
        })
        .to_string()
    }

    /// Full-text search on `attribute`. Requires a fulltext index on the
    /// attribute, which provisioning creates for `productName`.
    #[must_use]
    pub fn search(attribute: &str, value: &str) -> String {
        json!({
            "method": "search",
            "attribute": attribute,
            "values": [value],
        })
        .to_string()
    }

    /// Sorts results by `attribute`, newest-style descending.
    #[must_use]
    pub fn order_desc(attribute: &str) -> String {
        json!({
            "method": "orderDesc",
            "attribute": attribute,
        })
        .to_string()
    }

    /// Caps the number of returned documents.
    #[must_use]
    pub fn limit(count: u32) -> String {
        json!({
            "method": "limit",
            "values": [count],
        })
        .to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parsed(query: &str) -> Value {
        serde_json::from_str(query).unwrap()
    }

    #[test]
    fn test_equal() {
        let query = parsed(&Query::equal("userId", "u1"));
        assert_eq!(query["method"], "equal");
        assert_eq!(query["attribute"], "userId");
        assert_eq!(query["values"], serde_json::json!(["u1"]));
    }

    #[test]
    fn test_search() {
        let query = parsed(&Query::search("productName", "banana"));
        assert_eq!(query["method"], "search");
        assert_eq!(query["attribute"], "productName");
        assert_eq!(query["values"], serde_json::json!(["banana"]));
    }

    #[test]
    fn test_order_desc() {
        let query = parsed(&Query::order_desc("createdAt"));
        assert_eq!(query["method"], "orderDesc");
        assert_eq!(query["attribute"], "createdAt");
        assert!(query.get("values").is_none());
    }

    #[test]
    fn test_limit() {
        let query = parsed(&Query::limit(100));
        assert_eq!(query["method"], "limit");
        assert_eq!(query["values"], serde_json::json!([100]));
    }
}
