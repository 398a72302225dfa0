//! Integration tests for the shared location pages.
//!
//! These tests require:
//! - The web server running (cargo run -p wherebuy-web)
//! - A provisioned Appwrite project (cargo run -p wherebuy-cli -- provision)
//!
//! Each test registers its own throwaway account and creates locations with
//! unique product names, so they can run against a shared project.
//!
//! Run with: cargo test -p wherebuy-integration-tests -- --ignored

use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode};
use uuid::Uuid;

use wherebuy_core::limits;

/// Password for throwaway accounts; satisfies the 8 character minimum.
const TEST_PASSWORD: &str = "integration-test-pw-1";

/// Base URL for the web server (configurable via environment).
fn web_base_url() -> String {
    std::env::var("WHEREBUY_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Cookie-holding client that does not follow redirects, so tests can
/// assert on Location headers.
fn no_redirect_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

fn location_header(resp: &Response) -> String {
    resp.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Client with a fresh registered account in its cookie jar.
async fn authenticated_client() -> Client {
    let client = no_redirect_client();
    let email = format!("integration-test-{}@example.com", Uuid::new_v4());

    let resp = client
        .post(format!("{}/auth/register", web_base_url()))
        .form(&[
            ("name", "Integration Test"),
            ("email", email.as_str()),
            ("password", TEST_PASSWORD),
        ])
        .send()
        .await
        .expect("Failed to register test account");

    assert!(
        resp.status().is_redirection(),
        "Expected redirect after registration, got: {}",
        resp.status()
    );
    client
}

/// Submit the add-location form with a unique product name.
///
/// Returns the product name so tests can find the location again.
async fn create_test_location(client: &Client) -> String {
    let product_name = format!("Integration Widget {}", Uuid::new_v4());

    let resp = client
        .post(format!("{}/wherebuy", web_base_url()))
        .form(&[
            ("product_name", product_name.as_str()),
            ("description", "Created by an integration test"),
            ("price", "12000"),
            ("currency", "VND"),
            ("latitude", "10.7769"),
            ("longitude", "106.7009"),
            ("address", "1 Integration Street, District 1"),
            ("contact_info", "0901234567"),
            ("contact_type", "both"),
        ])
        .send()
        .await
        .expect("Failed to create location");

    let location = location_header(&resp);
    assert!(
        location.starts_with("/wherebuy?success="),
        "Expected success redirect, got: {location}"
    );
    product_name
}

/// Pull a location id out of browse markup by its product name.
///
/// Cards open with `hx-get="/wherebuy/{id}/detail"` before the name is
/// rendered, so the id sits in the last opener preceding the name.
fn extract_location_id(body: &str, product_name: &str) -> Option<String> {
    let (head, _) = body.split_once(product_name)?;
    let (_, tail) = head.rsplit_once("hx-get=\"/wherebuy/")?;
    let (id, _) = tail.split_once('/')?;
    Some(id.to_string())
}

/// Fetch the browse page and find the id of a location by product name.
async fn find_location_id(client: &Client, product_name: &str) -> String {
    let body = client
        .get(format!("{}/wherebuy", web_base_url()))
        .send()
        .await
        .expect("Failed to get browse page")
        .text()
        .await
        .expect("Failed to read browse page");

    extract_location_id(&body, product_name).expect("Created location not in browse page")
}

// ============================================================================
// Browse & Search Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_browse_requires_login() {
    let resp = no_redirect_client()
        .get(format!("{}/wherebuy", web_base_url()))
        .send()
        .await
        .expect("Failed to get browse page");

    assert!(resp.status().is_redirection());
    assert_eq!(location_header(&resp), "/auth/login");
}

#[tokio::test]
#[ignore = "Requires running web server and Appwrite project"]
async fn test_browse_page_renders() {
    let client = authenticated_client().await;
    let resp = client
        .get(format!("{}/wherebuy", web_base_url()))
        .send()
        .await
        .expect("Failed to get browse page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");

    assert!(body.contains("id=\"location-list\""));
    assert!(body.contains("name=\"q\""));
    assert!(body.contains("hx-get=\"/wherebuy/search\""));
}

#[tokio::test]
#[ignore = "Requires running web server and Appwrite project"]
async fn test_search_returns_fragment() {
    let client = authenticated_client().await;
    let resp = client
        .get(format!("{}/wherebuy/search", web_base_url()))
        .query(&[("q", "no-such-product-zzz")])
        .send()
        .await
        .expect("Failed to search");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");

    // A fragment for the list container, not a full page.
    assert!(!body.contains("nav-links"));
    assert!(body.contains("No locations yet"));
}

#[tokio::test]
#[ignore = "Requires running web server and Appwrite project"]
async fn test_search_finds_created_location() {
    let client = authenticated_client().await;
    let product_name = create_test_location(&client).await;

    let resp = client
        .get(format!("{}/wherebuy/search", web_base_url()))
        .query(&[("q", product_name.as_str())])
        .send()
        .await
        .expect("Failed to search");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains(&product_name));
}

// ============================================================================
// Create Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_create_requires_login() {
    let resp = no_redirect_client()
        .post(format!("{}/wherebuy", web_base_url()))
        .form(&[
            ("product_name", "Anonymous Widget"),
            ("description", "Should never be stored"),
            ("price", "1"),
            ("currency", "VND"),
            ("latitude", "0"),
            ("longitude", "0"),
            ("address", "Nowhere"),
            ("contact_info", "nobody"),
            ("contact_type", "both"),
        ])
        .send()
        .await
        .expect("Failed to submit location");

    assert!(resp.status().is_redirection());
    assert_eq!(location_header(&resp), "/auth/login");
}

#[tokio::test]
#[ignore = "Requires running web server and Appwrite project"]
async fn test_create_and_browse_location() {
    let client = authenticated_client().await;
    let product_name = create_test_location(&client).await;

    let resp = client
        .get(format!("{}/wherebuy", web_base_url()))
        .send()
        .await
        .expect("Failed to get browse page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains(&product_name));
}

#[tokio::test]
#[ignore = "Requires running web server and Appwrite project"]
async fn test_create_rejects_overlong_product_name() {
    let client = authenticated_client().await;
    let too_long = "a".repeat(limits::PRODUCT_NAME + 1);

    let resp = client
        .post(format!("{}/wherebuy", web_base_url()))
        .form(&[
            ("product_name", too_long.as_str()),
            ("description", "Created by an integration test"),
            ("price", "12000"),
            ("currency", "VND"),
            ("latitude", "10.7769"),
            ("longitude", "106.7009"),
            ("address", "1 Integration Street, District 1"),
            ("contact_info", "0901234567"),
            ("contact_type", "both"),
        ])
        .send()
        .await
        .expect("Failed to submit location");

    assert!(resp.status().is_redirection());
    assert!(location_header(&resp).starts_with("/wherebuy?error="));
}

// ============================================================================
// Detail & Delete Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running web server and Appwrite project"]
async fn test_detail_shows_creator_actions() {
    let client = authenticated_client().await;
    let product_name = create_test_location(&client).await;
    let id = find_location_id(&client, &product_name).await;

    let resp = client
        .get(format!("{}/wherebuy/{id}/detail", web_base_url()))
        .send()
        .await
        .expect("Failed to get detail fragment");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");

    assert!(body.contains(&product_name));
    assert!(body.contains("Shared by"));
    assert!(body.contains("Open in Google Maps"));
    // Creator sees the delete action.
    assert!(body.contains("Delete"));
}

#[tokio::test]
#[ignore = "Requires running web server and Appwrite project"]
async fn test_delete_requires_creator() {
    let creator = authenticated_client().await;
    let product_name = create_test_location(&creator).await;
    let id = find_location_id(&creator, &product_name).await;

    // A different account must not be able to delete it.
    let other = authenticated_client().await;
    let resp = other
        .post(format!("{}/wherebuy/{id}/delete", web_base_url()))
        .send()
        .await
        .expect("Failed to submit delete");

    assert!(resp.status().is_redirection());
    assert!(location_header(&resp).contains("error=Only%20the%20creator"));

    // Still visible afterwards.
    let resp = creator
        .get(format!("{}/wherebuy/{id}/detail", web_base_url()))
        .send()
        .await
        .expect("Failed to get detail fragment");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running web server and Appwrite project"]
async fn test_delete_own_location() {
    let client = authenticated_client().await;
    let product_name = create_test_location(&client).await;
    let id = find_location_id(&client, &product_name).await;

    let resp = client
        .post(format!("{}/wherebuy/{id}/delete", web_base_url()))
        .send()
        .await
        .expect("Failed to submit delete");

    assert!(resp.status().is_redirection());
    assert_eq!(location_header(&resp), "/wherebuy?success=Location%20deleted");

    let resp = client
        .get(format!("{}/wherebuy/{id}/detail", web_base_url()))
        .send()
        .await
        .expect("Failed to get detail fragment");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
