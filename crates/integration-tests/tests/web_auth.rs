//! Integration tests for registration, login, and logout.
//!
//! These tests require:
//! - The web server running (cargo run -p wherebuy-web)
//! - A provisioned Appwrite project (cargo run -p wherebuy-cli -- provision)
//!
//! Each test registers its own throwaway account, so they can run against
//! any project without fixture data.
//!
//! Run with: cargo test -p wherebuy-integration-tests -- --ignored

use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode};
use uuid::Uuid;

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

/// Unique email for a throwaway account.
fn test_email() -> String {
    format!("integration-test-{}@example.com", Uuid::new_v4())
}

fn location_header(resp: &Response) -> String {
    resp.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Register a fresh account, leaving its session in the client's cookie jar.
async fn register(client: &Client, email: &str) -> Response {
    client
        .post(format!("{}/auth/register", web_base_url()))
        .form(&[
            ("name", "Integration Test"),
            ("email", email),
            ("password", TEST_PASSWORD),
        ])
        .send()
        .await
        .expect("Failed to submit registration")
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running web server and Appwrite project"]
async fn test_register_redirects_to_dashboard() {
    let client = no_redirect_client();
    let email = test_email();

    let resp = register(&client, &email).await;
    assert!(
        resp.status().is_redirection(),
        "Expected redirect after registration, got: {}",
        resp.status()
    );
    assert_eq!(location_header(&resp), "/dashboard");

    // The session cookie from the redirect should authenticate follow-ups.
    let resp = client
        .get(format!("{}/dashboard", web_base_url()))
        .send()
        .await
        .expect("Failed to get dashboard");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains(&email));
}

#[tokio::test]
#[ignore = "Requires running web server and Appwrite project"]
async fn test_register_rejects_short_password() {
    let client = no_redirect_client();

    let resp = client
        .post(format!("{}/auth/register", web_base_url()))
        .form(&[
            ("name", "Integration Test"),
            ("email", test_email().as_str()),
            ("password", "short"),
        ])
        .send()
        .await
        .expect("Failed to submit registration");

    assert!(resp.status().is_redirection());
    assert!(location_header(&resp).contains("error=password_too_short"));
}

#[tokio::test]
#[ignore = "Requires running web server and Appwrite project"]
async fn test_register_rejects_missing_name() {
    let client = no_redirect_client();

    let resp = client
        .post(format!("{}/auth/register", web_base_url()))
        .form(&[
            ("name", "  "),
            ("email", test_email().as_str()),
            ("password", TEST_PASSWORD),
        ])
        .send()
        .await
        .expect("Failed to submit registration");

    assert!(resp.status().is_redirection());
    assert!(location_header(&resp).contains("error=name_required"));
}

#[tokio::test]
#[ignore = "Requires running web server and Appwrite project"]
async fn test_register_rejects_duplicate_email() {
    let client = no_redirect_client();
    let email = test_email();

    register(&client, &email).await;

    // Same address again, from a fresh session.
    let resp = register(&no_redirect_client(), &email).await;
    assert!(resp.status().is_redirection());
    assert!(location_header(&resp).contains("error=email_taken"));
}

// ============================================================================
// Login & Logout Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running web server and Appwrite project"]
async fn test_login_rejects_wrong_password() {
    let email = test_email();
    register(&no_redirect_client(), &email).await;

    let client = no_redirect_client();
    let resp = client
        .post(format!("{}/auth/login", web_base_url()))
        .form(&[("email", email.as_str()), ("password", "wrong-password-1")])
        .send()
        .await
        .expect("Failed to submit login");

    assert!(resp.status().is_redirection());
    assert!(location_header(&resp).contains("error=credentials"));
}

#[tokio::test]
#[ignore = "Requires running web server and Appwrite project"]
async fn test_login_logout_roundtrip() {
    let email = test_email();
    register(&no_redirect_client(), &email).await;

    // Log in from a fresh session.
    let client = no_redirect_client();
    let resp = client
        .post(format!("{}/auth/login", web_base_url()))
        .form(&[("email", email.as_str()), ("password", TEST_PASSWORD)])
        .send()
        .await
        .expect("Failed to submit login");

    assert!(resp.status().is_redirection());
    assert_eq!(location_header(&resp), "/dashboard");

    // Log out and confirm the session no longer works.
    let resp = client
        .post(format!("{}/auth/logout", web_base_url()))
        .send()
        .await
        .expect("Failed to submit logout");

    assert!(resp.status().is_redirection());
    assert_eq!(location_header(&resp), "/");

    let resp = client
        .get(format!("{}/dashboard", web_base_url()))
        .send()
        .await
        .expect("Failed to get dashboard");

    assert!(resp.status().is_redirection());
    assert_eq!(location_header(&resp), "/auth/login");
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_dashboard_requires_login() {
    let resp = no_redirect_client()
        .get(format!("{}/dashboard", web_base_url()))
        .send()
        .await
        .expect("Failed to get dashboard");

    assert!(resp.status().is_redirection());
    assert_eq!(location_header(&resp), "/auth/login");
}

#[tokio::test]
#[ignore = "Requires running web server"]
async fn test_login_page_shows_error_message() {
    let resp = no_redirect_client()
        .get(format!("{}/auth/login?error=credentials", web_base_url()))
        .send()
        .await
        .expect("Failed to get login page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Invalid email or password"));
}
