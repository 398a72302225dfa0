//! Integration tests for Wherebuy.
//!
//! These tests drive the real HTTP surface of the web server against a real
//! Appwrite project, so they are all `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Provision the Appwrite schema (once per project)
//! cargo run -p wherebuy-cli -- provision
//!
//! # Start the web server
//! cargo run -p wherebuy-web
//!
//! # Run the integration tests
//! cargo test -p wherebuy-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `web_health` - Health endpoints and public pages
//! - `web_auth` - Registration, login, and logout flows
//! - `web_locations` - Location browse, search, create, and delete
//!
//! # Environment Variables
//!
//! - `WHEREBUY_BASE_URL` - Where the web server listens
//!   (default `http://localhost:3000`)
//!
//! Each test registers its own throwaway account, so no fixture data is
//! needed beyond the provisioned schema.
