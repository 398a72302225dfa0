//! HTTP client for the Appwrite REST API.
//!
//! The platform holds all persistent state (user accounts, sessions, and the
//! location collection); this module is the only place that speaks its wire
//! protocol. [`AppwriteClient`] owns the transport and the headers every call
//! carries, while [`AccountClient`] and [`DatabasesClient`] expose the two API
//! surfaces the app uses.
//!
//! Authentication is per-request: reads of public documents go out with no
//! credential at all, user-scoped calls attach an `X-Appwrite-Session` header,
//! and the provisioning CLI constructs its client with a server API key.

pub mod account;
pub mod databases;
pub mod error;
pub mod permission;
pub mod query;

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

pub use account::{Account, AccountClient, AuthSession};
pub use databases::{DatabasesClient, DocumentList, IndexType, SortOrder};
pub use error::{ApiErrorResponse, AppwriteError};
pub use query::Query;

use crate::config::AppwriteConfig;

/// ID sentinel that asks the server to generate a unique identifier.
pub const UNIQUE_ID: &str = "unique()";

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const API_KEY_HEADER: &str = "X-Appwrite-Key";
const SESSION_HEADER: &str = "X-Appwrite-Session";

/// Shared transport for the Appwrite v1 API.
///
/// Cheap to clone; all clones share one connection pool and header set.
#[derive(Clone)]
pub struct AppwriteClient {
    inner: Arc<AppwriteClientInner>,
}

struct AppwriteClientInner {
    http: reqwest::Client,
    endpoint: String,
}

impl AppwriteClient {
    /// Creates a client that authenticates per request (guest reads and
    /// session-scoped writes). This is the client the web app uses.
    ///
    /// # Panics
    ///
    /// Panics if the project ID contains invalid header characters or the
    /// HTTP client cannot be constructed. Both only happen on
    /// misconfiguration at startup.
    #[must_use]
    pub fn new(config: &AppwriteConfig) -> Self {
        Self::build(config, None)
    }

    /// Creates a client that sends a server API key with every request.
    /// Only the provisioning CLI should use this.
    ///
    /// # Panics
    ///
    /// Panics if the project ID or API key contain invalid header characters,
    /// or the HTTP client cannot be constructed.
    #[must_use]
    pub fn with_api_key(config: &AppwriteConfig, api_key: &SecretString) -> Self {
        Self::build(config, Some(api_key))
    }

    fn build(config: &AppwriteConfig, api_key: Option<&SecretString>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            PROJECT_HEADER,
            HeaderValue::from_str(&config.project_id).expect("Invalid project ID for header"),
        );
        if let Some(key) = api_key {
            let mut value = HeaderValue::from_str(key.expose_secret())
                .expect("Invalid API key for header");
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(AppwriteClientInner {
                http,
                endpoint: config.endpoint.trim_end_matches('/').to_string(),
            }),
        }
    }

    /// Starts a request against an API path such as `/account/sessions/email`.
    ///
    /// When `session` is given, the call runs with that user's privileges via
    /// the `X-Appwrite-Session` header; otherwise it runs with whatever the
    /// client's default headers grant (guest, or the CLI's API key).
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        session: Option<&str>,
    ) -> RequestBuilder {
        let url = format!("{}{path}", self.inner.endpoint);
        let builder = self.inner.http.request(method, url);
        match session {
            Some(secret) => builder.header(SESSION_HEADER, secret),
            None => builder,
        }
    }

    /// Sends a request and deserializes the JSON response body.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, AppwriteError> {
        let response = builder.send().await?;
        Self::handle_response(response).await
    }

    /// Sends a request and discards the response body. Used for deletes
    /// (204) and the schema calls whose bodies we do not inspect.
    pub(crate) async fn send_unit(&self, builder: RequestBuilder) -> Result<(), AppwriteError> {
        let response = builder.send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::handle_error_status(response).await)
        }
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, AppwriteError> {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                tracing::error!(error = %e, %status, "Failed to parse API response");
                AppwriteError::Parse(format!("invalid response body: {e}"))
            })
        } else {
            Err(Self::handle_error_status(response).await)
        }
    }

    async fn handle_error_status(response: Response) -> AppwriteError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        // Every Appwrite error carries the same JSON envelope. Fall back to
        // the raw body when it does not.
        let (error_type, message) = match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(api_error) => (api_error.error_type, api_error.message),
            Err(_) => ("unknown".to_string(), body),
        };

        if status != StatusCode::NOT_FOUND && status != StatusCode::CONFLICT {
            tracing::error!(%status, error_type, message, "Appwrite API error");
        }

        AppwriteError::Api {
            status: status.as_u16(),
            error_type,
            message,
        }
    }
}

impl std::fmt::Debug for AppwriteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppwriteClient")
            .field("endpoint", &self.inner.endpoint)
            .finish_non_exhaustive()
    }
}
