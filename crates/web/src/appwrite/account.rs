//! Account and session endpoints.
//!
//! Covers the slice of `/account` the app uses: registration, email/password
//! session creation, fetching the authenticated account, and deleting the
//! current session on logout.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use wherebuy_core::UserId;

use super::{AppwriteClient, AppwriteError, UNIQUE_ID};

/// A user account as returned by `/account`.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Server-assigned user ID.
    #[serde(rename = "$id")]
    pub id: UserId,
    /// Registered email address.
    pub email: String,
    /// Display name.
    pub name: String,
}

/// A session as returned by the session endpoints.
///
/// The `secret` is only populated on creation; subsequent session reads
/// return it blank.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    /// Server-assigned session ID.
    #[serde(rename = "$id")]
    pub id: String,
    /// Owner of the session.
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// Token to send as `X-Appwrite-Session` on user-scoped requests.
    #[serde(default)]
    pub secret: String,
    /// Expiry timestamp in ISO 8601.
    #[serde(default)]
    pub expire: String,
}

#[derive(Serialize)]
struct CreateAccountRequest<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct CreateSessionRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for the `/account` API surface.
#[derive(Debug, Clone)]
pub struct AccountClient {
    client: AppwriteClient,
}

impl AccountClient {
    #[must_use]
    pub const fn new(client: AppwriteClient) -> Self {
        Self { client }
    }

    /// Registers a new account with a server-generated user ID.
    #[instrument(skip(self, password))]
    pub async fn create(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, AppwriteError> {
        let request = self.client.request(Method::POST, "/account", None).json(
            &CreateAccountRequest {
                user_id: UNIQUE_ID,
                email,
                password,
                name,
            },
        );
        self.client.send(request).await
    }

    /// Creates an email/password session. The returned session carries the
    /// secret used to authenticate subsequent requests.
    #[instrument(skip(self, password))]
    pub async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AppwriteError> {
        let request = self
            .client
            .request(Method::POST, "/account/sessions/email", None)
            .json(&CreateSessionRequest { email, password });
        self.client.send(request).await
    }

    /// Fetches the account the session belongs to.
    #[instrument(skip(self, session_secret))]
    pub async fn get(&self, session_secret: &str) -> Result<Account, AppwriteError> {
        let request = self
            .client
            .request(Method::GET, "/account", Some(session_secret));
        self.client.send(request).await
    }

    /// Fetches the session itself, verifying it is still live.
    #[instrument(skip(self, session_secret))]
    pub async fn get_session(&self, session_secret: &str) -> Result<AuthSession, AppwriteError> {
        let request =
            self.client
                .request(Method::GET, "/account/sessions/current", Some(session_secret));
        self.client.send(request).await
    }

    /// Deletes the session, invalidating its secret server-side.
    #[instrument(skip(self, session_secret))]
    pub async fn delete_session(&self, session_secret: &str) -> Result<(), AppwriteError> {
        let request = self.client.request(
            Method::DELETE,
            "/account/sessions/current",
            Some(session_secret),
        );
        self.client.send_unit(request).await
    }
}
