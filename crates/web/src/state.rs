//! Application state shared across handlers.

use std::sync::Arc;

use crate::appwrite::{AccountClient, AppwriteClient, DatabasesClient};
use crate::config::WebConfig;
use crate::services::{AuthService, LocationService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the platform clients and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    auth: AuthService,
    locations: LocationService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Builds one platform transport and hands clones of it to the two
    /// services. The web client carries no API key; reads run as guest and
    /// writes attach the acting user's session secret per call.
    #[must_use]
    pub fn new(config: WebConfig) -> Self {
        let client = AppwriteClient::new(&config.appwrite);
        let auth = AuthService::new(AccountClient::new(client.clone()));
        let locations = LocationService::new(
            DatabasesClient::new(client),
            config.appwrite.database_id.clone(),
            config.appwrite.collection_id.clone(),
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                auth,
                locations,
            }),
        }
    }

    /// Get a reference to the web configuration.
    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// Get a reference to the location service.
    #[must_use]
    pub fn locations(&self) -> &LocationService {
        &self.inner.locations
    }
}
