//! Web application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `WHEREBUY_BASE_URL` - Public URL for the site
//! - `WHEREBUY_SESSION_SECRET` - Session signing secret (min 32 chars, high entropy)
//! - `APPWRITE_PROJECT_ID` - Appwrite project id
//!
//! ## Optional
//! - `WHEREBUY_HOST` - Bind address (default: 127.0.0.1)
//! - `WHEREBUY_PORT` - Listen port (default: 3000)
//! - `APPWRITE_ENDPOINT` - Appwrite API endpoint (default: <https://cloud.appwrite.io/v1>)
//! - `APPWRITE_DATABASE_ID` - Database holding the locations collection (default: wherebuy)
//! - `APPWRITE_COLLECTION_ID` - Locations collection id (default: locations)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g., production)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use wherebuy_core::{CollectionId, DatabaseId};

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Default Appwrite Cloud endpoint.
pub const DEFAULT_APPWRITE_ENDPOINT: &str = "https://cloud.appwrite.io/v1";
/// Default database id created by the provisioning command.
pub const DEFAULT_DATABASE_ID: &str = "wherebuy";
/// Default collection id created by the provisioning command.
pub const DEFAULT_COLLECTION_ID: &str = "locations";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Web application configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Appwrite backend configuration
    pub appwrite: AppwriteConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Appwrite backend configuration.
///
/// The web binary talks to Appwrite with the project header only: reads run
/// as a guest and writes carry the user's session secret. The server API key
/// exists solely in the provisioning CLI, which layers it on top of this.
#[derive(Debug, Clone)]
pub struct AppwriteConfig {
    /// Appwrite REST endpoint, e.g. `https://cloud.appwrite.io/v1`
    pub endpoint: String,
    /// Appwrite project id
    pub project_id: String,
    /// Database containing the locations collection
    pub database_id: DatabaseId,
    /// Locations collection id
    pub collection_id: CollectionId,
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("WHEREBUY_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("WHEREBUY_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("WHEREBUY_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("WHEREBUY_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("WHEREBUY_BASE_URL")?;
        let session_secret = get_validated_secret("WHEREBUY_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "WHEREBUY_SESSION_SECRET")?;

        let appwrite = AppwriteConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            host,
            port,
            base_url,
            session_secret,
            appwrite,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl AppwriteConfig {
    /// Load the Appwrite settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `APPWRITE_PROJECT_ID` is missing or the
    /// endpoint is not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint = get_env_or_default("APPWRITE_ENDPOINT", DEFAULT_APPWRITE_ENDPOINT);
        url::Url::parse(&endpoint).map_err(|e| {
            ConfigError::InvalidEnvVar("APPWRITE_ENDPOINT".to_string(), e.to_string())
        })?;

        Ok(Self {
            endpoint,
            project_id: get_required_env("APPWRITE_PROJECT_ID")?,
            database_id: DatabaseId::new(get_env_or_default(
                "APPWRITE_DATABASE_ID",
                DEFAULT_DATABASE_ID,
            )),
            collection_id: CollectionId::new(get_env_or_default(
                "APPWRITE_COLLECTION_ID",
                DEFAULT_COLLECTION_ID,
            )),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
pub fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
pub fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
pub fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
pub fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
