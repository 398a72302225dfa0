//! Appwrite schema provisioning.
//!
//! Creates the database, the locations collection, its attributes, and the
//! indexes the web app queries against. Attribute creation is asynchronous
//! on the Appwrite side, so schema calls are paced and the command waits for
//! attributes to settle before creating indexes over them.
//!
//! Safe to re-run: resources that already exist are reported and skipped.
//!
//! # Usage
//!
//! ```bash
//! wb-cli provision
//! ```
//!
//! # Environment Variables
//!
//! - `APPWRITE_ENDPOINT` - Appwrite REST endpoint (defaults to Appwrite Cloud)
//! - `APPWRITE_PROJECT_ID` - Project to provision
//! - `APPWRITE_DATABASE_ID` - Database id (default `wherebuy`)
//! - `APPWRITE_COLLECTION_ID` - Collection id (default `locations`)
//! - `APPWRITE_API_KEY` - Server API key with database scopes

use std::time::Duration;

use tracing::{error, info};

use wherebuy_web::appwrite::permission::{Permission, Role};
use wherebuy_web::appwrite::{AppwriteClient, AppwriteError, DatabasesClient, IndexType, SortOrder};
use wherebuy_web::config::{AppwriteConfig, ConfigError, get_validated_secret};

/// Display name for the database in the Appwrite console.
const DATABASE_NAME: &str = "Wherebuy";

/// Display name for the collection in the Appwrite console.
const COLLECTION_NAME: &str = "Locations";

/// Delay between schema calls. Appwrite queues attribute creation and
/// rejects rapid bursts against the same collection.
const CREATE_PACING: Duration = Duration::from_millis(500);

/// Wait for queued attributes to become `available`; indexes over
/// attributes that are still `processing` are rejected.
const ATTRIBUTE_SETTLE: Duration = Duration::from_secs(5);

/// Errors from the provision command.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{step} failed: {source}")]
    Step {
        step: &'static str,
        source: AppwriteError,
    },

    #[error("{failed} schema step(s) failed; see log output above")]
    Incomplete { failed: usize },
}

#[derive(Debug, Clone, Copy)]
enum AttributeKind {
    String { size: u32 },
    Float,
}

#[derive(Debug, Clone, Copy)]
struct AttributeSpec {
    key: &'static str,
    kind: AttributeKind,
    required: bool,
}

/// Collection attributes, in creation order. Keys match the serialized
/// field names of the location document types in the web crate.
const ATTRIBUTES: [AttributeSpec; 13] = [
    AttributeSpec {
        key: "productName",
        kind: AttributeKind::String { size: 255 },
        required: true,
    },
    AttributeSpec {
        key: "description",
        kind: AttributeKind::String { size: 1000 },
        required: true,
    },
    AttributeSpec {
        key: "price",
        kind: AttributeKind::Float,
        required: true,
    },
    AttributeSpec {
        key: "currency",
        kind: AttributeKind::String { size: 10 },
        required: true,
    },
    AttributeSpec {
        key: "latitude",
        kind: AttributeKind::Float,
        required: true,
    },
    AttributeSpec {
        key: "longitude",
        kind: AttributeKind::Float,
        required: true,
    },
    AttributeSpec {
        key: "address",
        kind: AttributeKind::String { size: 500 },
        required: true,
    },
    AttributeSpec {
        key: "contactInfo",
        kind: AttributeKind::String { size: 255 },
        required: true,
    },
    AttributeSpec {
        key: "contactType",
        kind: AttributeKind::String { size: 20 },
        required: true,
    },
    AttributeSpec {
        key: "userId",
        kind: AttributeKind::String { size: 50 },
        required: true,
    },
    AttributeSpec {
        key: "userName",
        kind: AttributeKind::String { size: 255 },
        required: true,
    },
    AttributeSpec {
        key: "createdAt",
        kind: AttributeKind::String { size: 50 },
        required: true,
    },
    AttributeSpec {
        key: "updatedAt",
        kind: AttributeKind::String { size: 50 },
        required: false,
    },
];

#[derive(Debug, Clone, Copy)]
struct IndexSpec {
    key: &'static str,
    index_type: IndexType,
    attributes: &'static [&'static str],
    orders: &'static [SortOrder],
}

/// Indexes backing the browse, search, and per-user queries.
const INDEXES: [IndexSpec; 3] = [
    IndexSpec {
        key: "productName_search",
        index_type: IndexType::Fulltext,
        attributes: &["productName"],
        orders: &[],
    },
    IndexSpec {
        key: "createdAt_desc",
        index_type: IndexType::Key,
        attributes: &["createdAt"],
        orders: &[SortOrder::Desc],
    },
    IndexSpec {
        key: "userId_index",
        index_type: IndexType::Key,
        attributes: &["userId"],
        orders: &[],
    },
];

/// Running tally for the non-fatal schema steps.
#[derive(Default)]
struct Progress {
    created: usize,
    skipped: usize,
    failures: Vec<(String, String)>,
}

impl Progress {
    fn record(&mut self, label: &str, result: Result<(), AppwriteError>) {
        match result {
            Ok(()) => {
                self.created += 1;
                info!("  created {label}");
            }
            Err(e) if e.is_conflict() => {
                self.skipped += 1;
                info!("  {label} already exists, skipping");
            }
            Err(e) => {
                error!("  {label} failed: {e}");
                self.failures.push((label.to_string(), e.to_string()));
            }
        }
    }
}

/// Provision the Wherebuy schema on the configured Appwrite project.
///
/// # Errors
///
/// Returns an error if configuration is missing, if database or collection
/// creation fails outright, or if any attribute or index could not be
/// created.
pub async fn provision() -> Result<(), ProvisionError> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppwriteConfig::from_env()?;
    let api_key = get_validated_secret("APPWRITE_API_KEY")?;

    let client = AppwriteClient::with_api_key(&config, &api_key);
    let databases = DatabasesClient::new(client);

    info!(
        endpoint = %config.endpoint,
        project = %config.project_id,
        "Provisioning Appwrite project"
    );

    // Database and collection are hard prerequisites; anything other than
    // "already exists" aborts the run.
    info!(database = %config.database_id, "Creating database");
    match databases
        .create_database(&config.database_id, DATABASE_NAME)
        .await
    {
        Ok(_) => info!("  database created"),
        Err(e) if e.is_conflict() => info!("  database already exists, skipping"),
        Err(source) => {
            return Err(ProvisionError::Step {
                step: "Database creation",
                source,
            });
        }
    }

    tokio::time::sleep(CREATE_PACING).await;

    // Documents are readable by anyone; creation needs a logged-in user.
    // The creator-only rule is enforced by the web app's access layer, so
    // record-level security stays off.
    let permissions = [
        Permission::read(&Role::any()),
        Permission::create(&Role::users()),
    ];

    info!(collection = %config.collection_id, "Creating collection");
    match databases
        .create_collection(
            &config.database_id,
            &config.collection_id,
            COLLECTION_NAME,
            &permissions,
            false,
        )
        .await
    {
        Ok(_) => info!("  collection created"),
        Err(e) if e.is_conflict() => info!("  collection already exists, skipping"),
        Err(source) => {
            return Err(ProvisionError::Step {
                step: "Collection creation",
                source,
            });
        }
    }

    let mut progress = Progress::default();

    info!(count = ATTRIBUTES.len(), "Creating attributes");
    for spec in &ATTRIBUTES {
        tokio::time::sleep(CREATE_PACING).await;
        let result = match spec.kind {
            AttributeKind::String { size } => {
                databases
                    .create_string_attribute(
                        &config.database_id,
                        &config.collection_id,
                        spec.key,
                        size,
                        spec.required,
                    )
                    .await
            }
            AttributeKind::Float => {
                databases
                    .create_float_attribute(
                        &config.database_id,
                        &config.collection_id,
                        spec.key,
                        spec.required,
                    )
                    .await
            }
        };
        progress.record(spec.key, result);
    }

    info!("Waiting for attributes to become available");
    tokio::time::sleep(ATTRIBUTE_SETTLE).await;

    info!(count = INDEXES.len(), "Creating indexes");
    for spec in &INDEXES {
        tokio::time::sleep(CREATE_PACING).await;
        let result = databases
            .create_index(
                &config.database_id,
                &config.collection_id,
                spec.key,
                spec.index_type,
                spec.attributes,
                spec.orders,
            )
            .await;
        progress.record(spec.key, result);
    }

    if progress.failures.is_empty() {
        info!("Provisioning complete!");
        info!("  Created: {}", progress.created);
        info!("  Already existed: {}", progress.skipped);
        info!("The locations collection is ready; start the web server to use it");
        Ok(())
    } else {
        error!("Provisioning incomplete");
        error!("  Created: {}", progress.created);
        error!("  Already existed: {}", progress.skipped);
        error!("  Failed: {}", progress.failures.len());
        for (step, err) in &progress.failures {
            error!("    - {step}: {err}");
        }
        Err(ProvisionError::Incomplete {
            failed: progress.failures.len(),
        })
    }
}
