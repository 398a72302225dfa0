//! Location access service.
//!
//! All reads and writes of the shared location collection go through here.
//! Reads run as guest (the collection grants `read("any")`); writes carry
//! the acting user's platform session. The service stamps ownership and
//! timestamps on create, and enforces the creator-only rule on update and
//! delete before any destructive call goes out.

pub mod error;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;
use wherebuy_core::{
    CollectionId, DatabaseId, Location, LocationDraft, LocationId, LocationPatch, UserId,
};

use crate::appwrite::{DatabasesClient, DocumentList, Query, UNIQUE_ID};
use crate::models::CurrentUser;

pub use error::LocationError;

use error::classify;

/// Default page size for listings when the caller does not ask for one.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Page size used by the browse view, which filters client-side over the
/// most recent entries.
pub const BROWSE_LIST_LIMIT: u32 = 100;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewLocationDocument<'a> {
    #[serde(flatten)]
    draft: &'a LocationDraft,
    user_id: &'a UserId,
    user_name: &'a str,
    created_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateLocationDocument<'a> {
    #[serde(flatten)]
    patch: &'a LocationPatch,
    updated_at: DateTime<Utc>,
}

/// Service for the shared location collection.
#[derive(Debug, Clone)]
pub struct LocationService {
    databases: DatabasesClient,
    database_id: DatabaseId,
    collection_id: CollectionId,
}

impl LocationService {
    #[must_use]
    pub const fn new(
        databases: DatabasesClient,
        database_id: DatabaseId,
        collection_id: CollectionId,
    ) -> Self {
        Self {
            databases,
            database_id,
            collection_id,
        }
    }

    /// Creates a location from a validated draft, stamping the acting user
    /// as creator and the current time as `createdAt`.
    #[instrument(skip(self, draft, user, session_secret), fields(user_id = %user.id))]
    pub async fn create(
        &self,
        draft: &LocationDraft,
        user: &CurrentUser,
        session_secret: &str,
    ) -> Result<Location, LocationError> {
        let document = NewLocationDocument {
            draft,
            user_id: &user.id,
            user_name: &user.name,
            created_at: Utc::now(),
        };
        let location: Location = self
            .databases
            .create_document(
                &self.database_id,
                &self.collection_id,
                UNIQUE_ID,
                &document,
                Some(session_secret),
            )
            .await
            .map_err(classify)?;
        tracing::info!(location_id = %location.id, "Location created");
        Ok(location)
    }

    /// Lists locations newest-first. `limit` defaults to
    /// [`DEFAULT_LIST_LIMIT`].
    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<u32>) -> Result<Vec<Location>, LocationError> {
        let queries = [
            Query::order_desc("createdAt"),
            Query::limit(limit.unwrap_or(DEFAULT_LIST_LIMIT)),
        ];
        self.list_with(&queries).await
    }

    /// Server-side full-text search over product names, newest-first.
    /// The browse view does its own in-memory filtering; this is the
    /// indexed path for larger result sets, so no limit is applied.
    #[instrument(skip(self))]
    pub async fn search_by_product(&self, term: &str) -> Result<Vec<Location>, LocationError> {
        let queries = [
            Query::search("productName", term),
            Query::order_desc("createdAt"),
        ];
        self.list_with(&queries).await
    }

    /// Lists the locations a user created, newest-first.
    #[instrument(skip(self))]
    pub async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: Option<u32>,
    ) -> Result<Vec<Location>, LocationError> {
        let queries = [
            Query::equal("userId", user_id.as_str()),
            Query::order_desc("createdAt"),
            Query::limit(limit.unwrap_or(DEFAULT_LIST_LIMIT)),
        ];
        self.list_with(&queries).await
    }

    async fn list_with(&self, queries: &[String]) -> Result<Vec<Location>, LocationError> {
        let page: DocumentList<Location> = self
            .databases
            .list_documents(&self.database_id, &self.collection_id, queries)
            .await
            .map_err(classify)?;
        Ok(page.documents)
    }

    /// Fetches a single location.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &LocationId) -> Result<Location, LocationError> {
        self.databases
            .get_document(&self.database_id, &self.collection_id, id.as_str())
            .await
            .map_err(classify)
    }

    /// Applies a partial update. Only the creator may update; an empty
    /// patch short-circuits without a write.
    #[instrument(skip(self, patch, session_secret))]
    pub async fn update(
        &self,
        id: &LocationId,
        patch: &LocationPatch,
        acting_user: &UserId,
        session_secret: &str,
    ) -> Result<Location, LocationError> {
        let existing = self.get(id).await?;
        if !existing.is_created_by(acting_user) {
            return Err(LocationError::NotCreator);
        }
        if patch.is_empty() {
            return Ok(existing);
        }

        let document = UpdateLocationDocument {
            patch,
            updated_at: Utc::now(),
        };
        self.databases
            .update_document(
                &self.database_id,
                &self.collection_id,
                id.as_str(),
                &document,
                Some(session_secret),
            )
            .await
            .map_err(classify)
    }

    /// Deletes a location. Only the creator may delete.
    #[instrument(skip(self, session_secret))]
    pub async fn delete(
        &self,
        id: &LocationId,
        acting_user: &UserId,
        session_secret: &str,
    ) -> Result<(), LocationError> {
        let existing = self.get(id).await?;
        if !existing.is_created_by(acting_user) {
            return Err(LocationError::NotCreator);
        }

        self.databases
            .delete_document(
                &self.database_id,
                &self.collection_id,
                id.as_str(),
                Some(session_secret),
            )
            .await
            .map_err(classify)?;
        tracing::info!(location_id = %id, "Location deleted");
        Ok(())
    }
}
