//! Database, collection, and document endpoints.
//!
//! Two callers share this surface with very different privileges: the web
//! app reads public documents as a guest and writes with a user session,
//! while the provisioning CLI drives the schema endpoints with a server API
//! key. The client itself is agnostic; privilege comes from how the
//! underlying [`AppwriteClient`] was built and whether a session secret is
//! passed per call.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use wherebuy_core::{CollectionId, DatabaseId};

use super::{AppwriteClient, AppwriteError};

/// A page of documents from a list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList<T> {
    /// Total matching documents, ignoring the limit.
    pub total: u64,
    /// The page itself.
    pub documents: Vec<T>,
}

/// A database as returned by the schema endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
}

/// A collection as returned by the schema endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
}

/// Index types supported by collection indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexType {
    Key,
    Fulltext,
    Unique,
}

/// Sort order for index attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Serialize)]
struct CreateDatabaseRequest<'a> {
    #[serde(rename = "databaseId")]
    database_id: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct CreateCollectionRequest<'a> {
    #[serde(rename = "collectionId")]
    collection_id: &'a str,
    name: &'a str,
    permissions: &'a [String],
    #[serde(rename = "documentSecurity")]
    document_security: bool,
}

#[derive(Serialize)]
struct CreateStringAttributeRequest<'a> {
    key: &'a str,
    size: u32,
    required: bool,
}

#[derive(Serialize)]
struct CreateFloatAttributeRequest<'a> {
    key: &'a str,
    required: bool,
}

#[derive(Serialize)]
struct CreateIndexRequest<'a> {
    key: &'a str,
    #[serde(rename = "type")]
    index_type: IndexType,
    attributes: &'a [&'a str],
    orders: &'a [SortOrder],
}

#[derive(Serialize)]
struct DocumentRequest<'a, T> {
    #[serde(rename = "documentId", skip_serializing_if = "Option::is_none")]
    document_id: Option<&'a str>,
    data: &'a T,
}

/// Client for the `/databases` API surface.
#[derive(Debug, Clone)]
pub struct DatabasesClient {
    client: AppwriteClient,
}

impl DatabasesClient {
    #[must_use]
    pub const fn new(client: AppwriteClient) -> Self {
        Self { client }
    }

    // ========================================================================
    // Schema management (requires an API-key client)
    // ========================================================================

    /// Creates a database. Conflicts (409) mean it already exists.
    #[instrument(skip(self))]
    pub async fn create_database(
        &self,
        database_id: &DatabaseId,
        name: &str,
    ) -> Result<Database, AppwriteError> {
        let request = self.client.request(Method::POST, "/databases", None).json(
            &CreateDatabaseRequest {
                database_id: database_id.as_str(),
                name,
            },
        );
        self.client.send(request).await
    }

    /// Creates a collection with the given permission list.
    #[instrument(skip(self, permissions))]
    pub async fn create_collection(
        &self,
        database_id: &DatabaseId,
        collection_id: &CollectionId,
        name: &str,
        permissions: &[String],
        document_security: bool,
    ) -> Result<Collection, AppwriteError> {
        let path = format!("/databases/{database_id}/collections");
        let request = self
            .client
            .request(Method::POST, &path, None)
            .json(&CreateCollectionRequest {
                collection_id: collection_id.as_str(),
                name,
                permissions,
                document_security,
            });
        self.client.send(request).await
    }

    /// Adds a string attribute to a collection. Creation is asynchronous
    /// server-side; callers that depend on the attribute must wait for it
    /// to become available.
    #[instrument(skip(self))]
    pub async fn create_string_attribute(
        &self,
        database_id: &DatabaseId,
        collection_id: &CollectionId,
        key: &str,
        size: u32,
        required: bool,
    ) -> Result<(), AppwriteError> {
        let path =
            format!("/databases/{database_id}/collections/{collection_id}/attributes/string");
        let request = self
            .client
            .request(Method::POST, &path, None)
            .json(&CreateStringAttributeRequest { key, size, required });
        self.client.send_unit(request).await
    }

    /// Adds a float attribute to a collection.
    #[instrument(skip(self))]
    pub async fn create_float_attribute(
        &self,
        database_id: &DatabaseId,
        collection_id: &CollectionId,
        key: &str,
        required: bool,
    ) -> Result<(), AppwriteError> {
        let path = format!("/databases/{database_id}/collections/{collection_id}/attributes/float");
        let request = self
            .client
            .request(Method::POST, &path, None)
            .json(&CreateFloatAttributeRequest { key, required });
        self.client.send_unit(request).await
    }

    /// Creates an index over previously created attributes.
    #[instrument(skip(self, attributes, orders))]
    pub async fn create_index(
        &self,
        database_id: &DatabaseId,
        collection_id: &CollectionId,
        key: &str,
        index_type: IndexType,
        attributes: &[&str],
        orders: &[SortOrder],
    ) -> Result<(), AppwriteError> {
        let path = format!("/databases/{database_id}/collections/{collection_id}/indexes");
        let request = self
            .client
            .request(Method::POST, &path, None)
            .json(&CreateIndexRequest {
                key,
                index_type,
                attributes,
                orders,
            });
        self.client.send_unit(request).await
    }

    // ========================================================================
    // Documents
    // ========================================================================

    /// Creates a document. Pass [`super::UNIQUE_ID`] as `document_id` to let
    /// the server assign one. A session secret makes the document owned by
    /// that user; without one the caller needs guest create permission.
    #[instrument(skip(self, data, session))]
    pub async fn create_document<T, R>(
        &self,
        database_id: &DatabaseId,
        collection_id: &CollectionId,
        document_id: &str,
        data: &T,
        session: Option<&str>,
    ) -> Result<R, AppwriteError>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let path = format!("/databases/{database_id}/collections/{collection_id}/documents");
        let request = self
            .client
            .request(Method::POST, &path, session)
            .json(&DocumentRequest {
                document_id: Some(document_id),
                data,
            });
        self.client.send(request).await
    }

    /// Lists documents, applying the given [`super::Query`] strings in order.
    #[instrument(skip(self, queries))]
    pub async fn list_documents<R>(
        &self,
        database_id: &DatabaseId,
        collection_id: &CollectionId,
        queries: &[String],
    ) -> Result<DocumentList<R>, AppwriteError>
    where
        R: DeserializeOwned,
    {
        let path = format!("/databases/{database_id}/collections/{collection_id}/documents");
        let mut request = self.client.request(Method::GET, &path, None);
        for query in queries {
            request = request.query(&[("queries[]", query)]);
        }
        self.client.send(request).await
    }

    /// Fetches a single document by ID.
    #[instrument(skip(self))]
    pub async fn get_document<R>(
        &self,
        database_id: &DatabaseId,
        collection_id: &CollectionId,
        document_id: &str,
    ) -> Result<R, AppwriteError>
    where
        R: DeserializeOwned,
    {
        let path =
            format!("/databases/{database_id}/collections/{collection_id}/documents/{document_id}");
        let request = self.client.request(Method::GET, &path, None);
        self.client.send(request).await
    }

    /// Applies a partial update to a document.
    #[instrument(skip(self, data, session))]
    pub async fn update_document<T, R>(
        &self,
        database_id: &DatabaseId,
        collection_id: &CollectionId,
        document_id: &str,
        data: &T,
        session: Option<&str>,
    ) -> Result<R, AppwriteError>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let path =
            format!("/databases/{database_id}/collections/{collection_id}/documents/{document_id}");
        let request = self
            .client
            .request(Method::PATCH, &path, session)
            .json(&DocumentRequest {
                document_id: None,
                data,
            });
        self.client.send(request).await
    }

    /// Deletes a document.
    #[instrument(skip(self, session))]
    pub async fn delete_document(
        &self,
        database_id: &DatabaseId,
        collection_id: &CollectionId,
        document_id: &str,
        session: Option<&str>,
    ) -> Result<(), AppwriteError> {
        let path =
            format!("/databases/{database_id}/collections/{collection_id}/documents/{document_id}");
        let request = self.client.request(Method::DELETE, &path, session);
        self.client.send_unit(request).await
    }
}
