//! Remote document store port with live snapshot subscriptions.

use crate::task::domain::TaskId;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Untyped top-level fields of a stored document.
pub type DocumentFields = Map<String, Value>;

/// Result type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

/// One delivery on a live query: the complete result set, or a stream error.
pub type SnapshotEvent = Result<Vec<Document>, DocumentStoreError>;

/// Opaque store-assigned document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a document identifier, returning `None` for a blank value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return None;
        }
        Some(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DocumentId> for TaskId {
    fn from(value: DocumentId) -> Self {
        Self::from_validated(value.0)
    }
}

impl From<&TaskId> for DocumentId {
    fn from(value: &TaskId) -> Self {
        Self(value.as_str().to_owned())
    }
}

/// Stored document: identifier plus untyped body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: DocumentId,
    fields: DocumentFields,
}

impl Document {
    /// Creates a document.
    #[must_use]
    pub const fn new(id: DocumentId, fields: DocumentFields) -> Self {
        Self { id, fields }
    }

    /// Returns the document identifier.
    #[must_use]
    pub const fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Returns the document body.
    #[must_use]
    pub const fn fields(&self) -> &DocumentFields {
        &self.fields
    }

    /// Splits the document into identifier and body.
    #[must_use]
    pub fn into_parts(self) -> (DocumentId, DocumentFields) {
        (self.id, self.fields)
    }
}

/// Query over one collection, optionally ordered by a top-level field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
    collection: String,
    order_by: Option<String>,
}

impl CollectionQuery {
    /// Creates an unordered query over `collection`.
    #[must_use]
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            order_by: None,
        }
    }

    /// Orders results ascending by the given field.
    #[must_use]
    pub fn ordered_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    /// Returns the collection name.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the ordering field, if any.
    #[must_use]
    pub fn order_by(&self) -> Option<&str> {
        self.order_by.as_deref()
    }
}

/// Receiving half of a live query.
///
/// Dropping the stream cancels the subscription on the store side.
#[derive(Debug)]
pub struct SnapshotStream {
    receiver: mpsc::UnboundedReceiver<SnapshotEvent>,
}

impl SnapshotStream {
    /// Wraps the receiving end of a snapshot channel.
    #[must_use]
    pub const fn new(receiver: mpsc::UnboundedReceiver<SnapshotEvent>) -> Self {
        Self { receiver }
    }

    /// Waits for the next delivery; `None` once the store closed the query.
    pub async fn next(&mut self) -> Option<SnapshotEvent> {
        self.receiver.recv().await
    }
}

/// Remote document store contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a document and returns its store-assigned identifier.
    async fn create(
        &self,
        collection: &str,
        fields: DocumentFields,
    ) -> DocumentStoreResult<DocumentId>;

    /// Reads every document matching the query.
    async fn get_all(&self, query: &CollectionQuery) -> DocumentStoreResult<Vec<Document>>;

    /// Reads a single document; `None` when it does not exist.
    async fn get_one(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> DocumentStoreResult<Option<Document>>;

    /// Merges the given top-level fields into an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::NotFound`] when the document is missing.
    async fn update(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: DocumentFields,
    ) -> DocumentStoreResult<()>;

    /// Deletes a document. Deleting a missing document succeeds.
    async fn delete(&self, collection: &str, id: &DocumentId) -> DocumentStoreResult<()>;

    /// Opens a live query.
    ///
    /// The first event carries the current result set; every committed write
    /// to the collection produces another complete result set.
    async fn subscribe(&self, query: &CollectionQuery) -> DocumentStoreResult<SnapshotStream>;
}

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error)]
pub enum DocumentStoreError {
    /// The document does not exist.
    #[error("document not found: {0}")]
    NotFound(DocumentId),

    /// The store could not be reached.
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    /// The caller may not perform the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Backend-specific failure.
    #[error("document store error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl DocumentStoreError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
