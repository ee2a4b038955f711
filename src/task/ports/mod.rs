//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod store;

pub use store::{
    CollectionQuery, Document, DocumentFields, DocumentId, DocumentStore, DocumentStoreError,
    DocumentStoreResult, SnapshotEvent, SnapshotStream,
};

#[cfg(test)]
pub use store::MockDocumentStore;
