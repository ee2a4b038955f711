//! In-memory adapters for tests and local demos.

mod store;

pub use store::InMemoryDocumentStore;
