//! In-memory contacts directory for tests and local demos.

mod directory;

pub use directory::InMemoryContactDirectory;
