//! Error types for contact domain validation.

use thiserror::Error;

/// Errors returned while constructing contact domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactDomainError {
    /// The contact identifier is empty after trimming.
    #[error("contact identifier must not be empty")]
    EmptyContactId,
}
