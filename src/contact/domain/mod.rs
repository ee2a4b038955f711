//! Domain model for the contacts directory as seen by the board.

mod contact;
mod error;

pub use contact::{Contact, ContactId, ContactSnapshot};
pub use error::ContactDomainError;
