//! Contacts directory boundary consumed by the task board.
//!
//! Contact CRUD lives outside this crate. The board only needs to know which
//! contacts currently exist so that weak assignee references can be filtered
//! at read time. The module follows the same hexagonal split as [`crate::task`]:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
