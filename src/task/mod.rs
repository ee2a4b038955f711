//! Task synchronisation and board-state engine.
//!
//! Keeps an in-memory mirror of the remote task collection consistent with
//! the store's live snapshot stream, writes task changes back to the store
//! and enforces the board lifecycle. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - The untyped record boundary in [`codec`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod codec;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
