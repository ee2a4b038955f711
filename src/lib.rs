//! Taskboard: kanban task synchronisation and board-state engine.
//!
//! This crate keeps a local, read-only mirror of a remote task collection in
//! step with the store's live snapshot stream, and exposes the task, subtask
//! and board-move operations that write back to the store.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory store, etc.)
//!
//! # Modules
//!
//! - [`task`]: Tasks, the live sync engine and board services
//! - [`contact`]: Read-only view of the contacts directory
//! - [`config`]: TOML-backed board configuration

pub mod config;
pub mod contact;
pub mod task;
