//! Adapter implementations for the contacts directory port.

pub mod memory;
