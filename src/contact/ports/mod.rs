//! Port contracts for the contacts directory.

pub mod directory;

pub use directory::ContactDirectory;
