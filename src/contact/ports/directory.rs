//! Read-only directory port used to resolve weak contact references.

use crate::contact::domain::ContactSnapshot;

/// Read access to the external contacts directory.
///
/// The board never writes contacts; it only asks for the current list.
pub trait ContactDirectory: Send + Sync {
    /// Returns the directory's current contact list.
    fn snapshot(&self) -> ContactSnapshot;
}
