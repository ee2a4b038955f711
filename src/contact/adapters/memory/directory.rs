//! Thread-safe in-memory contacts directory.

use std::sync::{Arc, PoisonError, RwLock};

use crate::contact::{
    domain::{Contact, ContactId, ContactSnapshot},
    ports::ContactDirectory,
};

/// In-memory contacts directory.
///
/// Each mutation publishes a fresh [`ContactSnapshot`]; snapshots handed out
/// earlier stay unchanged.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContactDirectory {
    state: Arc<RwLock<ContactSnapshot>>,
}

impl InMemoryContactDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding the given contacts.
    #[must_use]
    pub fn with_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ContactSnapshot::new(contacts))),
        }
    }

    /// Inserts a contact or replaces the one with the same identifier.
    pub fn upsert(&self, contact: Contact) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let mut contacts = state.contacts().to_vec();
        match contacts.iter_mut().find(|existing| existing.id() == contact.id()) {
            Some(existing) => *existing = contact,
            None => contacts.push(contact),
        }
        *state = ContactSnapshot::new(contacts);
    }

    /// Removes a contact, returning `true` when it existed.
    pub fn remove(&self, contact_id: &ContactId) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !state.contains(contact_id) {
            return false;
        }
        let remaining = state
            .contacts()
            .iter()
            .filter(|contact| contact.id() != contact_id)
            .cloned()
            .collect::<Vec<_>>();
        *state = ContactSnapshot::new(remaining);
        true
    }
}

impl ContactDirectory for InMemoryContactDirectory {
    fn snapshot(&self) -> ContactSnapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
