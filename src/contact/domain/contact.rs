//! Contact records and point-in-time directory snapshots.

use super::ContactDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque identifier of a contact in the external directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    /// Creates a validated contact identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ContactDomainError::EmptyContactId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, ContactDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ContactDomainError::EmptyContactId);
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ContactId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contact record owned by the external directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    id: ContactId,
    name: String,
    mail: String,
    phone: String,
}

impl Contact {
    /// Creates a contact with the given identifier and display name.
    #[must_use]
    pub fn new(id: ContactId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            mail: String::new(),
            phone: String::new(),
        }
    }

    /// Sets the e-mail address.
    #[must_use]
    pub fn with_mail(mut self, mail: impl Into<String>) -> Self {
        self.mail = mail.into();
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Returns the contact identifier.
    #[must_use]
    pub const fn id(&self) -> &ContactId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the e-mail address.
    #[must_use]
    pub fn mail(&self) -> &str {
        &self.mail
    }

    /// Returns the phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// Immutable view of the directory's contact list at one point in time.
///
/// Snapshots are cheap to clone and are never updated in place; a directory
/// change produces a new snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSnapshot {
    contacts: Arc<[Contact]>,
}

impl ContactSnapshot {
    /// Creates a snapshot from the given contacts.
    #[must_use]
    pub fn new(contacts: impl IntoIterator<Item = Contact>) -> Self {
        Self {
            contacts: contacts.into_iter().collect(),
        }
    }

    /// Returns `true` when a contact with the identifier exists.
    #[must_use]
    pub fn contains(&self, contact_id: &ContactId) -> bool {
        self.contacts.iter().any(|contact| contact.id() == contact_id)
    }

    /// Looks up a contact by identifier.
    #[must_use]
    pub fn get(&self, contact_id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id() == contact_id)
    }

    /// Returns the contacts in directory order.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Returns the number of contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Returns `true` when the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}
