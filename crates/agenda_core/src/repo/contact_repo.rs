//! Contact repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide CRUD and name lookup over the process-lifetime contact list.
//! - Assign identifiers and keep them unique per repository instance.
//!
//! # Invariants
//! - Write paths validate the candidate before taking the write lock.
//! - Id assignment and insertion happen under one exclusive lock hold.
//! - Every read returns owned copies; callers never alias stored records.

use crate::model::contact::{Contact, ContactId};
use crate::validation::{validate_fields, FieldErrors, ValidationError};
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Key of a failed lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Id(ContactId),
    Name(String),
}

impl Display for Lookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Name(name) => write!(f, "name=`{name}`"),
        }
    }
}

/// Repository error for contact operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// A write received no candidate.
    NilInput,
    Validation(FieldErrors),
    NotFound(Lookup),
}

impl RepoError {
    /// Field errors when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilInput => write!(f, "contact must not be absent"),
            Self::Validation(errors) => write!(f, "{errors}"),
            Self::NotFound(lookup) => write!(f, "contact not found: {lookup}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NilInput => None,
            Self::Validation(errors) => Some(errors),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        match value {
            ValidationError::NilInput => Self::NilInput,
            ValidationError::InvalidFields(errors) => Self::Validation(errors),
        }
    }
}

impl From<FieldErrors> for RepoError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for contact operations.
///
/// Write candidates are optional so drivers that fail to assemble a record
/// get a typed `NilInput` instead of a panic.
pub trait ContactRepository {
    fn create_contact(&self, candidate: Option<&Contact>) -> RepoResult<Contact>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Contact>;
    /// Insertion order; empty (not an error) when nothing is stored.
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    fn update_contact(&self, id: ContactId, candidate: Option<&Contact>) -> RepoResult<Contact>;
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
    /// Case-insensitive exact name match; `NotFound` when nothing matches.
    fn search_by_name(&self, name: &str) -> RepoResult<Vec<Contact>>;
}

#[derive(Debug)]
struct ContactTable {
    contacts: Vec<Contact>,
    last_id: ContactId,
}

impl ContactTable {
    fn position(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().position(|contact| contact.id == id)
    }
}

/// Lock-guarded in-memory contact repository.
///
/// Safe to share across threads (`Arc<InMemoryContactRepository>`).
#[derive(Debug)]
pub struct InMemoryContactRepository {
    table: RwLock<ContactTable>,
}

impl Default for InMemoryContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(ContactTable {
                contacts: Vec::new(),
                last_id: 0,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.table.read().contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().contacts.is_empty()
    }
}

impl ContactRepository for InMemoryContactRepository {
    fn create_contact(&self, candidate: Option<&Contact>) -> RepoResult<Contact> {
        let candidate = checked_candidate("contact_create", candidate)?;

        let mut table = self.table.write();
        table.last_id += 1;
        let mut stored = candidate.clone();
        stored.id = table.last_id;
        table.contacts.push(stored.clone());
        drop(table);

        info!(
            "event=contact_create module=repo status=ok id={}",
            stored.id
        );
        Ok(stored)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Contact> {
        self.table
            .read()
            .contacts
            .iter()
            .find(|contact| contact.id == id)
            .cloned()
            .ok_or(RepoError::NotFound(Lookup::Id(id)))
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        Ok(self.table.read().contacts.clone())
    }

    fn update_contact(&self, id: ContactId, candidate: Option<&Contact>) -> RepoResult<Contact> {
        let candidate = checked_candidate("contact_update", candidate)?;
        let mut replacement = candidate.clone();
        replacement.id = id;

        let mut table = self.table.write();
        let Some(index) = table.position(id) else {
            drop(table);
            warn!(
                "event=contact_update module=repo status=error error_code=not_found id={}",
                id
            );
            return Err(RepoError::NotFound(Lookup::Id(id)));
        };
        table.contacts[index] = replacement.clone();
        drop(table);

        info!("event=contact_update module=repo status=ok id={}", id);
        Ok(replacement)
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let mut table = self.table.write();
        let Some(index) = table.position(id) else {
            drop(table);
            warn!(
                "event=contact_delete module=repo status=error error_code=not_found id={}",
                id
            );
            return Err(RepoError::NotFound(Lookup::Id(id)));
        };
        // `remove` keeps the relative order of the remaining records.
        table.contacts.remove(index);
        drop(table);

        info!("event=contact_delete module=repo status=ok id={}", id);
        Ok(())
    }

    fn search_by_name(&self, name: &str) -> RepoResult<Vec<Contact>> {
        let needle = name.to_lowercase();
        let matches: Vec<Contact> = self
            .table
            .read()
            .contacts
            .iter()
            .filter(|contact| contact.name.to_lowercase() == needle)
            .cloned()
            .collect();

        debug!(
            "event=contact_search module=repo status=ok matches={}",
            matches.len()
        );
        if matches.is_empty() {
            return Err(RepoError::NotFound(Lookup::Name(name.to_string())));
        }
        Ok(matches)
    }
}

/// Validates a write candidate outside the lock and logs failures by field
/// name only.
fn checked_candidate<'a>(event: &str, candidate: Option<&'a Contact>) -> RepoResult<&'a Contact> {
    let Some(candidate) = candidate else {
        warn!(
            "event={} module=repo status=error error_code=nil_input",
            event
        );
        return Err(RepoError::NilInput);
    };
    if let Err(errors) = validate_fields(candidate) {
        warn!(
            "event={} module=repo status=error error_code=validation_failed fields={}",
            event,
            errors.field_list()
        );
        return Err(RepoError::Validation(errors));
    }
    Ok(candidate)
}
