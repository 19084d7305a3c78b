//! Contact use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD/search entry points for drivers.
//! - Apply partial edits as full validated replacements.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - The service layer stays storage-agnostic.

use crate::model::contact::{Contact, ContactField, ContactId};
use crate::repo::contact_repo::{ContactRepository, RepoResult};
use std::collections::BTreeMap;

/// Partial edit of a stored contact.
///
/// Fields left unset, or set to a blank string, keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    values: BTreeMap<ContactField, String>,
}

impl ContactPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, field: ContactField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// True when applying the patch would change nothing.
    pub fn is_noop(&self) -> bool {
        self.values.values().all(|value| value.trim().is_empty())
    }

    /// Overlays non-blank values onto `base`. Values are stored as given.
    pub fn apply_to(&self, base: &Contact) -> Contact {
        let mut merged = base.clone();
        for (field, value) in &self.values {
            if !value.trim().is_empty() {
                *merged.field_mut(*field) = value.clone();
            }
        }
        merged
    }
}

/// Use-case service wrapper for contact operations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Validates and stores a new contact; returns it with its assigned id.
    pub fn create_contact(&self, candidate: Option<&Contact>) -> RepoResult<Contact> {
        self.repo.create_contact(candidate)
    }

    pub fn get_contact(&self, id: ContactId) -> RepoResult<Contact> {
        self.repo.get_contact(id)
    }

    pub fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        self.repo.list_contacts()
    }

    /// Replaces every field of contact `id`.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_contact(&self, id: ContactId, candidate: Option<&Contact>) -> RepoResult<Contact> {
        self.repo.update_contact(id, candidate)
    }

    /// Applies `patch` on top of the stored record and saves the result.
    ///
    /// # Contract
    /// - Blank patch values keep the stored field.
    /// - The merged record goes through full validation.
    /// - Read and write are separate lock holds; a concurrent update between
    ///   them is overwritten (last writer wins).
    pub fn patch_contact(&self, id: ContactId, patch: &ContactPatch) -> RepoResult<Contact> {
        let current = self.repo.get_contact(id)?;
        let merged = patch.apply_to(&current);
        self.repo.update_contact(id, Some(&merged))
    }

    pub fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        self.repo.delete_contact(id)
    }

    pub fn search_by_name(&self, name: &str) -> RepoResult<Vec<Contact>> {
        self.repo.search_by_name(name)
    }

    /// Number of stored contacts.
    pub fn count(&self) -> RepoResult<usize> {
        Ok(self.repo.list_contacts()?.len())
    }
}
