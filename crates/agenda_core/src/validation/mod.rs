//! Contact field validation.
//!
//! # Responsibility
//! - Check every contact attribute against its format rule.
//! - Collect all failing fields instead of stopping at the first one.
//!
//! # Invariants
//! - Checks are pure; compiled patterns are shared read-only statics.
//! - Absent input (`NilInput`) is a different error kind from field failures.
//! - [`FieldErrors`] iterates and renders in [`ContactField`] declaration order.

pub mod rules;

use crate::model::contact::{Contact, ContactField};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use rules::{
    check_birth_date, check_email, check_field, check_name, check_national_id, check_phone,
    check_postal_code, check_secret, check_vehicle_plate, FieldError, Violation, SECRET_MIN_LEN,
    SECRET_SPECIAL_CHARS,
};

/// Failing fields of one candidate, keyed and ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<ContactField, FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, error: FieldError) {
        self.errors.insert(error.field(), error);
    }

    pub fn get(&self, field: ContactField) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn contains(&self, field: ContactField) -> bool {
        self.errors.contains_key(&field)
    }

    /// Failing fields in canonical order.
    pub fn fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.values()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Comma-separated failing field keys, e.g. `name, secret`.
    pub fn field_list(&self) -> String {
        self.fields()
            .map(ContactField::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid fields: {}", self.field_list())
    }
}

impl Error for FieldErrors {}

/// Whole-candidate validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No candidate was supplied.
    NilInput,
    InvalidFields(FieldErrors),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilInput => write!(f, "contact must not be absent"),
            Self::InvalidFields(errors) => write!(f, "{errors}"),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NilInput => None,
            Self::InvalidFields(errors) => Some(errors),
        }
    }
}

impl From<FieldErrors> for ValidationError {
    fn from(value: FieldErrors) -> Self {
        Self::InvalidFields(value)
    }
}

/// Validates an optional candidate.
///
/// # Errors
/// - [`ValidationError::NilInput`] when `contact` is `None`.
/// - [`ValidationError::InvalidFields`] with every failing field otherwise.
pub fn validate_contact(contact: Option<&Contact>) -> Result<(), ValidationError> {
    let contact = contact.ok_or(ValidationError::NilInput)?;
    validate_fields(contact)?;
    Ok(())
}

/// Validates every field of `contact`. The `id` is not checked.
pub fn validate_fields(contact: &Contact) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for field in ContactField::ALL {
        if let Err(err) = check_field(field, contact.field(field)) {
            errors.insert(err);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
