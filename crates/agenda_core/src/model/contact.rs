//! Contact domain model.
//!
//! # Responsibility
//! - Define the single record type stored by the contact book.
//! - Name every validated attribute through [`ContactField`].
//!
//! # Invariants
//! - `id` is assigned by the repository and never reused after deletion.
//! - `secret` is never rendered: `Debug` masks it and serialization skips it.

use crate::validation::{validate_fields, FieldErrors};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// Repository-assigned contact identifier.
///
/// `0` is never assigned and marks an unsaved candidate.
pub type ContactId = u64;

/// Placeholder rendered wherever the secret would otherwise appear.
pub const MASKED_SECRET: &str = "********";

/// Contact record.
///
/// Candidates handed to repository writes use the same shape; their `id` is
/// ignored and replaced by the repository.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    /// Capitalized words, letters only.
    pub name: String,
    /// `(DD)DDDDD-DDDD`, `DDDDDDD-DDDD` or `DDDDD-DDDD`.
    pub phone: String,
    pub email: String,
    /// `DD/MM/YYYY`.
    pub birth_date: String,
    /// Personal (11 digits) or entity (14 digits) registry number.
    pub national_id: String,
    /// 8 digits, optional hyphen after the fifth.
    pub postal_code: String,
    pub vehicle_plate: String,
    /// Password-like value. Write-only from the caller's point of view.
    #[serde(skip_serializing, default)]
    pub secret: String,
}

impl Contact {
    /// Checks every field and collects all failures.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        validate_fields(self)
    }

    /// Returns the raw value stored for `field`.
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Phone => &self.phone,
            ContactField::Email => &self.email,
            ContactField::BirthDate => &self.birth_date,
            ContactField::NationalId => &self.national_id,
            ContactField::PostalCode => &self.postal_code,
            ContactField::VehiclePlate => &self.vehicle_plate,
            ContactField::Secret => &self.secret,
        }
    }

    /// Mutable access used by patch/overlay flows.
    pub fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Phone => &mut self.phone,
            ContactField::Email => &mut self.email,
            ContactField::BirthDate => &mut self.birth_date,
            ContactField::NationalId => &mut self.national_id,
            ContactField::PostalCode => &mut self.postal_code,
            ContactField::VehiclePlate => &mut self.vehicle_plate,
            ContactField::Secret => &mut self.secret,
        }
    }

    /// Value safe to show for `field`; the secret is always masked.
    pub fn display_value(&self, field: ContactField) -> &str {
        if field.is_sensitive() {
            MASKED_SECRET
        } else {
            self.field(field)
        }
    }

    pub fn masked_secret(&self) -> &'static str {
        MASKED_SECRET
    }

    /// One-line listing form: `ID: 1 | Name: Maria Silva | Phone: ...`.
    pub fn summary_line(&self) -> String {
        format!(
            "ID: {} | Name: {} | Phone: {}",
            self.id, self.name, self.phone
        )
    }
}

impl Debug for Contact {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Contact")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("birth_date", &self.birth_date)
            .field("national_id", &self.national_id)
            .field("postal_code", &self.postal_code)
            .field("vehicle_plate", &self.vehicle_plate)
            .field("secret", &MASKED_SECRET)
            .finish()
    }
}

/// Validated contact attribute.
///
/// Declaration order is the canonical reporting order for field errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Phone,
    Email,
    BirthDate,
    NationalId,
    PostalCode,
    VehiclePlate,
    Secret,
}

impl ContactField {
    /// Every field in canonical order.
    pub const ALL: [ContactField; 8] = [
        Self::Name,
        Self::Phone,
        Self::Email,
        Self::BirthDate,
        Self::NationalId,
        Self::PostalCode,
        Self::VehiclePlate,
        Self::Secret,
    ];

    /// Stable snake_case key, matching the serialized field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::BirthDate => "birth_date",
            Self::NationalId => "national_id",
            Self::PostalCode => "postal_code",
            Self::VehiclePlate => "vehicle_plate",
            Self::Secret => "secret",
        }
    }

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::BirthDate => "Birth date (DD/MM/YYYY)",
            Self::NationalId => "National ID",
            Self::PostalCode => "Postal code",
            Self::VehiclePlate => "Vehicle plate",
            Self::Secret => "Secret",
        }
    }

    pub fn is_sensitive(self) -> bool {
        matches!(self, Self::Secret)
    }
}

impl Display for ContactField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
