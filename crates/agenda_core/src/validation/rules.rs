//! Per-field format rules.
//!
//! Every `check_*` function is pure and can be called on its own. Format
//! fields report a single [`Violation::Malformed`]; the secret reports every
//! composition rule it breaks.

use crate::model::contact::ContactField;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum secret length, in characters.
pub const SECRET_MIN_LEN: usize = 8;
/// Special characters accepted (and one of which is required) in a secret.
pub const SECRET_SPECIAL_CHARS: &str = "!$*&@#";

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-ZÀ-ÖØ-Þ][a-zß-öø-ÿ]+(?: [A-ZÀ-ÖØ-Þ][a-zß-öø-ÿ]+)*$")
        .expect("valid name regex")
});
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\([0-9]{2}\)|[0-9]{2})?[0-9]{5}-[0-9]{4}$").expect("valid phone regex")
});
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});
static BIRTH_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:0[1-9]|[12][0-9]|3[01])/(?:0[1-9]|1[0-2])/[0-9]{4}$")
        .expect("valid birth date regex")
});
static NATIONAL_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[0-9]{3}\.?[0-9]{3}\.?[0-9]{3}-?[0-9]{2}|[0-9]{2}\.?[0-9]{3}\.?[0-9]{3}/?[0-9]{4}-?[0-9]{2})$",
    )
    .expect("valid national id regex")
});
static POSTAL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}-?[0-9]{3}$").expect("valid postal code regex"));
static VEHICLE_PLATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Z]{3}-?[0-9]{4}|[A-Z]{3}[0-9][A-Z][0-9]{2})$")
        .expect("valid vehicle plate regex")
});

/// One broken rule for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Value does not match the field's format; `expected` describes it.
    Malformed { expected: &'static str },
    TooShort { min: usize, actual: usize },
    MissingDigit,
    MissingUppercase,
    MissingLowercase,
    MissingSpecial,
    /// First character outside digits, ASCII letters and the special set.
    DisallowedCharacter(char),
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed { expected } => write!(f, "invalid format, expected {expected}"),
            Self::TooShort { min, actual } => {
                write!(f, "too short: {actual} characters, minimum is {min}")
            }
            Self::MissingDigit => write!(f, "missing digit"),
            Self::MissingUppercase => write!(f, "missing uppercase letter"),
            Self::MissingLowercase => write!(f, "missing lowercase letter"),
            Self::MissingSpecial => {
                write!(f, "missing special character ({SECRET_SPECIAL_CHARS})")
            }
            // The offending character is part of the secret; never echo it.
            Self::DisallowedCharacter(_) => write!(f, "disallowed character"),
        }
    }
}

/// All violations found for one field. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: ContactField,
    violations: Vec<Violation>,
}

impl FieldError {
    fn new(field: ContactField, violations: Vec<Violation>) -> Self {
        debug_assert!(!violations.is_empty());
        Self { field, violations }
    }

    fn malformed(field: ContactField, expected: &'static str) -> Self {
        Self::new(field, vec![Violation::Malformed { expected }])
    }

    pub fn field(&self) -> ContactField {
        self.field
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn has(&self, violation: &Violation) -> bool {
        self.violations.contains(violation)
    }

    /// Human-readable reason strings, one per violation.
    pub fn reasons(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reasons().join("; "))
    }
}

impl Error for FieldError {}

/// Runs the rule for `field` against `value`.
pub fn check_field(field: ContactField, value: &str) -> Result<(), FieldError> {
    match field {
        ContactField::Name => check_name(value),
        ContactField::Phone => check_phone(value),
        ContactField::Email => check_email(value),
        ContactField::BirthDate => check_birth_date(value),
        ContactField::NationalId => check_national_id(value),
        ContactField::PostalCode => check_postal_code(value),
        ContactField::VehiclePlate => check_vehicle_plate(value),
        ContactField::Secret => check_secret(value),
    }
}

pub fn check_name(value: &str) -> Result<(), FieldError> {
    match_pattern(
        &NAME_RE,
        value,
        ContactField::Name,
        "capitalized words of letters only, e.g. `Maria Silva`",
    )
}

pub fn check_phone(value: &str) -> Result<(), FieldError> {
    match_pattern(
        &PHONE_RE,
        value,
        ContactField::Phone,
        "`(DD)DDDDD-DDDD`, `DDDDDDD-DDDD` or `DDDDD-DDDD`",
    )
}

pub fn check_email(value: &str) -> Result<(), FieldError> {
    match_pattern(&EMAIL_RE, value, ContactField::Email, "`user@domain.tld`")
}

/// Day and month ranges only; `31/02/2000` passes.
pub fn check_birth_date(value: &str) -> Result<(), FieldError> {
    match_pattern(&BIRTH_DATE_RE, value, ContactField::BirthDate, "`DD/MM/YYYY`")
}

pub fn check_national_id(value: &str) -> Result<(), FieldError> {
    match_pattern(
        &NATIONAL_ID_RE,
        value,
        ContactField::NationalId,
        "`DDD.DDD.DDD-DD` or `DD.DDD.DDD/DDDD-DD`, separators optional",
    )
}

pub fn check_postal_code(value: &str) -> Result<(), FieldError> {
    match_pattern(
        &POSTAL_CODE_RE,
        value,
        ContactField::PostalCode,
        "`DDDDD-DDD` or `DDDDDDDD`",
    )
}

pub fn check_vehicle_plate(value: &str) -> Result<(), FieldError> {
    match_pattern(
        &VEHICLE_PLATE_RE,
        value,
        ContactField::VehiclePlate,
        "`ABC1234`, `ABC-1234` or `ABC1D23`",
    )
}

/// Checks every secret composition rule and reports all that fail.
pub fn check_secret(value: &str) -> Result<(), FieldError> {
    let mut violations = Vec::new();

    let length = value.chars().count();
    if length < SECRET_MIN_LEN {
        violations.push(Violation::TooShort {
            min: SECRET_MIN_LEN,
            actual: length,
        });
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        violations.push(Violation::MissingDigit);
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(Violation::MissingUppercase);
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(Violation::MissingLowercase);
    }
    if !value.chars().any(is_secret_special) {
        violations.push(Violation::MissingSpecial);
    }
    if let Some(c) = value
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !is_secret_special(*c))
    {
        violations.push(Violation::DisallowedCharacter(c));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(FieldError::new(ContactField::Secret, violations))
    }
}

fn is_secret_special(c: char) -> bool {
    SECRET_SPECIAL_CHARS.contains(c)
}

fn match_pattern(
    pattern: &Regex,
    value: &str,
    field: ContactField,
    expected: &'static str,
) -> Result<(), FieldError> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::malformed(field, expected))
    }
}
