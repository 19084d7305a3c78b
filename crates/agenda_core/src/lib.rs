//! Core domain logic for the Agenda contact book.
//! This crate is the single source of truth for contact validation and storage.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use logging::{
    default_log_dir, default_log_level, init_logging, LogConfig, LogSettings, LoggingError,
};
pub use model::contact::{Contact, ContactField, ContactId, MASKED_SECRET};
pub use repo::contact_repo::{
    ContactRepository, InMemoryContactRepository, Lookup, RepoError, RepoResult,
};
pub use service::contact_service::{ContactPatch, ContactService};
pub use validation::{
    check_field, validate_contact, FieldError, FieldErrors, ValidationError, Violation,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
