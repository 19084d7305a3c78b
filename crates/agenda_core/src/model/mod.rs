//! Contact book domain model.
//!
//! # Responsibility
//! - Define the record stored by the repository layer.
//!
//! # Invariants
//! - Every stored contact is identified by a repository-assigned `ContactId`.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod contact;
