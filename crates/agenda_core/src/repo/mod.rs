//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Keep locking details out of service/driver orchestration.
//!
//! # Invariants
//! - Repository writes must validate the candidate before mutating storage.
//! - Repository APIs return semantic errors (`NotFound`, `Validation`) as
//!   values; nothing in this layer panics on bad input.

pub mod contact_repo;
