//! Repository layer contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the artifact data access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every statement binds values through parameters.
//! - Repository APIs return semantic errors (`NotFound`) distinct from
//!   store transport errors.

pub mod artifact_repo;
