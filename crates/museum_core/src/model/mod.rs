//! Domain model for the museum inventory.
//!
//! # Responsibility
//! - Define the flat artifact record persisted by the repository layer.
//! - Keep presentation formatting next to the data it formats.
//!
//! # Invariants
//! - Every artifact is identified by its caller-supplied `id`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod artifact;
