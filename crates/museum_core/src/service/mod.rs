//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into operator-level actions.
//! - Own the transient duplicate-id guard consulted before inserts.

pub mod artifact_service;
pub mod duplicate_guard;
