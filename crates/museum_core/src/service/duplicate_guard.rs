//! In-memory duplicate-id pre-check.
//!
//! # Invariants
//! - Contents live only for the current process and are never read from
//!   or written back to the store.
//! - The service only reads from the guard; seeding is left to callers.

use crate::model::artifact::{Artifact, ArtifactId};
use std::collections::HashMap;

/// Transient id → artifact map consulted before inserting a new record.
#[derive(Debug, Default)]
pub struct DuplicateIdGuard {
    known: HashMap<ArtifactId, Artifact>,
}

impl DuplicateIdGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `id` is already tracked by this guard.
    pub fn contains(&self, id: &str) -> bool {
        self.known.contains_key(id)
    }

    /// Tracks `artifact` under its id, returning any record it replaced.
    pub fn remember(&mut self, artifact: Artifact) -> Option<Artifact> {
        self.known.insert(artifact.id().to_string(), artifact)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}
