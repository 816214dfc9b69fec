//! Artifact use-case service.
//!
//! # Responsibility
//! - Provide add/list/edit/remove entry points for the menu layer.
//! - Reject ids already tracked by the duplicate-id guard before inserting.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - The guard is consulted but never populated here; a successful add
//!   leaves it unchanged.

use crate::error::ErrorKind;
use crate::model::artifact::{Artifact, ArtifactId};
use crate::repo::artifact_repo::{ArtifactRepository, RepoError};
use crate::service::duplicate_guard::DuplicateIdGuard;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for artifact use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// The id is already tracked by the duplicate-id guard.
    DuplicateId(ArtifactId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Classifies this error as a store or domain failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateId(_) => ErrorKind::Domain,
            Self::Repo(err) => err.kind(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(
                f,
                "an artifact with id `{id}` already exists; use a different id"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DuplicateId(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper for artifact CRUD operations.
pub struct ArtifactService<R: ArtifactRepository> {
    repo: R,
    guard: DuplicateIdGuard,
}

impl<R: ArtifactRepository> ArtifactService<R> {
    /// Creates a service with an empty duplicate-id guard.
    pub fn new(repo: R) -> Self {
        Self::with_guard(repo, DuplicateIdGuard::new())
    }

    /// Creates a service with a caller-prepared duplicate-id guard.
    pub fn with_guard(repo: R, guard: DuplicateIdGuard) -> Self {
        Self { repo, guard }
    }

    /// Returns whether `id` would be rejected by the duplicate-id guard.
    ///
    /// Lets prompt flows stop before collecting the remaining fields.
    pub fn is_known_id(&self, id: &str) -> bool {
        self.guard.contains(id)
    }

    /// Adds a new artifact unless its id is tracked by the guard.
    ///
    /// The store's primary-key constraint is the only other duplicate check;
    /// a violation there surfaces as a store-kind `ServiceError::Repo`.
    pub fn add_artifact(&self, artifact: &Artifact) -> ServiceResult<()> {
        if self.guard.contains(artifact.id()) {
            warn!(
                "event=artifact_duplicate_rejected module=service status=error id={}",
                artifact.id()
            );
            return Err(ServiceError::DuplicateId(artifact.id().to_string()));
        }

        let result = self.repo.create_artifact(artifact);
        log_outcome("artifact_create", artifact.id(), &result);
        result.map_err(ServiceError::from)
    }

    /// Lists every stored artifact in store-defined order.
    pub fn list_artifacts(&self) -> ServiceResult<Vec<Artifact>> {
        match self.repo.list_artifacts() {
            Ok(artifacts) => {
                info!(
                    "event=artifact_list module=service status=ok count={}",
                    artifacts.len()
                );
                Ok(artifacts)
            }
            Err(err) => {
                error!(
                    "event=artifact_list module=service status=error error={}",
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Replaces all mutable attributes of the artifact stored under `id`.
    pub fn edit_artifact(&self, id: &str, artifact: &Artifact) -> ServiceResult<()> {
        let result = self.repo.update_artifact(id, artifact);
        log_outcome("artifact_update", id, &result);
        result.map_err(ServiceError::from)
    }

    /// Removes the artifact stored under `id`.
    pub fn remove_artifact(&self, id: &str) -> ServiceResult<()> {
        let result = self.repo.delete_artifact(id);
        log_outcome("artifact_delete", id, &result);
        result.map_err(ServiceError::from)
    }
}

fn log_outcome(event: &str, id: &str, result: &Result<(), RepoError>) {
    match result {
        Ok(()) => info!("event={event} module=service status=ok id={id}"),
        Err(err) if err.kind() == ErrorKind::Domain => {
            warn!("event={event} module=service status=error error_code=not_found id={id}")
        }
        Err(err) => error!("event={event} module=service status=error id={id} error={err}"),
    }
}
