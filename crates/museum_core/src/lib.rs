//! Core inventory logic for museum artifacts.
//! The menu binary delegates every store interaction to this crate.

pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use error::ErrorKind;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::artifact::{
    parse_found_date, parse_quantity, parse_unit_weight, Artifact, ArtifactFields, ArtifactId,
    ArtifactParseError,
};
pub use repo::artifact_repo::{
    ArtifactRepository, RepoError, RepoResult, SqliteArtifactRepository,
};
pub use service::artifact_service::{ArtifactService, ServiceError, ServiceResult};
pub use service::duplicate_guard::DuplicateIdGuard;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
