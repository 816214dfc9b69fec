//! Failure classification shared by repository and service errors.

/// Coarse class of a failed inventory operation.
///
/// Callers use this to choose how loudly to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Failure originating from the persistence backend.
    Store,
    /// Business-rule failure such as an unknown or reused id.
    Domain,
}
