//! Engine-level error type.

use bookline_core::error::CoreError;

/// Errors surfaced by the engine's fallible operations.
///
/// Read paths propagate store failures rather than returning partial
/// results, so callers never see false availability. `lock_slot`
/// intentionally never returns this type: store failures on that path
/// degrade to "lock not acquired", which the caller must handle anyway.
#[derive(Debug, thiserror::Error)]
pub enum AvailabilityError {
    /// A domain-level error (validation, not-found).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience alias for engine return values.
pub type AvailabilityResult<T> = Result<T, AvailabilityError>;
