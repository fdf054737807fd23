//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`BusTrackError`] via `From`.

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum BusTrackError {
    /// Input rejected before or by the storage layer.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A read-side lookup found nothing.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The backing store failed.
    #[error("storage failure: {0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Input that violates a domain or referential invariant.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An identifier was empty.
    #[error("{field} must not be empty")]
    EmptyIdentifier { field: &'static str },

    /// The referenced bus or stop does not exist.
    ///
    /// Deliberately does not say which one.
    #[error("Invalid bus_id or stop_id")]
    UnknownReference,
}

/// A lookup by identifier found no record.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
