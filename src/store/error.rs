use thiserror::Error;

use crate::domain::passenger::FieldViolation;

/// Error conditions the store can signal.
///
/// Every operation either fully succeeds or fails with one of these; there is
/// no partial-failure mode and nothing is retried or swallowed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Create targeted an id that is already live.
    #[error("passenger {0} already exists")]
    DuplicateKey(i64),

    /// The operation targeted an absent id.
    #[error("passenger {0} not found")]
    NotFound(i64),

    /// A field constraint was violated; the record was not stored or changed.
    #[error("record validation failed ({} violation(s))", .0.len())]
    Validation(Vec<FieldViolation>),

    /// An untyped payload was missing required fields or had values of the
    /// wrong semantic type.
    #[error("malformed passenger payload ({} violation(s))", .0.len())]
    MalformedInput(Vec<FieldViolation>),
}
