//! Shared Diesel error classification for the repositories.
//!
//! Each adapter maps a [`DieselFailure`] into its own port error. Constraint
//! names are preserved so adapters can tell a duplicate course code from a
//! primary key collision.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::models::CorruptRow;
use super::pool::PoolError;

/// Store-agnostic view of a failed Diesel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection was lost or never established.
    Connection(String),
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation { constraint: Option<String> },
    /// Any other query failure.
    Query(String),
}

/// Classify a Diesel error, logging the driver detail at debug level.
pub(crate) fn classify(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            DieselFailure::Connection(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DieselFailure::ForeignKeyViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(_, info) => DieselFailure::Query(info.message().to_owned()),
        DieselError::NotFound => DieselFailure::Query("record not found".to_owned()),
        DieselError::DeserializationError(err) => DieselFailure::Query(err.to_string()),
        other => DieselFailure::Query(other.to_string()),
    }
}

/// Message carried by a pool failure.
pub(crate) fn pool_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Wrap a corrupt row so it travels through a Diesel transaction.
pub(crate) fn corrupt(error: CorruptRow) -> DieselError {
    DieselError::DeserializationError(Box::new(error))
}
