//! Shared Diesel error mapping for the registry adapters.

use tracing::debug;

use crate::domain::ports::{IdentifierRepositoryError, RegistrantRepositoryError};

use super::pool::PoolError;

/// Failure classes the registry ports distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    Connection(String),
    Query(String),
    ForeignKey(String),
    Duplicate(String),
}

impl From<PoolError> for StoreFailure {
    fn from(error: PoolError) -> Self {
        match error {
            PoolError::Checkout { message } | PoolError::Build { message } => {
                Self::Connection(message)
            }
        }
    }
}

impl From<diesel::result::Error> for StoreFailure {
    fn from(error: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            _ => debug!(
                error_type = %std::any::type_name_of_val(&error),
                "diesel operation failed"
            ),
        }

        match error {
            DieselError::NotFound => Self::Query("record not found".to_owned()),
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
                Self::Connection(info.message().to_owned())
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKey(info.message().to_owned())
            }
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::Duplicate(info.message().to_owned())
            }
            DieselError::DatabaseError(_, info) => Self::Query(info.message().to_owned()),
            other => Self::Query(other.to_string()),
        }
    }
}

impl From<StoreFailure> for IdentifierRepositoryError {
    fn from(failure: StoreFailure) -> Self {
        match failure {
            StoreFailure::Connection(message) => Self::connection(message),
            StoreFailure::Query(message) => Self::query(message),
            StoreFailure::ForeignKey(message) => Self::foreign_key(message),
            StoreFailure::Duplicate(message) => Self::duplicate(message),
        }
    }
}

impl From<StoreFailure> for RegistrantRepositoryError {
    fn from(failure: StoreFailure) -> Self {
        match failure {
            StoreFailure::Connection(message) => Self::connection(message),
            StoreFailure::Query(message)
            | StoreFailure::ForeignKey(message)
            | StoreFailure::Duplicate(message) => Self::query(message),
        }
    }
}

/// Map a pool failure onto the identifier store port.
pub(crate) fn identifier_pool_error(error: PoolError) -> IdentifierRepositoryError {
    StoreFailure::from(error).into()
}

/// Map a Diesel failure onto the identifier store port.
pub(crate) fn identifier_diesel_error(error: diesel::result::Error) -> IdentifierRepositoryError {
    StoreFailure::from(error).into()
}

/// Map a pool failure onto the registrant directory port.
pub(crate) fn registrant_pool_error(error: PoolError) -> RegistrantRepositoryError {
    StoreFailure::from(error).into()
}

/// Map a Diesel failure onto the registrant directory port.
pub(crate) fn registrant_diesel_error(error: diesel::result::Error) -> RegistrantRepositoryError {
    StoreFailure::from(error).into()
}
