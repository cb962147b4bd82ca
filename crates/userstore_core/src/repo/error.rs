//! Domain error taxonomy for repository operations.
//!
//! # Responsibility
//! - Give callers one closed error type for every repository call.
//! - Expose a flat `ErrorKind` tag so callers can branch on error identity.
//!
//! # Invariants
//! - Validation and precondition errors are produced before any network call.
//! - Transport failures keep their driver source and the failing operation.

use crate::db::{CallFailure, DbError, DsnError};
use crate::model::user::UserValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by every [`crate::Repository`] operation.
#[derive(Debug)]
pub enum RepoError {
    Validation(UserValidationError),
    Db(DbError),
    /// The repository was closed.
    NotConnected,
    MissingDatabaseName,
    NilCollectionList,
    EmptyCollectionList,
    EmptyCollectionName,
    EmptyName,
    DocumentExists {
        collection: String,
        name: String,
    },
    NoMatch {
        collection: String,
        name: String,
    },
    NotFound {
        collection: String,
        name: String,
    },
}

/// Flat identity of a [`RepoError`], independent of carried context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyDsn,
    MalformedDsn,
    ConnectionFailed,
    DisconnectFailed,
    Runtime,
    Driver,
    Timeout,
    NotConnected,
    MissingDatabaseName,
    NilCollectionList,
    EmptyCollectionList,
    EmptyCollectionName,
    EmptyName,
    EmptyDocument,
    InvalidAge,
    DocumentExists,
    NoMatch,
    NotFound,
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(UserValidationError::EmptyDocument) => ErrorKind::EmptyDocument,
            Self::Validation(UserValidationError::InvalidAge(_)) => ErrorKind::InvalidAge,
            Self::Db(DbError::Dsn(DsnError::Empty)) => ErrorKind::EmptyDsn,
            Self::Db(DbError::Dsn(DsnError::Malformed(_))) => ErrorKind::MalformedDsn,
            Self::Db(DbError::Runtime(_)) => ErrorKind::Runtime,
            Self::Db(DbError::ConnectionFailed(_)) => ErrorKind::ConnectionFailed,
            Self::Db(DbError::DisconnectFailed(_)) => ErrorKind::DisconnectFailed,
            Self::Db(DbError::Operation {
                failure: CallFailure::Driver(_),
                ..
            }) => ErrorKind::Driver,
            Self::Db(DbError::Operation {
                failure: CallFailure::TimedOut(_),
                ..
            }) => ErrorKind::Timeout,
            Self::NotConnected => ErrorKind::NotConnected,
            Self::MissingDatabaseName => ErrorKind::MissingDatabaseName,
            Self::NilCollectionList => ErrorKind::NilCollectionList,
            Self::EmptyCollectionList => ErrorKind::EmptyCollectionList,
            Self::EmptyCollectionName => ErrorKind::EmptyCollectionName,
            Self::EmptyName => ErrorKind::EmptyName,
            Self::DocumentExists { .. } => ErrorKind::DocumentExists,
            Self::NoMatch { .. } => ErrorKind::NoMatch,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotConnected => write!(f, "repository is not connected"),
            Self::MissingDatabaseName => write!(f, "database name is empty"),
            Self::NilCollectionList => write!(f, "collection list is missing"),
            Self::EmptyCollectionList => write!(f, "collection list is empty"),
            Self::EmptyCollectionName => write!(f, "collection name is empty"),
            Self::EmptyName => write!(f, "name is empty"),
            Self::DocumentExists { collection, name } => {
                write!(f, "document `{name}` already exists in `{collection}`")
            }
            Self::NoMatch { collection, name } => {
                write!(f, "no document named `{name}` matched in `{collection}`")
            }
            Self::NotFound { collection, name } => {
                write!(f, "document `{name}` not found in `{collection}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<UserValidationError> for RepoError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<DsnError> for RepoError {
    fn from(value: DsnError) -> Self {
        Self::Db(DbError::Dsn(value))
    }
}
