//! MongoDB connection bootstrap and bounded call execution.
//!
//! # Responsibility
//! - Validate connection strings and open a pinged client.
//! - Run every driver round-trip under its own time budget.
//! - Report transport failures with the operation that produced them.
//!
//! # Invariants
//! - No driver call runs without a timeout.
//! - Transport errors are wrapped, never retried.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub mod dsn;
mod open;

pub use dsn::ConnectionString;
pub use open::Connection;

pub type DbResult<T> = Result<T, DbError>;

/// Connection string rejected before any I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DsnError {
    Empty,
    Malformed(String),
}

impl Display for DsnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "connection string is empty"),
            Self::Malformed(raw) => write!(
                f,
                "connection string `{raw}` has no host and database name parts"
            ),
        }
    }
}

impl Error for DsnError {}

/// Why a single bounded driver call did not complete.
#[derive(Debug)]
pub enum CallFailure {
    Driver(mongodb::error::Error),
    TimedOut(Duration),
}

impl Display for CallFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Driver(err) => write!(f, "{err}"),
            Self::TimedOut(limit) => write!(f, "timed out after {}ms", limit.as_millis()),
        }
    }
}

impl Error for CallFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Driver(err) => Some(err),
            Self::TimedOut(_) => None,
        }
    }
}

/// Transport-level error for connection lifecycle and driver calls.
#[derive(Debug)]
pub enum DbError {
    Dsn(DsnError),
    /// The runtime driving the client could not be started.
    Runtime(std::io::Error),
    ConnectionFailed(CallFailure),
    DisconnectFailed(CallFailure),
    Operation {
        operation: &'static str,
        failure: CallFailure,
    },
}

impl DbError {
    /// Returns `true` when the failure was the call budget running out.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(CallFailure::TimedOut(_))
                | Self::DisconnectFailed(CallFailure::TimedOut(_))
                | Self::Operation {
                    failure: CallFailure::TimedOut(_),
                    ..
                }
        )
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dsn(err) => write!(f, "{err}"),
            Self::Runtime(err) => write!(f, "failed to start driver runtime: {err}"),
            Self::ConnectionFailed(failure) => write!(f, "failed to connect: {failure}"),
            Self::DisconnectFailed(failure) => write!(f, "failed to disconnect: {failure}"),
            Self::Operation { operation, failure } => write!(f, "{operation} failed: {failure}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dsn(err) => Some(err),
            Self::Runtime(err) => Some(err),
            Self::ConnectionFailed(failure) => Some(failure),
            Self::DisconnectFailed(failure) => Some(failure),
            Self::Operation { failure, .. } => Some(failure),
        }
    }
}

impl From<DsnError> for DbError {
    fn from(value: DsnError) -> Self {
        Self::Dsn(value)
    }
}
