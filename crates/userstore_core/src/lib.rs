//! Validated data-access layer for user documents stored in MongoDB.
//! Every operation checks its inputs, makes bounded driver calls and maps
//! outcomes onto a closed error set.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::RepositoryOptions;
pub use db::{ConnectionString, DbError, DsnError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::user::{DocumentId, UserDocument, UserValidationError};
pub use repo::{ErrorKind, RepoError, RepoResult, Repository};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
