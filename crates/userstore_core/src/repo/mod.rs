//! Validated repository over a MongoDB database.
//!
//! # Responsibility
//! - Own the connection lifecycle and the fixed operation set callers use.
//! - Keep driver details (filters, update documents, timeouts) inside core.
//!
//! # Invariants
//! - Input validation runs before any network call.
//! - Repository APIs return semantic errors (`NotFound`, `NoMatch`,
//!   `DocumentExists`) in addition to transport errors.

mod collections;
pub mod error;
mod repository;
mod user_repo;

pub use error::{ErrorKind, RepoError, RepoResult};
pub use repository::Repository;
