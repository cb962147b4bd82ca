//! Document model stored by the repository.
//!
//! # Responsibility
//! - Define the value objects exchanged with callers and the store.
//! - Own write-time validation rules that the store itself does not enforce.
//!
//! # Invariants
//! - Wire field names are fixed: `name`, `age`, `email`.

pub mod user;
