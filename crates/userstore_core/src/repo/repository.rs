//! Repository handle and connection lifecycle.
//!
//! # Responsibility
//! - Validate the connection string and open a pinged connection.
//! - Gate every operation on the connection still being open.
//!
//! # Invariants
//! - A constructed `Repository` has a non-empty database name.
//! - `close` is explicit; dropping a repository does not disconnect.
//! - After `close`, every operation returns `RepoError::NotConnected`.

use super::error::{RepoError, RepoResult};
use crate::config::RepositoryOptions;
use crate::db::{Connection, ConnectionString};
use crate::model::user::UserDocument;
use mongodb::bson::Document;
use mongodb::{Collection, Database};
#[cfg(test)]
use std::time::Duration;

/// Validated data-access handle over one MongoDB database.
///
/// Methods block the calling thread; do not call them from inside an async
/// runtime.
#[derive(Debug)]
pub struct Repository {
    conn: Connection,
}

impl Repository {
    /// Connects with default options (3 second budgets).
    pub fn connect(dsn: &str) -> RepoResult<Self> {
        Self::connect_with(dsn, RepositoryOptions::default())
    }

    /// Connects with caller-provided options.
    ///
    /// # Errors
    /// - `EmptyDsn` / `MalformedDsn` before any I/O.
    /// - `ConnectionFailed` when the client cannot be opened or pinged within
    ///   `options.connect_timeout`.
    pub fn connect_with(dsn: &str, options: RepositoryOptions) -> RepoResult<Self> {
        let dsn = ConnectionString::parse(dsn)?;
        let conn = Connection::open(&dsn, options)?;
        Ok(Self { conn })
    }

    /// Releases the connection.
    ///
    /// # Errors
    /// - `NotConnected` when already closed.
    /// - `DisconnectFailed` when shutdown exceeds `disconnect_timeout`.
    pub fn close(&mut self) -> RepoResult<()> {
        if !self.conn.is_open() {
            return Err(RepoError::NotConnected);
        }
        self.conn.close()?;
        Ok(())
    }

    pub fn database_name(&self) -> &str {
        self.conn.database_name()
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_open()
    }

    pub fn options(&self) -> &RepositoryOptions {
        self.conn.options()
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn database(&self) -> RepoResult<Database> {
        let database = self.conn.database().ok_or(RepoError::NotConnected)?;
        if self.conn.database_name().is_empty() {
            return Err(RepoError::MissingDatabaseName);
        }
        Ok(database)
    }

    pub(crate) fn users(&self, collection: &str) -> RepoResult<Collection<UserDocument>> {
        Ok(self.database()?.collection(collection))
    }

    pub(crate) fn raw_collection(&self, collection: &str) -> RepoResult<Collection<Document>> {
        Ok(self.database()?.collection(collection))
    }
}

#[cfg(test)]
impl Repository {
    /// Repository over an unreachable address that has not been pinged.
    pub(crate) fn offline() -> Self {
        let dsn = ConnectionString::parse("mongodb://127.0.0.1:9/userstore_offline")
            .expect("offline dsn should parse");
        let options = RepositoryOptions::default()
            .with_connect_timeout(Duration::from_millis(200))
            .with_call_timeout(Duration::from_millis(200));
        let conn = Connection::unverified(&dsn, options).expect("client should build");
        Self { conn }
    }
}

pub(crate) fn require_collection_name(collection: &str) -> RepoResult<()> {
    if collection.is_empty() {
        return Err(RepoError::EmptyCollectionName);
    }
    Ok(())
}

pub(crate) fn require_name(name: &str) -> RepoResult<()> {
    if name.is_empty() {
        return Err(RepoError::EmptyName);
    }
    Ok(())
}
