//! Client bootstrap and bounded call execution.
//!
//! # Responsibility
//! - Open a MongoDB client and verify liveness with a ping.
//! - Drive async driver futures to completion under a per-call timeout.
//! - Release the client on explicit close.
//!
//! # Invariants
//! - A `Connection` returned by `open` has answered a ping.
//! - Each `call` gets a fresh budget; budgets are not shared between calls.
//! - Raw connection strings are never logged (they may carry credentials).

use super::{CallFailure, ConnectionString, DbError, DbResult};
use crate::config::RepositoryOptions;
use log::{debug, error, info};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::future::Future;
use std::time::Instant;
use tokio::runtime::Runtime;

const ADMIN_DATABASE: &str = "admin";
const DRIVER_THREAD_NAME: &str = "userstore-driver";

/// Live client plus the runtime that drives it.
#[derive(Debug)]
pub struct Connection {
    client: Option<Client>,
    database: String,
    options: RepositoryOptions,
    runtime: Runtime,
}

impl Connection {
    /// Opens a client for `dsn` and pings it within `connect_timeout`.
    ///
    /// # Side effects
    /// - Starts a single-worker runtime for driver background tasks.
    /// - Emits `db_open` logging events with duration and status.
    pub fn open(dsn: &ConnectionString, options: RepositoryOptions) -> DbResult<Self> {
        let started_at = Instant::now();
        let database = dsn.database_name().to_string();
        info!("event=db_open module=db status=start database={database}");

        let runtime = build_runtime().map_err(|err| {
            error!(
                "event=db_open module=db status=error database={database} duration_ms={} error_code=runtime_failed error={err}",
                started_at.elapsed().as_millis()
            );
            DbError::Runtime(err)
        })?;

        let limit = options.connect_timeout;
        let outcome = runtime.block_on(async {
            tokio::time::timeout(limit, connect_and_ping(dsn.as_str(), &options)).await
        });

        let client = match outcome {
            Ok(Ok(client)) => client,
            Ok(Err(err)) => {
                error!(
                    "event=db_open module=db status=error database={database} duration_ms={} error_code=connect_failed error={err}",
                    started_at.elapsed().as_millis()
                );
                return Err(DbError::ConnectionFailed(CallFailure::Driver(err)));
            }
            Err(_) => {
                error!(
                    "event=db_open module=db status=error database={database} duration_ms={} error_code=connect_timeout",
                    started_at.elapsed().as_millis()
                );
                return Err(DbError::ConnectionFailed(CallFailure::TimedOut(limit)));
            }
        };

        info!(
            "event=db_open module=db status=ok database={database} duration_ms={}",
            started_at.elapsed().as_millis()
        );

        Ok(Self {
            client: Some(client),
            database,
            options,
            runtime,
        })
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    pub fn options(&self) -> &RepositoryOptions {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }

    /// Handle to the target database, or `None` after `close`.
    pub(crate) fn database(&self) -> Option<Database> {
        self.client
            .as_ref()
            .map(|client| client.database(&self.database))
    }

    /// Blocks on one driver future bounded by `call_timeout`.
    pub(crate) fn call<T, F>(&self, operation: &'static str, future: F) -> DbResult<T>
    where
        F: Future<Output = mongodb::error::Result<T>>,
    {
        let started_at = Instant::now();
        let limit = self.options.call_timeout;
        let outcome = self
            .runtime
            .block_on(async { tokio::time::timeout(limit, future).await });

        let failure = match outcome {
            Ok(Ok(value)) => {
                debug!(
                    "event=db_call module=db status=ok operation={operation} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(value);
            }
            Ok(Err(err)) => CallFailure::Driver(err),
            Err(_) => CallFailure::TimedOut(limit),
        };

        error!(
            "event=db_call module=db status=error operation={operation} duration_ms={} error={failure}",
            started_at.elapsed().as_millis()
        );
        Err(DbError::Operation { operation, failure })
    }

    /// Shuts the client down within `disconnect_timeout`.
    ///
    /// Closing an already closed connection is a no-op here; callers decide
    /// whether that is an error.
    pub fn close(&mut self) -> DbResult<()> {
        let Some(client) = self.client.take() else {
            return Ok(());
        };

        let started_at = Instant::now();
        let limit = self.options.disconnect_timeout;
        info!(
            "event=db_close module=db status=start database={}",
            self.database
        );

        let outcome = self.runtime.block_on(async move {
            tokio::time::timeout(limit, async move { client.shutdown().await }).await
        });

        match outcome {
            Ok(()) => {
                info!(
                    "event=db_close module=db status=ok database={} duration_ms={}",
                    self.database,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(_) => {
                error!(
                    "event=db_close module=db status=error database={} duration_ms={} error_code=disconnect_timeout",
                    self.database,
                    started_at.elapsed().as_millis()
                );
                Err(DbError::DisconnectFailed(CallFailure::TimedOut(limit)))
            }
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // Driver handles may schedule cleanup on the runtime that owns them.
        if let Some(client) = self.client.take() {
            let _guard = self.runtime.enter();
            drop(client);
        }
    }
}

#[cfg(test)]
impl Connection {
    /// Builds a client without the liveness ping.
    ///
    /// The driver dials lazily, so operations that fail validation never
    /// reach the network.
    pub(crate) fn unverified(dsn: &ConnectionString, options: RepositoryOptions) -> DbResult<Self> {
        let runtime = build_runtime().map_err(DbError::Runtime)?;
        let client = runtime
            .block_on(build_client(dsn.as_str(), &options))
            .map_err(|err| DbError::ConnectionFailed(CallFailure::Driver(err)))?;

        Ok(Self {
            client: Some(client),
            database: dsn.database_name().to_string(),
            options,
            runtime,
        })
    }
}

async fn build_client(uri: &str, options: &RepositoryOptions) -> mongodb::error::Result<Client> {
    let mut client_options = ClientOptions::parse(uri).await?;
    client_options.app_name = Some(options.app_name.clone());
    client_options.connect_timeout = Some(options.connect_timeout);
    client_options.server_selection_timeout = Some(options.connect_timeout);
    Client::with_options(client_options)
}

async fn connect_and_ping(
    uri: &str,
    options: &RepositoryOptions,
) -> mongodb::error::Result<Client> {
    let client = build_client(uri, options).await?;
    client
        .database(ADMIN_DATABASE)
        .run_command(doc! { "ping": 1 })
        .await?;
    Ok(client)
}

fn build_runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name(DRIVER_THREAD_NAME)
        .enable_all()
        .build()
}
