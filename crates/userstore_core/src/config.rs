//! Repository options and default limits.
//!
//! # Responsibility
//! - Hold the per-call time budgets applied to every driver round-trip.
//! - Keep tunables injectable so tests can shrink them.
//!
//! # Invariants
//! - Every budget is scoped to a single call; budgets are never summed
//!   across multi-step operations.

use std::time::Duration;

/// Budget for opening a connection and completing the liveness ping.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
/// Budget for one list/insert/find/update/delete/drop call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(3);
/// Budget for releasing the connection.
pub const DEFAULT_DISCONNECT_TIMEOUT: Duration = Duration::from_secs(3);
/// Application name reported to the server in the connection handshake.
pub const DEFAULT_APP_NAME: &str = "userstore";
/// `name` value of the placeholder document that materializes a collection.
pub const DEFAULT_SEED_NAME: &str = "initial";

/// Tunables for a [`crate::Repository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOptions {
    pub connect_timeout: Duration,
    pub call_timeout: Duration,
    pub disconnect_timeout: Duration,
    pub app_name: String,
    pub seed_name: String,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            disconnect_timeout: DEFAULT_DISCONNECT_TIMEOUT,
            app_name: DEFAULT_APP_NAME.to_string(),
            seed_name: DEFAULT_SEED_NAME.to_string(),
        }
    }
}

impl RepositoryOptions {
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_disconnect_timeout(mut self, timeout: Duration) -> Self {
        self.disconnect_timeout = timeout;
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// Overrides the placeholder name written by `ensure_collections`.
    pub fn with_seed_name(mut self, seed_name: impl Into<String>) -> Self {
        self.seed_name = seed_name.into();
        self
    }
}
