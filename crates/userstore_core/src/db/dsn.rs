//! Connection string splitting.
//!
//! # Responsibility
//! - Reject empty or unsplittable connection strings before any I/O.
//! - Resolve the target database name from the final path segment.
//!
//! # Invariants
//! - A parsed string always has a non-empty host part and database name.
//! - Everything beyond this split (options, credentials, TLS) is left to the
//!   driver.

use super::DsnError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const SCHEME_SEPARATOR: &str = "://";

/// Validated `scheme://host[:port]/database[?options]` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    raw: String,
    database: String,
}

impl ConnectionString {
    /// Splits `raw` into host and database parts.
    ///
    /// # Errors
    /// - `DsnError::Empty` when `raw` is empty or whitespace.
    /// - `DsnError::Malformed` when there is no host part or no database name
    ///   after it.
    pub fn parse(raw: &str) -> Result<Self, DsnError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DsnError::Empty);
        }

        let after_scheme = match trimmed.split_once(SCHEME_SEPARATOR) {
            Some((scheme, rest)) if !scheme.is_empty() => rest,
            Some(_) => return Err(DsnError::Malformed(trimmed.to_string())),
            None => trimmed,
        };

        let without_options = after_scheme.split('?').next().unwrap_or_default();
        let Some((host, database)) = without_options.rsplit_once('/') else {
            return Err(DsnError::Malformed(trimmed.to_string()));
        };
        if host.is_empty() || database.is_empty() {
            return Err(DsnError::Malformed(trimmed.to_string()));
        }

        Ok(Self {
            raw: trimmed.to_string(),
            database: database.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Database name taken from the last `/`-delimited segment.
    pub fn database_name(&self) -> &str {
        &self.database
    }
}

impl FromStr for ConnectionString {
    type Err = DsnError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Display for ConnectionString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
