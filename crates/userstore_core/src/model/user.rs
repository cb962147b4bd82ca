//! User document value object.
//!
//! # Responsibility
//! - Define the `{name, age, email}` record shape shared by every CRUD path.
//! - Provide write validation used before any network call.
//!
//! # Invariants
//! - A document is empty only when all three fields hold default values.
//! - Create/update payloads must be non-empty and carry `age > 0`.
//! - Missing wire fields decode to defaults so placeholder records stay readable.
//! - `age` decodes from any whole number that fits in `i32`, including doubles
//!   written by JavaScript clients.

use mongodb::bson::Bson;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifier assigned by the store on insert (`_id`).
pub type DocumentId = mongodb::bson::Bson;

/// Flat user record persisted in a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDocument {
    /// Lookup key for read/update/delete/move.
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_age")]
    pub age: i32,
    #[serde(default)]
    pub email: String,
}

/// Write-time validation failures for [`UserDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyDocument,
    InvalidAge(i32),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDocument => write!(f, "user document is empty"),
            Self::InvalidAge(age) => write!(f, "age must be greater than 0, got {age}"),
        }
    }
}

impl Error for UserValidationError {}

impl UserDocument {
    pub fn new(name: impl Into<String>, age: i32, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            email: email.into(),
        }
    }

    /// Returns `true` when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.age == 0 && self.email.is_empty()
    }

    /// Validates a payload destined for create or update.
    ///
    /// Emptiness is checked before age, so a default document reports
    /// `EmptyDocument` rather than `InvalidAge(0)`.
    pub fn validate_for_write(&self) -> Result<(), UserValidationError> {
        if self.is_empty() {
            return Err(UserValidationError::EmptyDocument);
        }
        if self.age <= 0 {
            return Err(UserValidationError::InvalidAge(self.age));
        }
        Ok(())
    }
}

fn deserialize_age<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Bson::deserialize(deserializer)?;
    age_from_bson(&raw).map_err(D::Error::custom)
}

fn age_from_bson(raw: &Bson) -> Result<i32, String> {
    match raw {
        Bson::Int32(value) => Ok(*value),
        Bson::Int64(value) => i32::try_from(*value).map_err(|err| err.to_string()),
        Bson::Double(value)
            if value.fract() == 0.0
                && *value >= f64::from(i32::MIN)
                && *value <= f64::from(i32::MAX) =>
        {
            Ok(*value as i32)
        }
        Bson::Double(value) => Err(format!("age {value} is not a whole number in range")),
        other => Err(format!("age must be a number, got {:?}", other.element_type())),
    }
}
