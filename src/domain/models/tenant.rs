use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Postgres truncates identifiers beyond this many bytes.
pub const MAX_SCHEMA_NAME_LEN: usize = 63;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaNameError {
    #[error("schema name must not be empty")]
    Empty,
    #[error("schema name must be at most {MAX_SCHEMA_NAME_LEN} bytes")]
    TooLong,
    #[error("schema name may only contain letters, digits and underscores")]
    InvalidCharacters,
    #[error("schema name is reserved")]
    Reserved,
}

/// A tenant namespace identifier that passed the `^[a-zA-Z0-9_]+$` allow-list.
///
/// This is the only type the data access layer accepts in structural SQL
/// positions. It can't be built from a raw string without going through
/// [`SchemaName::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchemaName(String);

impl SchemaName {
    pub fn parse(raw: &str) -> Result<Self, SchemaNameError> {
        if raw.is_empty() {
            return Err(SchemaNameError::Empty);
        }
        if raw.len() > MAX_SCHEMA_NAME_LEN {
            return Err(SchemaNameError::TooLong);
        }
        if !raw.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
            return Err(SchemaNameError::InvalidCharacters);
        }

        let lower = raw.to_ascii_lowercase();
        if lower == "public" || lower == "information_schema" || lower.starts_with("pg_") {
            return Err(SchemaNameError::Reserved);
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SchemaName {
    type Err = SchemaNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SchemaName {
    type Error = SchemaNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SchemaName> for String {
    fn from(value: SchemaName) -> Self {
        value.0
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub schema_name: SchemaName,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Tenant {
    pub fn new(name: String, schema_name: SchemaName) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            schema_name,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
