//! SQL primitives: validated identifiers and statement parameters.
//!
//! Identifiers are a separate input class from values. Table names come
//! out of schema lookups and are interpolated into statement text, so
//! they pass through [`Ident`] validation first; values always travel
//! as [`SqlValue`] parameters.

use serde::{Deserialize, Serialize};

use crate::constants::VERSIONS_SUFFIX;
use crate::errors::StoreError;

/// A validated SQL identifier. Only ASCII alphanumerics and
/// underscores, not starting with a digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ident(String);

impl Ident {
    /// Validate a raw identifier from a schema lookup.
    pub fn new(raw: &str) -> Result<Self, StoreError> {
        let mut chars = raw.chars();
        let head_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
        let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if head_ok && tail_ok {
            Ok(Self(raw.to_string()))
        } else {
            Err(StoreError::InvalidIdentifier {
                identifier: raw.to_string(),
            })
        }
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted form for statement text.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }

    /// The version-history table paired with this physical table.
    pub fn versions_table(&self) -> Ident {
        Ident(format!("{}{VERSIONS_SUFFIX}", self.0))
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A positional statement parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Int(i64),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}
