//! Record identity, version rows, and snapshot-ledger entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Identifier of a logical record within its type. Shared by the base
/// table, every subclass table, and every version-history row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One immutable historical snapshot of a record's state, keyed by
/// `(RecordID, Version)`. Created on every write by the store's own
/// versioning machinery, destroyed only by this engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionRow {
    pub record_id: RecordId,
    pub version: i64,
    pub last_edited: DateTime<Utc>,
}

/// Activity recorded on a snapshot-ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityType {
    Created,
    Updated,
    Deleted,
    /// Partial or related-object change; never counts as a full version.
    Related,
}

impl ActivityType {
    /// Parse the stored activity string. Unknown values are a per-entry
    /// error isolated by the snapshot pass.
    pub fn parse(entry_id: i64, raw: &str) -> Result<Self, LedgerError> {
        match raw {
            "CREATED" => Ok(Self::Created),
            "UPDATED" => Ok(Self::Updated),
            "DELETED" => Ok(Self::Deleted),
            "RELATED" => Ok(Self::Related),
            other => Err(LedgerError::MalformedActivity {
                entry_id,
                value: other.to_string(),
            }),
        }
    }

    /// Stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Updated => "UPDATED",
            Self::Deleted => "DELETED",
            Self::Related => "RELATED",
        }
    }
}

/// One entry of the optional content-hash-addressed change ledger.
/// Belongs to a live object via its origin hash, not a foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub id: i64,
    pub origin_hash: String,
    pub activity: ActivityType,
    pub last_edited: DateTime<Utc>,
}

impl SnapshotEntry {
    /// A full version carries the object's current content hash and is
    /// not a deletion marker.
    pub fn is_full_version(&self, current_hash: &str) -> bool {
        self.origin_hash == current_hash && self.activity != ActivityType::Deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_round_trips_known_values() {
        for raw in ["CREATED", "UPDATED", "DELETED", "RELATED"] {
            let activity = ActivityType::parse(1, raw).unwrap();
            assert_eq!(activity.as_str(), raw);
        }
    }

    #[test]
    fn activity_rejects_unknown_values() {
        let err = ActivityType::parse(7, "TRUNCATED").unwrap_err();
        assert!(err.to_string().contains("TRUNCATED"));
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn full_version_requires_matching_hash_and_non_delete() {
        let entry = SnapshotEntry {
            id: 1,
            origin_hash: "abc".to_string(),
            activity: ActivityType::Updated,
            last_edited: Utc::now(),
        };
        assert!(entry.is_full_version("abc"));
        assert!(!entry.is_full_version("def"));

        let deleted = SnapshotEntry {
            activity: ActivityType::Deleted,
            ..entry
        };
        assert!(!deleted.is_full_version("abc"));
    }
}
