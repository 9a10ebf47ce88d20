//! Count aggregation reported by the prune job. The engine produces
//! counts and identifiers only; formatting is the caller's concern.

use serde::{Deserialize, Serialize};

use crate::record::RecordId;

/// Deleted-row total for one pass over one table. In dry-run mode
/// `deleted` is the count the identical predicate would have removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassTotals {
    pub table: String,
    pub deleted: usize,
}

/// A per-object failure isolated inside the snapshot pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotFailure {
    pub object_id: RecordId,
    pub reason: String,
}

/// Running totals for one record type's snapshot-ledger pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotTotals {
    pub cleared: usize,
    pub kept: usize,
    pub failures: Vec<SnapshotFailure>,
}

/// Everything the job did for one record type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeOutcome {
    pub record_type: String,
    /// Present when a ledger collaborator was injected and fast mode
    /// was not requested.
    pub snapshots: Option<SnapshotTotals>,
    /// Absent in fast mode.
    pub draft: Option<PassTotals>,
    pub archived: PassTotals,
    /// One entry per subclass history table, base excluded.
    pub orphaned: Vec<PassTotals>,
}

impl TypeOutcome {
    /// Total rows deleted (or counted, in dry-run) across all passes.
    pub fn total_deleted(&self) -> usize {
        self.snapshots.as_ref().map_or(0, |s| s.cleared)
            + self.draft.as_ref().map_or(0, |p| p.deleted)
            + self.archived.deleted
            + self.orphaned.iter().map(|p| p.deleted).sum::<usize>()
    }
}

/// Structured completion signal for a whole job run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobReport {
    pub dry_run: bool,
    pub outcomes: Vec<TypeOutcome>,
}

impl JobReport {
    /// Total rows deleted across every record type and pass.
    pub fn total_deleted(&self) -> usize {
        self.outcomes.iter().map(TypeOutcome::total_deleted).sum()
    }
}
