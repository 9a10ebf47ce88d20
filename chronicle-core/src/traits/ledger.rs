use crate::errors::ChronicleResult;
use crate::record::{RecordId, SnapshotEntry};

/// Optional content-snapshot ledger collaborator. Injected into the job
/// when the ledger subsystem is configured; absent otherwise. The job
/// branches on presence of this reference, never on package metadata.
pub trait ISnapshotLedger: Send + Sync {
    /// Ledger entries related to a live object, ordered by edit time
    /// descending.
    fn related_entries(
        &self,
        record_type: &str,
        object_id: RecordId,
    ) -> ChronicleResult<Vec<SnapshotEntry>>;

    /// The object's current content hash. Entries carrying this hash
    /// (and not marked deleted) are full versions.
    fn content_hash(&self, record_type: &str, object_id: RecordId) -> ChronicleResult<String>;

    /// Delete a single ledger entry.
    fn delete_entry(&self, entry_id: i64) -> ChronicleResult<()>;
}
