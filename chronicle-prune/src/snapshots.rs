//! Snapshot-ledger pass: prune the content-hash-addressed change
//! ledger, which is not 1:1 with version rows.
//!
//! Counting rule: walking a live object's entries newest-first, only
//! full versions (origin hash equals the object's current content hash,
//! activity not DELETED) increment the running counter. Once the
//! counter exceeds the keep-count, every subsequent entry is deleted,
//! partial and related-object changes included — the boundary is set by
//! full-version density but enforced over the whole interleaved
//! sequence.
//!
//! A failure on one object is logged with its identifier and recorded;
//! the pass continues with the next object.

use tracing::{debug, info, warn};

use chronicle_core::config::defaults::LIVE_PAGE_SIZE;
use chronicle_core::config::RetentionPolicy;
use chronicle_core::errors::ChronicleResult;
use chronicle_core::record::RecordId;
use chronicle_core::report::{SnapshotFailure, SnapshotTotals};
use chronicle_core::traits::{ISnapshotLedger, IVersionStore};

/// Run the snapshot-ledger pass for one record type.
pub fn run(
    store: &dyn IVersionStore,
    ledger: &dyn ISnapshotLedger,
    record_type: &str,
    policy: &RetentionPolicy,
) -> ChronicleResult<SnapshotTotals> {
    let mut totals = SnapshotTotals::default();

    let mut offset = 0usize;
    loop {
        let page = store.live_record_page(record_type, offset, LIVE_PAGE_SIZE)?;
        let page_len = page.len();
        for object_id in page {
            match prune_object(ledger, record_type, object_id, policy) {
                Ok((cleared, kept)) => {
                    totals.cleared += cleared;
                    totals.kept += kept;
                    debug!(%object_id, cleared, kept, "snapshot ledger pruned for object");
                }
                Err(err) => {
                    warn!(%object_id, error = %err, "snapshot ledger pass failed for object");
                    totals.failures.push(SnapshotFailure {
                        object_id,
                        reason: err.to_string(),
                    });
                }
            }
        }
        if page_len < LIVE_PAGE_SIZE {
            break;
        }
        offset += LIVE_PAGE_SIZE;
    }

    if totals.cleared > 0 {
        if policy.dry_run {
            info!(
                record_type,
                would_delete = totals.cleared,
                kept = totals.kept,
                "dry run: snapshot ledger"
            );
        } else {
            info!(
                record_type,
                cleared = totals.cleared,
                kept = totals.kept,
                "snapshot ledger cleared entries"
            );
        }
    }

    Ok(totals)
}

/// Prune one object's ledger. Returns `(cleared, kept)`.
fn prune_object(
    ledger: &dyn ISnapshotLedger,
    record_type: &str,
    object_id: RecordId,
    policy: &RetentionPolicy,
) -> ChronicleResult<(usize, usize)> {
    let current_hash = ledger.content_hash(record_type, object_id)?;
    let entries = ledger.related_entries(record_type, object_id)?;

    let mut full_versions = 0i64;
    let mut cleared = 0usize;
    let mut kept = 0usize;
    for entry in entries {
        if entry.is_full_version(&current_hash) {
            full_versions += 1;
        }
        if full_versions > policy.keep_count {
            if !policy.dry_run {
                ledger.delete_entry(entry.id)?;
            }
            cleared += 1;
        } else {
            kept += 1;
        }
    }
    Ok((cleared, kept))
}
