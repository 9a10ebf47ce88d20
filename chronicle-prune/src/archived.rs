//! Archived retention pass: the same boundary logic, driven from the
//! distinct set of record identifiers present in the history table
//! itself. This is what prunes history belonging to records whose live
//! row has since been deleted; re-pruning a still-live record here is a
//! no-op because the boundary recomputes against already-reduced
//! history.
//!
//! Deliberate policy: deleted records keep `keep_count` versions rather
//! than losing their whole history. The full-wipe alternative lives in
//! [`crate::wipe`], unwired.

use tracing::info;

use chronicle_core::config::RetentionPolicy;
use chronicle_core::errors::ChronicleResult;
use chronicle_core::record::RecordId;
use chronicle_core::report::PassTotals;
use chronicle_core::sql::Ident;
use chronicle_core::traits::IVersionStore;

use crate::{boundary, statements};

/// Run the archived retention pass for one record type.
pub fn run(
    store: &dyn IVersionStore,
    record_type: &str,
    policy: &RetentionPolicy,
) -> ChronicleResult<PassTotals> {
    let base = Ident::new(&store.base_table(record_type)?)?;
    let versions = base.versions_table();

    let ids = store.query_column(&statements::distinct_record_ids(&versions), &[])?;

    let mut deleted = 0usize;
    for id in ids {
        let record_id = RecordId(id);
        if let Some(cutoff) = boundary::resolve(store, &versions, record_id, policy.keep_count)? {
            deleted += boundary::prune_upto(store, &versions, record_id, cutoff, policy.dry_run)?;
        }
    }

    if deleted > 0 {
        if policy.dry_run {
            info!(table = %versions, would_delete = deleted, "dry run: archived retention");
        } else {
            info!(table = %versions, deleted, "archived retention cleared rows");
        }
    }

    Ok(PassTotals {
        table: versions.as_str().to_string(),
        deleted,
    })
}
