//! Retention boundary: the version number at or below which a record's
//! history is eligible for deletion.

use chronicle_core::errors::ChronicleResult;
use chronicle_core::record::RecordId;
use chronicle_core::sql::{Ident, SqlValue};
use chronicle_core::traits::IVersionStore;

use crate::statements;

/// Resolve the boundary for one record: the version at descending
/// offset `keep_count`, or `None` when fewer than `keep_count + 1`
/// versions exist (the record is exempt from this pass).
///
/// `keep_count <= 0` clamps the offset to 0, making the newest version
/// the boundary — every history row for the record, the newest
/// included, becomes deletable. This preserves the literal
/// `LIMIT 1 OFFSET n` semantics.
pub fn resolve(
    store: &dyn IVersionStore,
    versions: &Ident,
    record_id: RecordId,
    keep_count: i64,
) -> ChronicleResult<Option<i64>> {
    let offset = keep_count.max(0);
    let rows = store.query_column(
        &statements::version_at_offset(versions),
        &[record_id.0.into(), offset.into()],
    )?;
    Ok(rows.first().copied())
}

/// Delete (or, in dry-run, count) every version row for `record_id`
/// with `Version <= boundary`. Both statements share one predicate.
pub fn prune_upto(
    store: &dyn IVersionStore,
    versions: &Ident,
    record_id: RecordId,
    boundary: i64,
    dry_run: bool,
) -> ChronicleResult<usize> {
    let params: [SqlValue; 2] = [record_id.0.into(), boundary.into()];
    if dry_run {
        let rows = store.query_column(&statements::count_upto(versions), &params)?;
        Ok(rows.first().copied().unwrap_or(0) as usize)
    } else {
        store.execute(&statements::delete_upto(versions), &params)
    }
}
