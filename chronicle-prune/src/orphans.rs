//! Orphaned-subtable pass: reconcile each subclass history table
//! against the base history table, deleting rows whose
//! `(RecordID, Version)` pair no longer exists in the base. Subclass
//! tables are independent of each other; the pass only reads the base
//! table's current rows, so it tolerates any ordering but
//! conventionally runs last.

use tracing::info;

use chronicle_core::config::RetentionPolicy;
use chronicle_core::errors::ChronicleResult;
use chronicle_core::report::PassTotals;
use chronicle_core::sql::Ident;
use chronicle_core::traits::IVersionStore;

use crate::statements;

/// Run the orphan pass for one record type. Returns one total per
/// subclass history table, base excluded.
pub fn run(
    store: &dyn IVersionStore,
    record_type: &str,
    policy: &RetentionPolicy,
) -> ChronicleResult<Vec<PassTotals>> {
    let chain = store.inheritance_chain(record_type)?;
    let mut tables = chain.iter().map(|t| Ident::new(t));

    let base_versions = match tables.next() {
        Some(base) => base?.versions_table(),
        None => return Ok(Vec::new()),
    };

    let mut totals = Vec::new();
    for table in tables {
        let sub_versions = table?.versions_table();
        let deleted = if policy.dry_run {
            let rows = store.query_column(
                &statements::count_orphans(&sub_versions, &base_versions),
                &[],
            )?;
            rows.first().copied().unwrap_or(0) as usize
        } else {
            store.execute(
                &statements::delete_orphans(&sub_versions, &base_versions),
                &[],
            )?
        };

        if deleted > 0 {
            if policy.dry_run {
                info!(table = %sub_versions, would_delete = deleted, "dry run: orphaned subtable rows");
            } else {
                info!(table = %sub_versions, deleted, "orphaned subtable rows cleared");
            }
        }

        totals.push(PassTotals {
            table: sub_versions.as_str().to_string(),
            deleted,
        });
    }
    Ok(totals)
}
