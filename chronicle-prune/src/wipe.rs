//! Inactive alternative to the archived retention pass: delete ALL
//! history for records whose live row is gone, regardless of count.
//!
//! Not wired into [`crate::job::PruneJob`]. The orchestrated job keeps
//! `keep_count` versions even for deleted records; whether full wipe on
//! delete is the intended policy is an open question tracked in
//! DESIGN.md. Operates on the base history table only — run the orphan
//! pass afterwards to sweep subclass tables.

use tracing::info;

use chronicle_core::errors::ChronicleResult;
use chronicle_core::report::PassTotals;
use chronicle_core::sql::Ident;
use chronicle_core::traits::IVersionStore;

use crate::statements;

/// Delete (or count, in dry-run) every base history row whose record
/// has no live counterpart.
pub fn wipe_deleted_record_history(
    store: &dyn IVersionStore,
    record_type: &str,
    dry_run: bool,
) -> ChronicleResult<PassTotals> {
    let base = Ident::new(&store.base_table(record_type)?)?;
    let versions = base.versions_table();

    let deleted = if dry_run {
        let rows = store.query_column(
            &statements::count_deleted_record_history(&versions, &base),
            &[],
        )?;
        rows.first().copied().unwrap_or(0) as usize
    } else {
        store.execute(
            &statements::delete_deleted_record_history(&versions, &base),
            &[],
        )?
    };

    if deleted > 0 {
        if dry_run {
            info!(table = %versions, would_delete = deleted, "dry run: deleted-record history wipe");
        } else {
            info!(table = %versions, deleted, "deleted-record history wiped");
        }
    }

    Ok(PassTotals {
        table: versions.as_str().to_string(),
        deleted,
    })
}
