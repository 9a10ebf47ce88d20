//! Draft retention pass: prune history for records that are currently
//! live, enumerated in fixed-size pages to bound peak memory.

use tracing::info;

use chronicle_core::config::defaults::LIVE_PAGE_SIZE;
use chronicle_core::config::RetentionPolicy;
use chronicle_core::errors::ChronicleResult;
use chronicle_core::report::PassTotals;
use chronicle_core::sql::Ident;
use chronicle_core::traits::IVersionStore;

use crate::boundary;

/// Run the draft retention pass for one record type. Callers skip this
/// pass entirely in fast mode.
pub fn run(
    store: &dyn IVersionStore,
    record_type: &str,
    policy: &RetentionPolicy,
) -> ChronicleResult<PassTotals> {
    let base = Ident::new(&store.base_table(record_type)?)?;
    let versions = base.versions_table();

    let mut deleted = 0usize;
    let mut offset = 0usize;
    loop {
        // Page buffer lives only for this iteration; dropping it at the
        // block boundary is the per-page resource reclamation point.
        let page = store.live_record_page(record_type, offset, LIVE_PAGE_SIZE)?;
        let page_len = page.len();
        for record_id in page {
            if let Some(cutoff) = boundary::resolve(store, &versions, record_id, policy.keep_count)?
            {
                deleted += boundary::prune_upto(store, &versions, record_id, cutoff, policy.dry_run)?;
            }
        }
        if page_len < LIVE_PAGE_SIZE {
            break;
        }
        offset += LIVE_PAGE_SIZE;
    }

    if deleted > 0 {
        if policy.dry_run {
            info!(table = %versions, would_delete = deleted, "dry run: draft retention");
        } else {
            info!(table = %versions, deleted, "draft retention cleared rows");
        }
    }

    Ok(PassTotals {
        table: versions.as_str().to_string(),
        deleted,
    })
}
