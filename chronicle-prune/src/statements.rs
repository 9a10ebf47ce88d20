//! Statement text for every pass, built from validated identifiers.
//!
//! All table names flow through `Ident` before reaching this module;
//! record identifiers, versions, and counts travel as positional
//! parameters. Dry-run count statements share their predicate text with
//! the matching delete, so a reported count always equals what the
//! delete would remove against the same state.

use chronicle_core::sql::Ident;

/// Version at descending offset `?2` for record `?1`. Empty result
/// means fewer than `?2 + 1` versions exist.
pub(crate) fn version_at_offset(versions: &Ident) -> String {
    format!(
        "SELECT \"Version\" FROM {t} WHERE \"RecordID\" = ?1 \
         ORDER BY \"Version\" DESC LIMIT 1 OFFSET ?2",
        t = versions.quoted(),
    )
}

const UPTO_PREDICATE: &str = "\"RecordID\" = ?1 AND \"Version\" <= ?2";

pub(crate) fn delete_upto(versions: &Ident) -> String {
    format!("DELETE FROM {t} WHERE {UPTO_PREDICATE}", t = versions.quoted())
}

pub(crate) fn count_upto(versions: &Ident) -> String {
    format!(
        "SELECT COUNT(*) FROM {t} WHERE {UPTO_PREDICATE}",
        t = versions.quoted(),
    )
}

/// Every record identifier present in history, live or not.
pub(crate) fn distinct_record_ids(versions: &Ident) -> String {
    format!(
        "SELECT DISTINCT \"RecordID\" FROM {t} ORDER BY \"RecordID\"",
        t = versions.quoted(),
    )
}

fn orphan_predicate(sub: &Ident, base: &Ident) -> String {
    format!(
        "NOT EXISTS (SELECT 1 FROM {b} WHERE \
         {b}.\"RecordID\" = {s}.\"RecordID\" AND {b}.\"Version\" = {s}.\"Version\")",
        b = base.quoted(),
        s = sub.quoted(),
    )
}

/// Subclass history rows with no matching `(RecordID, Version)` base
/// history row.
pub(crate) fn delete_orphans(sub: &Ident, base: &Ident) -> String {
    format!(
        "DELETE FROM {s} WHERE {p}",
        s = sub.quoted(),
        p = orphan_predicate(sub, base),
    )
}

pub(crate) fn count_orphans(sub: &Ident, base: &Ident) -> String {
    format!(
        "SELECT COUNT(*) FROM {s} WHERE {p}",
        s = sub.quoted(),
        p = orphan_predicate(sub, base),
    )
}

fn deleted_record_predicate(versions: &Ident, live: &Ident) -> String {
    format!(
        "NOT EXISTS (SELECT 1 FROM {l} WHERE {l}.\"ID\" = {v}.\"RecordID\")",
        l = live.quoted(),
        v = versions.quoted(),
    )
}

/// All history rows whose record has no live counterpart (the inactive
/// full-wipe utility).
pub(crate) fn delete_deleted_record_history(versions: &Ident, live: &Ident) -> String {
    format!(
        "DELETE FROM {v} WHERE {p}",
        v = versions.quoted(),
        p = deleted_record_predicate(versions, live),
    )
}

pub(crate) fn count_deleted_record_history(versions: &Ident, live: &Ident) -> String {
    format!(
        "SELECT COUNT(*) FROM {v} WHERE {p}",
        v = versions.quoted(),
        p = deleted_record_predicate(versions, live),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_quoted_in_statement_text() {
        let versions = Ident::new("Article_Versions").unwrap();
        let sql = version_at_offset(&versions);
        assert!(sql.contains("\"Article_Versions\""));
        assert!(sql.contains("OFFSET ?2"));
    }

    #[test]
    fn delete_and_count_share_the_predicate() {
        let versions = Ident::new("Article_Versions").unwrap();
        let delete = delete_upto(&versions);
        let count = count_upto(&versions);
        let predicate = delete.split("WHERE").nth(1).unwrap();
        assert!(count.ends_with(predicate));
    }

    #[test]
    fn orphan_statements_join_on_both_key_columns() {
        let sub = Ident::new("BlogArticle_Versions").unwrap();
        let base = Ident::new("Article_Versions").unwrap();
        let sql = delete_orphans(&sub, &base);
        assert!(sql.contains("\"RecordID\""));
        assert!(sql.contains("\"Version\""));
        assert!(sql.contains("NOT EXISTS"));
    }
}
