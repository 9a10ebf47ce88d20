//! Integration test: snapshot-ledger pruning, counting rule, failure
//! isolation.

use chrono::{Duration, Utc};
use chronicle_core::config::RetentionPolicy;
use chronicle_core::record::RecordId;
use chronicle_core::sql::SqlValue;
use chronicle_core::traits::{ISnapshotLedger, IVersionStore};
use chronicle_prune::snapshots;
use chronicle_storage::schema::SchemaRegistry;
use chronicle_storage::store::open_in_memory;
use chronicle_storage::{SqliteLedger, SqliteStore};

fn fixture() -> (SqliteStore, SqliteLedger) {
    let mut schema = SchemaRegistry::new();
    schema.register("Article", "Article", &[]).unwrap();
    let store = open_in_memory(schema).unwrap();
    let conn = store.connection().clone();
    conn.with_conn(SqliteLedger::install).unwrap();
    let ledger = SqliteLedger::new(conn, store.schema().clone());
    (store, ledger)
}

fn insert_live(store: &SqliteStore, id: i64, title: &str) {
    store
        .execute(
            "INSERT INTO \"Article\" (\"ID\", \"Title\", \"Content\") VALUES (?1, ?2, 'body')",
            &[SqlValue::Int(id), SqlValue::Text(title.to_string())],
        )
        .unwrap();
}

/// Append entries newest-first: index 0 gets the latest timestamp.
fn append_newest_first(ledger: &SqliteLedger, id: i64, entries: &[(&str, &str)]) {
    let base = Utc::now();
    for (i, (origin_hash, activity)) in entries.iter().enumerate() {
        ledger
            .record_entry(
                "Article",
                RecordId(id),
                origin_hash,
                activity,
                base - Duration::seconds(i as i64),
            )
            .unwrap();
    }
}

fn policy(keep_count: i64) -> RetentionPolicy {
    RetentionPolicy {
        keep_count,
        ..RetentionPolicy::default()
    }
}

#[test]
fn full_version_density_sets_the_boundary() {
    let (store, ledger) = fixture();
    insert_live(&store, 1, "a");
    let current = SqliteLedger::hash_content("a", "body");

    // Newest-first: two full versions survive; the third full version
    // and everything after it goes, partial entries included.
    append_newest_first(
        &ledger,
        1,
        &[
            (current.as_str(), "UPDATED"),
            ("partial", "RELATED"),
            (current.as_str(), "UPDATED"),
            ("partial", "RELATED"),
            (current.as_str(), "UPDATED"),
            ("partial", "RELATED"),
            (current.as_str(), "CREATED"),
        ],
    );

    let totals = snapshots::run(&store, &ledger, "Article", &policy(2)).unwrap();
    assert_eq!(totals.cleared, 3);
    assert_eq!(totals.kept, 4);
    assert!(totals.failures.is_empty());

    let remaining = ledger.related_entries("Article", RecordId(1)).unwrap();
    assert_eq!(remaining.len(), 4);
}

#[test]
fn deleted_marker_with_current_hash_is_not_a_full_version() {
    let (store, ledger) = fixture();
    insert_live(&store, 1, "a");
    let current = SqliteLedger::hash_content("a", "body");

    append_newest_first(
        &ledger,
        1,
        &[(current.as_str(), "DELETED"), (current.as_str(), "UPDATED"), (current.as_str(), "UPDATED")],
    );

    // The DELETED entry never increments the counter, so only the
    // second UPDATED exceeds keep-count 1.
    let totals = snapshots::run(&store, &ledger, "Article", &policy(1)).unwrap();
    assert_eq!(totals.cleared, 1);
    assert_eq!(totals.kept, 2);
}

#[test]
fn stale_hash_entries_never_count_but_are_pruned_past_the_cutoff() {
    let (store, ledger) = fixture();
    insert_live(&store, 1, "a");
    let current = SqliteLedger::hash_content("a", "body");

    append_newest_first(
        &ledger,
        1,
        &[
            ("old-hash", "UPDATED"),
            (current.as_str(), "UPDATED"),
            ("old-hash", "UPDATED"),
            (current.as_str(), "UPDATED"),
            ("old-hash", "UPDATED"),
        ],
    );

    let totals = snapshots::run(&store, &ledger, "Article", &policy(1)).unwrap();
    // Counter reaches 2 on the second current-hash entry; it and the
    // trailing stale entry are cleared.
    assert_eq!(totals.cleared, 2);
    assert_eq!(totals.kept, 3);
}

#[test]
fn one_bad_object_never_aborts_the_pass() {
    let (store, ledger) = fixture();
    let current: Vec<String> = (1..=3)
        .map(|id| {
            insert_live(&store, id, &format!("t{id}"));
            SqliteLedger::hash_content(&format!("t{id}"), "body")
        })
        .collect();

    append_newest_first(&ledger, 1, &[(current[0].as_str(), "UPDATED"), (current[0].as_str(), "UPDATED")]);
    // Object 2 carries a malformed activity value.
    append_newest_first(&ledger, 2, &[("h", "EXPLODED")]);
    append_newest_first(&ledger, 3, &[(current[2].as_str(), "UPDATED"), (current[2].as_str(), "UPDATED")]);

    let totals = snapshots::run(&store, &ledger, "Article", &policy(1)).unwrap();

    // Objects 1 and 3 were both processed.
    assert_eq!(totals.cleared, 2);
    assert_eq!(totals.kept, 2);

    // Object 2 failed in isolation, with its identifier recorded.
    assert_eq!(totals.failures.len(), 1);
    assert_eq!(totals.failures[0].object_id, RecordId(2));
    assert!(totals.failures[0].reason.contains("EXPLODED"));

    // Its entries are untouched in storage.
    let rows = store
        .query_column(
            "SELECT COUNT(*) FROM \"ContentSnapshots\" WHERE \"ObjectID\" = 2",
            &[],
        )
        .unwrap();
    assert_eq!(rows[0], 1);
}

#[test]
fn dry_run_counts_without_deleting_entries() {
    let (store, ledger) = fixture();
    insert_live(&store, 1, "a");
    let current = SqliteLedger::hash_content("a", "body");
    append_newest_first(
        &ledger,
        1,
        &[(current.as_str(), "UPDATED"), (current.as_str(), "UPDATED"), (current.as_str(), "CREATED")],
    );

    let dry = RetentionPolicy {
        keep_count: 1,
        dry_run: true,
        ..RetentionPolicy::default()
    };
    let counted = snapshots::run(&store, &ledger, "Article", &dry).unwrap();
    assert_eq!(counted.cleared, 2);
    assert_eq!(ledger.related_entries("Article", RecordId(1)).unwrap().len(), 3);

    let mutated = snapshots::run(&store, &ledger, "Article", &policy(1)).unwrap();
    assert_eq!(mutated.cleared, counted.cleared);
}
