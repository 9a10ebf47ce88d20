//! SqliteLedger — content-snapshot ledger over a `ContentSnapshots`
//! table. Entries belong to a live object through its content hash;
//! the `ObjectID` column only scopes the fetch.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use chronicle_core::errors::{ChronicleError, ChronicleResult, LedgerError};
use chronicle_core::record::{ActivityType, RecordId, SnapshotEntry};
use chronicle_core::traits::ISnapshotLedger;

use crate::connection::MaintenanceConnection;
use crate::schema::SchemaRegistry;
use crate::to_ledger_err;

/// SQLite-backed snapshot ledger.
pub struct SqliteLedger {
    conn: MaintenanceConnection,
    schema: SchemaRegistry,
}

impl SqliteLedger {
    pub fn new(conn: MaintenanceConnection, schema: SchemaRegistry) -> Self {
        Self { conn, schema }
    }

    /// Create the ledger table.
    pub fn install(conn: &Connection) -> ChronicleResult<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS \"ContentSnapshots\" (
    \"ID\" INTEGER PRIMARY KEY AUTOINCREMENT,
    \"RecordType\" TEXT NOT NULL,
    \"ObjectID\" INTEGER NOT NULL,
    \"OriginHash\" TEXT NOT NULL,
    \"Activity\" TEXT NOT NULL,
    \"LastEdited\" TEXT NOT NULL
);",
        )
        .map_err(|e| to_ledger_err(e.to_string()))?;
        Ok(())
    }

    /// Append a ledger entry. The activity string is stored as given;
    /// validation happens on read, where malformed entries surface as
    /// isolated per-object errors.
    pub fn record_entry(
        &self,
        record_type: &str,
        object_id: RecordId,
        origin_hash: &str,
        activity: &str,
        last_edited: DateTime<Utc>,
    ) -> ChronicleResult<i64> {
        self.conn.with_conn(|conn| {
            conn.execute(
                "INSERT INTO \"ContentSnapshots\"
                     (\"RecordType\", \"ObjectID\", \"OriginHash\", \"Activity\", \"LastEdited\")
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record_type,
                    object_id.0,
                    origin_hash,
                    activity,
                    last_edited.to_rfc3339(),
                ],
            )
            .map_err(|e| to_ledger_err(e.to_string()))?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Content hash of a live row, from its `Title` and `Content`.
    pub fn hash_content(title: &str, content: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(title.as_bytes());
        hasher.update(b"\x00");
        hasher.update(content.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    fn parse_timestamp(entry_id: i64, raw: &str) -> ChronicleResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                to_ledger_err(format!("bad timestamp on ledger entry {entry_id}: {e}"))
            })
    }
}

impl ISnapshotLedger for SqliteLedger {
    fn related_entries(
        &self,
        record_type: &str,
        object_id: RecordId,
    ) -> ChronicleResult<Vec<SnapshotEntry>> {
        self.conn.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT \"ID\", \"OriginHash\", \"Activity\", \"LastEdited\"
                     FROM \"ContentSnapshots\"
                     WHERE \"RecordType\" = ?1 AND \"ObjectID\" = ?2
                     ORDER BY \"LastEdited\" DESC, \"ID\" DESC",
                )
                .map_err(|e| to_ledger_err(e.to_string()))?;
            let rows = stmt
                .query_map(params![record_type, object_id.0], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                })
                .map_err(|e| to_ledger_err(e.to_string()))?;

            let mut entries = Vec::new();
            for row in rows {
                let (id, origin_hash, activity, last_edited) =
                    row.map_err(|e| to_ledger_err(e.to_string()))?;
                let activity = ActivityType::parse(id, &activity)
                    .map_err(ChronicleError::LedgerError)?;
                entries.push(SnapshotEntry {
                    id,
                    origin_hash,
                    activity,
                    last_edited: Self::parse_timestamp(id, &last_edited)?,
                });
            }
            Ok(entries)
        })
    }

    fn content_hash(&self, record_type: &str, object_id: RecordId) -> ChronicleResult<String> {
        let base = self.schema.base_table(record_type)?;
        self.conn.with_conn(|conn| {
            let row: Option<(Option<String>, Option<String>)> = conn
                .query_row(
                    &format!(
                        "SELECT \"Title\", \"Content\" FROM {table} WHERE \"ID\" = ?1",
                        table = base.quoted(),
                    ),
                    params![object_id.0],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()
                .map_err(|e| to_ledger_err(e.to_string()))?;

            let (title, content) = row.ok_or_else(|| {
                ChronicleError::LedgerError(LedgerError::MissingObject {
                    record_type: record_type.to_string(),
                    object_id: object_id.0,
                })
            })?;
            Ok(Self::hash_content(
                title.as_deref().unwrap_or(""),
                content.as_deref().unwrap_or(""),
            ))
        })
    }

    fn delete_entry(&self, entry_id: i64) -> ChronicleResult<()> {
        self.conn.with_conn(|conn| {
            conn.execute(
                "DELETE FROM \"ContentSnapshots\" WHERE \"ID\" = ?1",
                params![entry_id],
            )
            .map_err(|e| to_ledger_err(e.to_string()))?;
            Ok(())
        })
    }
}
