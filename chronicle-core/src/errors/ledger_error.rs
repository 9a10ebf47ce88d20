/// Snapshot-ledger errors. Caught per object inside the snapshot pass;
/// never fatal to the pass or the record type.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("malformed activity type {value:?} on ledger entry {entry_id}")]
    MalformedActivity { entry_id: i64, value: String },

    #[error("no live object {object_id} for record type {record_type}")]
    MissingObject { record_type: String, object_id: i64 },

    #[error("SQLite error: {message}")]
    Sqlite { message: String },
}
