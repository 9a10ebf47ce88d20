/// Store-layer errors. Fatal to the enclosing job.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("unknown record type: {record_type}")]
    UnknownRecordType { record_type: String },

    #[error("invalid SQL identifier: {identifier:?}")]
    InvalidIdentifier { identifier: String },
}
