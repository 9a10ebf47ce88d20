//! PRAGMA configuration applied to the maintenance connection.
//!
//! WAL mode, NORMAL sync, 5s busy_timeout, foreign_keys ON. Maintenance
//! runs are long and sequential; throughput pragmas matter less than
//! not wedging a concurrent reader.

use rusqlite::Connection;

use chronicle_core::errors::ChronicleResult;

use crate::to_store_err;

/// Apply pragmas to a freshly opened connection.
pub fn apply_pragmas(conn: &Connection) -> ChronicleResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}
