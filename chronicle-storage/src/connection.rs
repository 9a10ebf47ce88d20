//! Single mutex-guarded connection for maintenance runs.
//!
//! The engine is sequential and blocking, so one connection is the
//! whole pool. Cloning shares the underlying connection.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use chronicle_core::errors::{ChronicleError, ChronicleResult, StoreError};

use crate::pragmas::apply_pragmas;
use crate::to_store_err;

/// Shared handle to the maintenance connection.
#[derive(Clone)]
pub struct MaintenanceConnection {
    inner: Arc<Mutex<Connection>>,
}

impl MaintenanceConnection {
    /// Open a connection to the given database file.
    pub fn open(path: &Path) -> ChronicleResult<Self> {
        let conn = Connection::open(path).map_err(|e| {
            ChronicleError::StoreError(StoreError::Unavailable {
                reason: e.to_string(),
            })
        })?;
        apply_pragmas(&conn)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory connection (for testing).
    pub fn open_in_memory() -> ChronicleResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            ChronicleError::StoreError(StoreError::Unavailable {
                reason: e.to_string(),
            })
        })?;
        apply_pragmas(&conn)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(conn)),
        })
    }

    /// Execute a closure with the connection.
    pub fn with_conn<F, T>(&self, f: F) -> ChronicleResult<T>
    where
        F: FnOnce(&Connection) -> ChronicleResult<T>,
    {
        let guard = self
            .inner
            .lock()
            .map_err(|e| to_store_err(format!("connection lock poisoned: {e}")))?;
        f(&guard)
    }
}
