//! # chronicle-storage
//!
//! SQLite implementation of the Chronicle store traits: a mutex-guarded
//! maintenance connection with pragma setup, the schema registry mapping
//! logical record types to physical tables, and the optional
//! content-snapshot ledger.

pub mod connection;
pub mod ledger;
pub mod pragmas;
pub mod schema;
pub mod store;

use chronicle_core::errors::{ChronicleError, LedgerError, StoreError};

pub use connection::MaintenanceConnection;
pub use ledger::SqliteLedger;
pub use schema::SchemaRegistry;
pub use store::SqliteStore;

/// Map a low-level database error message into a store error.
pub(crate) fn to_store_err(message: String) -> ChronicleError {
    ChronicleError::StoreError(StoreError::Sqlite { message })
}

/// Map a low-level database error message into a ledger error.
pub(crate) fn to_ledger_err(message: String) -> ChronicleError {
    ChronicleError::LedgerError(LedgerError::Sqlite { message })
}
