//! SchemaRegistry — maps logical record types to physical tables.
//!
//! Each registered type owns a base table and an ordered chain of
//! subclass tables (multi-table inheritance, joined on the shared
//! `"ID"`). Every physical table is paired with a `<table>_Versions`
//! history table. Table names pass through `Ident` validation at
//! registration, so later statement building never sees a raw name.

use rusqlite::Connection;

use chronicle_core::errors::{ChronicleError, ChronicleResult, StoreError};
use chronicle_core::sql::Ident;

use crate::to_store_err;

/// Physical layout of one logical record type.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    pub record_type: String,
    pub base_table: Ident,
    /// Subclass tables in inheritance order, base excluded.
    pub subclass_tables: Vec<Ident>,
    /// Whether the type is a versioned root. Unversioned types are
    /// invisible to the prune job.
    pub versioned: bool,
}

impl RecordSchema {
    /// Full inheritance chain, base table first.
    pub fn chain(&self) -> Vec<Ident> {
        let mut chain = Vec::with_capacity(1 + self.subclass_tables.len());
        chain.push(self.base_table.clone());
        chain.extend(self.subclass_tables.iter().cloned());
        chain
    }
}

/// Registry of record types, in registration order.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: Vec<RecordSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a versioned record type with its base table and
    /// subclass chain.
    pub fn register(
        &mut self,
        record_type: &str,
        base_table: &str,
        subclass_tables: &[&str],
    ) -> ChronicleResult<()> {
        self.register_with(record_type, base_table, subclass_tables, true)
    }

    /// Register an unversioned type (present in the schema, skipped by
    /// the prune job).
    pub fn register_unversioned(
        &mut self,
        record_type: &str,
        base_table: &str,
    ) -> ChronicleResult<()> {
        self.register_with(record_type, base_table, &[], false)
    }

    fn register_with(
        &mut self,
        record_type: &str,
        base_table: &str,
        subclass_tables: &[&str],
        versioned: bool,
    ) -> ChronicleResult<()> {
        let base_table = Ident::new(base_table)?;
        let subclass_tables = subclass_tables
            .iter()
            .map(|t| Ident::new(t))
            .collect::<Result<Vec<_>, _>>()?;
        self.types.push(RecordSchema {
            record_type: record_type.to_string(),
            base_table,
            subclass_tables,
            versioned,
        });
        Ok(())
    }

    fn lookup(&self, record_type: &str) -> ChronicleResult<&RecordSchema> {
        self.types
            .iter()
            .find(|s| s.record_type == record_type)
            .ok_or_else(|| {
                ChronicleError::StoreError(StoreError::UnknownRecordType {
                    record_type: record_type.to_string(),
                })
            })
    }

    /// Physical base table for a record type.
    pub fn base_table(&self, record_type: &str) -> ChronicleResult<Ident> {
        Ok(self.lookup(record_type)?.base_table.clone())
    }

    /// Ordered inheritance chain, base table first.
    pub fn inheritance_chain(&self, record_type: &str) -> ChronicleResult<Vec<Ident>> {
        Ok(self.lookup(record_type)?.chain())
    }

    /// Versioned root record types, in registration order.
    pub fn versioned_types(&self) -> Vec<String> {
        self.types
            .iter()
            .filter(|s| s.versioned)
            .map(|s| s.record_type.clone())
            .collect()
    }

    /// Create the live and history tables for every registered type.
    /// Used by tests and fixtures; production stores already carry
    /// their schema.
    pub fn install(&self, conn: &Connection) -> ChronicleResult<()> {
        for schema in &self.types {
            for (idx, table) in schema.chain().iter().enumerate() {
                let extra = if idx == 0 {
                    "\"LastEdited\" TEXT,\n    \"Title\" TEXT,\n    \"Content\" TEXT"
                } else {
                    "\"Extra\" TEXT"
                };
                conn.execute_batch(&format!(
                    "CREATE TABLE IF NOT EXISTS {live} (
    \"ID\" INTEGER PRIMARY KEY,
    {extra}
);",
                    live = table.quoted(),
                ))
                .map_err(|e| to_store_err(e.to_string()))?;

                if schema.versioned {
                    conn.execute_batch(&format!(
                        "CREATE TABLE IF NOT EXISTS {versions} (
    \"RecordID\" INTEGER NOT NULL,
    \"Version\" INTEGER NOT NULL,
    \"LastEdited\" TEXT NOT NULL,
    PRIMARY KEY (\"RecordID\", \"Version\")
);",
                        versions = table.versions_table().quoted(),
                    ))
                    .map_err(|e| to_store_err(e.to_string()))?;
                }
            }
        }
        Ok(())
    }
}
