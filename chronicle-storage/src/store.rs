//! SqliteStore — implements the minimal store surface over the
//! maintenance connection and the schema registry.

use rusqlite::params_from_iter;
use rusqlite::types::Value;

use chronicle_core::errors::ChronicleResult;
use chronicle_core::record::RecordId;
use chronicle_core::sql::SqlValue;
use chronicle_core::traits::IVersionStore;

use crate::connection::MaintenanceConnection;
use crate::schema::SchemaRegistry;
use crate::to_store_err;

/// SQLite-backed version store.
pub struct SqliteStore {
    conn: MaintenanceConnection,
    schema: SchemaRegistry,
}

impl SqliteStore {
    pub fn new(conn: MaintenanceConnection, schema: SchemaRegistry) -> Self {
        Self { conn, schema }
    }

    /// The shared connection handle (for fixtures and the ledger).
    pub fn connection(&self) -> &MaintenanceConnection {
        &self.conn
    }

    /// The schema registry.
    pub fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    fn bind(params: &[SqlValue]) -> Vec<Value> {
        params
            .iter()
            .map(|p| match p {
                SqlValue::Int(v) => Value::Integer(*v),
                SqlValue::Text(v) => Value::Text(v.clone()),
            })
            .collect()
    }
}

impl IVersionStore for SqliteStore {
    fn query_column(&self, sql: &str, params: &[SqlValue]) -> ChronicleResult<Vec<i64>> {
        self.conn.with_conn(|conn| {
            let mut stmt = conn.prepare(sql).map_err(|e| to_store_err(e.to_string()))?;
            let rows = stmt
                .query_map(params_from_iter(Self::bind(params)), |row| row.get(0))
                .map_err(|e| to_store_err(e.to_string()))?;
            rows.collect::<Result<Vec<i64>, _>>()
                .map_err(|e| to_store_err(e.to_string()))
        })
    }

    fn execute(&self, sql: &str, params: &[SqlValue]) -> ChronicleResult<usize> {
        self.conn.with_conn(|conn| {
            conn.execute(sql, params_from_iter(Self::bind(params)))
                .map_err(|e| to_store_err(e.to_string()))
        })
    }

    fn base_table(&self, record_type: &str) -> ChronicleResult<String> {
        Ok(self.schema.base_table(record_type)?.as_str().to_string())
    }

    fn inheritance_chain(&self, record_type: &str) -> ChronicleResult<Vec<String>> {
        Ok(self
            .schema
            .inheritance_chain(record_type)?
            .iter()
            .map(|t| t.as_str().to_string())
            .collect())
    }

    fn versioned_record_types(&self) -> ChronicleResult<Vec<String>> {
        Ok(self.schema.versioned_types())
    }

    fn live_record_page(
        &self,
        record_type: &str,
        offset: usize,
        limit: usize,
    ) -> ChronicleResult<Vec<RecordId>> {
        let base = self.schema.base_table(record_type)?;
        let ids = self.query_column(
            &format!(
                "SELECT \"ID\" FROM {table} ORDER BY \"ID\" LIMIT ?1 OFFSET ?2",
                table = base.quoted(),
            ),
            &[SqlValue::Int(limit as i64), SqlValue::Int(offset as i64)],
        )?;
        Ok(ids.into_iter().map(RecordId).collect())
    }
}

/// Build an in-memory store with its schema installed (for testing).
pub fn open_in_memory(schema: SchemaRegistry) -> ChronicleResult<SqliteStore> {
    let conn = MaintenanceConnection::open_in_memory()?;
    conn.with_conn(|c| schema.install(c))?;
    Ok(SqliteStore::new(conn, schema))
}
