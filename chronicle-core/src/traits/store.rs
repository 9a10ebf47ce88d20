use crate::errors::ChronicleResult;
use crate::record::RecordId;
use crate::sql::SqlValue;

/// Minimal store surface the engine requires. The engine never manages
/// connections, pooling, or transactions; it builds statements from
/// validated identifiers and hands them to this interface.
pub trait IVersionStore: Send + Sync {
    // --- Generic query/execute ---

    /// Run a read statement, returning the first column of every row
    /// as `i64`. Covers identifier enumeration, boundary lookup, and
    /// `COUNT(*)` queries.
    fn query_column(&self, sql: &str, params: &[SqlValue]) -> ChronicleResult<Vec<i64>>;

    /// Run a write statement, returning the number of affected rows.
    fn execute(&self, sql: &str, params: &[SqlValue]) -> ChronicleResult<usize>;

    // --- Schema resolution ---

    /// Physical base table for a logical record type.
    fn base_table(&self, record_type: &str) -> ChronicleResult<String>;

    /// Ordered inheritance chain for a record type, base table first.
    fn inheritance_chain(&self, record_type: &str) -> ChronicleResult<Vec<String>>;

    /// Record types that are versioned roots (direct subclasses of the
    /// versioned base abstraction). The job enumerates these; subclass
    /// tables beneath each are swept by the orphan pass.
    fn versioned_record_types(&self) -> ChronicleResult<Vec<String>>;

    // --- Live-record enumeration ---

    /// One fixed-size page of live record identifiers for a type,
    /// ordered by identifier.
    fn live_record_page(
        &self,
        record_type: &str,
        offset: usize,
        limit: usize,
    ) -> ChronicleResult<Vec<RecordId>>;
}
