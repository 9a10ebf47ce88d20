//! # chronicle-core
//!
//! Foundation crate for the Chronicle retention engine.
//! Defines the record/version types, retention config, errors, SQL
//! primitives, report models, and the trait seams the engine consumes
//! its store through. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod record;
pub mod report;
pub mod sql;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{PruneMode, RetentionPolicy};
pub use errors::{ChronicleError, ChronicleResult};
pub use record::{ActivityType, RecordId, SnapshotEntry, VersionRow};
pub use report::JobReport;
pub use sql::{Ident, SqlValue};
pub use traits::{ISnapshotLedger, IVersionStore};
