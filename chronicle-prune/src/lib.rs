//! # chronicle-prune
//!
//! The retention engine: prunes version history down to a bounded
//! window per record while preserving referential consistency across
//! multi-table inheritance chains. Consumes the store through the
//! `IVersionStore` seam only; never manages connections or
//! transactions.
//!
//! Passes, in orchestration order: snapshot-ledger pruning (optional
//! collaborator), draft retention over live records, archived retention
//! over every identifier present in history, and orphaned-subtable
//! reconciliation.

pub mod archived;
pub mod boundary;
pub mod draft;
pub mod job;
pub mod orphans;
pub mod snapshots;
mod statements;
pub mod wipe;

pub use job::PruneJob;
