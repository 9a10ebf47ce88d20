//! Trait seams the engine consumes its collaborators through.

mod ledger;
mod store;

pub use ledger::ISnapshotLedger;
pub use store::IVersionStore;
