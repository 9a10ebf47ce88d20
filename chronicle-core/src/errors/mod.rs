//! Error taxonomy: configuration errors are fatal before store access,
//! store errors are fatal to the job, ledger errors are isolated per
//! object inside the snapshot pass.

mod config_error;
mod ledger_error;
mod store_error;

pub use config_error::ConfigError;
pub use ledger_error::LedgerError;
pub use store_error::StoreError;

/// Top-level error type aggregating all subsystems.
#[derive(Debug, thiserror::Error)]
pub enum ChronicleError {
    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("ledger error: {0}")]
    LedgerError(#[from] LedgerError),
}

/// Result alias used across the workspace.
pub type ChronicleResult<T> = Result<T, ChronicleError>;
