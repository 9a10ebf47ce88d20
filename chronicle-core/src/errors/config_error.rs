/// Invocation configuration errors. Raised before any store access.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid mode {value:?}: expected one of \"dry\", \"yes\", \"fast\"")]
    InvalidMode { value: String },

    #[error("invalid keep count {value}: must be a positive integer")]
    InvalidKeepCount { value: i64 },
}
