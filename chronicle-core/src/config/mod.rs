//! Retention configuration and invocation-mode parsing.

pub mod defaults;
mod retention;

pub use retention::{PruneMode, RetentionPolicy};
