//! Default values for retention configuration.

pub use crate::constants::DEFAULT_KEEP_COUNT;
pub use crate::constants::LIVE_PAGE_SIZE;
