/// Chronicle system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of versions retained per record.
pub const DEFAULT_KEEP_COUNT: i64 = 10;

/// Page size for live-record enumeration during the draft pass.
pub const LIVE_PAGE_SIZE: usize = 100;

/// Suffix joining a physical table to its version-history table.
pub const VERSIONS_SUFFIX: &str = "_Versions";
