use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Retention subsystem configuration. Pure data, no behavior beyond
/// mode mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionPolicy {
    /// Number of versions retained per record.
    pub keep_count: i64,
    /// When true, every delete is replaced by a count with the same
    /// predicate and nothing is mutated.
    pub dry_run: bool,
    /// When true, the draft and ledger passes are skipped.
    pub fast: bool,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            keep_count: defaults::DEFAULT_KEEP_COUNT,
            dry_run: false,
            fast: false,
        }
    }
}

impl RetentionPolicy {
    /// Build a policy from a parsed invocation mode and an optional
    /// keep-count override. The override must be positive.
    pub fn from_mode(mode: PruneMode, keep_count: Option<i64>) -> Result<Self, ConfigError> {
        let keep_count = match keep_count {
            Some(n) if n <= 0 => return Err(ConfigError::InvalidKeepCount { value: n }),
            Some(n) => n,
            None => defaults::DEFAULT_KEEP_COUNT,
        };
        Ok(Self {
            keep_count,
            dry_run: mode == PruneMode::Dry,
            fast: mode == PruneMode::Fast,
        })
    }
}

/// Invocation mode selector. Exactly three values are accepted;
/// anything else is rejected before any store access occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PruneMode {
    /// Compute counts only, no mutation.
    Dry,
    /// Execute mutations, all passes.
    Yes,
    /// Execute mutations but skip the draft and ledger passes.
    Fast,
}

impl PruneMode {
    /// Parse a mode selector argument.
    pub fn parse(arg: &str) -> Result<Self, ConfigError> {
        match arg {
            "dry" => Ok(Self::Dry),
            "yes" => Ok(Self::Yes),
            "fast" => Ok(Self::Fast),
            other => Err(ConfigError::InvalidMode {
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_keeps_ten() {
        let policy = RetentionPolicy::default();
        assert_eq!(policy.keep_count, 10);
        assert!(!policy.dry_run);
        assert!(!policy.fast);
    }

    #[test]
    fn parse_accepts_the_three_modes() {
        assert_eq!(PruneMode::parse("dry").unwrap(), PruneMode::Dry);
        assert_eq!(PruneMode::parse("yes").unwrap(), PruneMode::Yes);
        assert_eq!(PruneMode::parse("fast").unwrap(), PruneMode::Fast);
    }

    #[test]
    fn parse_rejects_anything_else() {
        for bad in ["", "YES", "y", "dry-run", "force"] {
            assert!(PruneMode::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn mode_maps_onto_policy_flags() {
        let dry = RetentionPolicy::from_mode(PruneMode::Dry, None).unwrap();
        assert!(dry.dry_run && !dry.fast);

        let fast = RetentionPolicy::from_mode(PruneMode::Fast, Some(5)).unwrap();
        assert!(!fast.dry_run && fast.fast);
        assert_eq!(fast.keep_count, 5);
    }

    #[test]
    fn non_positive_override_is_rejected() {
        assert!(RetentionPolicy::from_mode(PruneMode::Yes, Some(0)).is_err());
        assert!(RetentionPolicy::from_mode(PruneMode::Yes, Some(-3)).is_err());
    }
}
