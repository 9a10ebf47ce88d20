//! PruneJob — orchestrates the passes per record type and aggregates
//! counts. Single-threaded and sequential: one record type is fully
//! processed before the next begins, because deletions are computed
//! from history state observed immediately beforehand.

use tracing::info;

use chronicle_core::config::RetentionPolicy;
use chronicle_core::errors::ChronicleResult;
use chronicle_core::report::{JobReport, TypeOutcome};
use chronicle_core::traits::{ISnapshotLedger, IVersionStore};

use crate::{archived, draft, orphans, snapshots};

/// The orchestrating job. The ledger collaborator is injected when the
/// snapshot subsystem is configured and absent otherwise; the job
/// branches on its presence.
pub struct PruneJob<'a> {
    store: &'a dyn IVersionStore,
    ledger: Option<&'a dyn ISnapshotLedger>,
    policy: RetentionPolicy,
}

impl<'a> PruneJob<'a> {
    pub fn new(store: &'a dyn IVersionStore, policy: RetentionPolicy) -> Self {
        Self {
            store,
            ledger: None,
            policy,
        }
    }

    /// Attach the optional snapshot-ledger collaborator.
    pub fn with_ledger(mut self, ledger: &'a dyn ISnapshotLedger) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// The policy this job runs under.
    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    /// Run every pass for every versioned root record type.
    pub fn run(&self) -> ChronicleResult<JobReport> {
        let mut report = JobReport {
            dry_run: self.policy.dry_run,
            ..JobReport::default()
        };
        for record_type in self.store.versioned_record_types()? {
            report.outcomes.push(self.run_record_type(&record_type)?);
        }
        info!(
            types = report.outcomes.len(),
            total = report.total_deleted(),
            dry_run = report.dry_run,
            "prune job finished"
        );
        Ok(report)
    }

    /// Run every pass for a single record type. Snapshot-ledger first
    /// (when injected and not fast mode), then draft retention (unless
    /// fast mode), then archived retention, then the orphan sweep.
    pub fn run_record_type(&self, record_type: &str) -> ChronicleResult<TypeOutcome> {
        let snapshots = match self.ledger {
            Some(ledger) if !self.policy.fast => {
                Some(snapshots::run(self.store, ledger, record_type, &self.policy)?)
            }
            _ => None,
        };

        let draft = if self.policy.fast {
            None
        } else {
            Some(draft::run(self.store, record_type, &self.policy)?)
        };

        let archived = archived::run(self.store, record_type, &self.policy)?;
        let orphaned = orphans::run(self.store, record_type, &self.policy)?;

        Ok(TypeOutcome {
            record_type: record_type.to_string(),
            snapshots,
            draft,
            archived,
            orphaned,
        })
    }
}
