//! Run report: one entry per deduplicated owner, in processing order.

use chrono::{DateTime, Utc};

use codeownerizer_core::types::{GrantRequest, OwnerRecord, RepoRef};

use crate::error::OwnerFailure;
use crate::inspect::Access;

/// What happened to a single owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerOutcome {
    /// Already had push permission; nothing issued.
    Sufficient { identity: String },
    /// A grant was issued and accepted.
    Granted { grant: GrantRequest, before: Access },
    /// Dry-run: a grant would have been issued.
    WouldGrant { grant: GrantRequest, before: Access },
    /// The owner could not be reconciled.
    Failed { failure: OwnerFailure },
}

impl OwnerOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            OwnerOutcome::Sufficient { .. } => "ok",
            OwnerOutcome::Granted { .. } => "granted",
            OwnerOutcome::WouldGrant { .. } => "would-grant",
            OwnerOutcome::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerReport {
    pub owner: OwnerRecord,
    pub outcome: OwnerOutcome,
}

/// Summary of a reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileReport {
    pub repo: RepoRef,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Owners as declared, before deduplication.
    pub declared: usize,
    pub owners: Vec<OwnerReport>,
}

impl ReconcileReport {
    pub(crate) fn begin(repo: RepoRef, dry_run: bool, declared: usize) -> Self {
        let now = Utc::now();
        Self {
            repo,
            dry_run,
            started_at: now,
            finished_at: now,
            declared,
            owners: Vec::new(),
        }
    }

    pub(crate) fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }

    fn count(&self, pred: impl Fn(&OwnerOutcome) -> bool) -> usize {
        self.owners.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn sufficient(&self) -> usize {
        self.count(|o| matches!(o, OwnerOutcome::Sufficient { .. }))
    }

    pub fn granted(&self) -> usize {
        self.count(|o| matches!(o, OwnerOutcome::Granted { .. }))
    }

    pub fn would_grant(&self) -> usize {
        self.count(|o| matches!(o, OwnerOutcome::WouldGrant { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, OwnerOutcome::Failed { .. }))
    }

    /// Grants issued (or, in dry-run, planned), in processing order.
    pub fn grants(&self) -> Vec<&GrantRequest> {
        self.owners
            .iter()
            .filter_map(|r| match &r.outcome {
                OwnerOutcome::Granted { grant, .. } | OwnerOutcome::WouldGrant { grant, .. } => {
                    Some(grant)
                }
                _ => None,
            })
            .collect()
    }

    /// Failed owners with their reasons.
    pub fn failures(&self) -> Vec<(&OwnerRecord, &OwnerFailure)> {
        self.owners
            .iter()
            .filter_map(|r| match &r.outcome {
                OwnerOutcome::Failed { failure } => Some((&r.owner, failure)),
                _ => None,
            })
            .collect()
    }

    /// True when every owner ended up sufficient or granted.
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeownerizer_core::types::Login;

    #[test]
    fn counts_by_outcome() {
        let repo = RepoRef::new("org", "repo");
        let mut report = ReconcileReport::begin(repo.clone(), false, 4);
        report.owners = vec![
            OwnerReport {
                owner: OwnerRecord::user("@a"),
                outcome: OwnerOutcome::Sufficient {
                    identity: "a".into(),
                },
            },
            OwnerReport {
                owner: OwnerRecord::user("@b"),
                outcome: OwnerOutcome::Granted {
                    grant: GrantRequest::User {
                        repo,
                        login: Login::from("b"),
                    },
                    before: Access::Absent,
                },
            },
            OwnerReport {
                owner: OwnerRecord::email("x@example.com"),
                outcome: OwnerOutcome::Failed {
                    failure: OwnerFailure::EmailNotFound {
                        email: "x@example.com".into(),
                    },
                },
            },
        ];
        let report = report.finish();

        assert_eq!(report.sufficient(), 1);
        assert_eq!(report.granted(), 1);
        assert_eq!(report.would_grant(), 0);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.grants().len(), 1);
        assert_eq!(report.failures()[0].0.raw, "x@example.com");
        assert!(!report.is_clean());
        assert!(report.finished_at >= report.started_at);
    }
}
