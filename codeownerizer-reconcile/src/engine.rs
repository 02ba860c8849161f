//! Reconciliation engine.
//!
//! ## Run protocol
//!
//! 1. Deduplicate the declared owners (first occurrence wins).
//! 2. Fetch the full team and collaborator snapshot. Failure aborts the run.
//! 3. For each owner: check cancellation, resolve, inspect against the
//!    snapshot, grant push if absent or under-permissioned.
//! 4. Return the report, however many owners failed.
//!
//! The snapshot from step 2 is never updated by grants issued in step 3:
//! every owner is judged against the state the run started from. Owners are
//! distinct after step 1, so no later owner depends on an earlier grant.

use codeownerizer_core::{
    types::{GrantRequest, OwnerRecord, RepoRef, Snapshot},
    PlatformApi,
};

use crate::cancel::CancelToken;
use crate::dedupe::dedupe;
use crate::error::{OwnerFailure, ReconcileError};
use crate::inspect::{team_access, user_access, Access};
use crate::report::{OwnerOutcome, OwnerReport, ReconcileReport};
use crate::resolve::{resolve, Identity};

/// Everything a run needs besides the owners and the platform client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileConfig {
    pub repo: RepoRef,
    /// Decide grants without issuing them.
    pub dry_run: bool,
}

impl ReconcileConfig {
    pub fn new(repo: RepoRef) -> Self {
        Self {
            repo,
            dry_run: false,
        }
    }
}

/// Grant push permission to every declared owner that lacks it.
///
/// Returns `Err` only for a failed snapshot fetch or a cancellation; per-owner
/// failures are logged and recorded in the report.
pub fn reconcile<P: PlatformApi>(
    api: &P,
    config: &ReconcileConfig,
    owners: &[OwnerRecord],
    cancel: &CancelToken,
) -> Result<ReconcileReport, ReconcileError> {
    let unique = dedupe(owners);
    let mut report = ReconcileReport::begin(config.repo.clone(), config.dry_run, owners.len());
    tracing::info!(
        repo = %config.repo,
        declared = owners.len(),
        unique = unique.len(),
        dry_run = config.dry_run,
        "reconciling declared owners"
    );

    let snapshot = crate::snapshot::fetch_snapshot(api, &config.repo)?;

    for owner in &unique {
        if cancel.is_cancelled() {
            tracing::warn!(
                repo = %config.repo,
                processed = report.owners.len(),
                total = unique.len(),
                "reconciliation cancelled"
            );
            return Err(ReconcileError::Cancelled {
                total: unique.len(),
                report: Box::new(report.finish()),
            });
        }

        let outcome = reconcile_owner(api, config, &snapshot, owner);
        log_outcome(owner, &outcome);
        report.owners.push(OwnerReport {
            owner: owner.clone(),
            outcome,
        });
    }

    let report = report.finish();
    tracing::info!(
        repo = %config.repo,
        sufficient = report.sufficient(),
        granted = report.granted(),
        would_grant = report.would_grant(),
        failed = report.failed(),
        "reconciliation finished"
    );
    Ok(report)
}

/// Resolve → inspect → (maybe) grant, for one owner.
pub(crate) fn reconcile_owner<P: PlatformApi>(
    api: &P,
    config: &ReconcileConfig,
    snapshot: &Snapshot,
    owner: &OwnerRecord,
) -> OwnerOutcome {
    let identity = match resolve(api, owner) {
        Ok(identity) => identity,
        Err(failure) => return OwnerOutcome::Failed { failure },
    };

    let (grant, before) = match identity {
        Identity::Team(slug) => {
            let before = team_access(&snapshot.teams, &slug);
            if !before.needs_grant() {
                return OwnerOutcome::Sufficient { identity: slug.0 };
            }
            let grant = GrantRequest::Team {
                org: config.repo.org.clone(),
                slug,
                repo: config.repo.clone(),
            };
            (grant, before)
        }
        Identity::User(login) => {
            let before = user_access(&snapshot.collaborators, &login);
            if !before.needs_grant() {
                return OwnerOutcome::Sufficient { identity: login.0 };
            }
            let grant = GrantRequest::User {
                repo: config.repo.clone(),
                login,
            };
            (grant, before)
        }
    };

    if config.dry_run {
        return OwnerOutcome::WouldGrant { grant, before };
    }

    match issue(api, &grant) {
        Ok(()) => OwnerOutcome::Granted { grant, before },
        Err(failure) => OwnerOutcome::Failed { failure },
    }
}

fn issue<P: PlatformApi>(api: &P, grant: &GrantRequest) -> Result<(), OwnerFailure> {
    let result = match grant {
        GrantRequest::Team { org, slug, repo } => api.grant_team(org, slug, repo),
        GrantRequest::User { repo, login } => api.grant_user(repo, login),
    };
    result.map_err(OwnerFailure::Grant)
}

fn log_outcome(owner: &OwnerRecord, outcome: &OwnerOutcome) {
    match outcome {
        OwnerOutcome::Sufficient { identity } => {
            tracing::debug!(owner = %owner, identity = %identity, "already has push permission");
        }
        OwnerOutcome::Granted { grant, before } => {
            tracing::info!(owner = %owner, grant = %grant, before = ?before, "granted push permission");
        }
        OwnerOutcome::WouldGrant { grant, before } => {
            tracing::info!(owner = %owner, grant = %grant, before = ?before, "[dry-run] would grant push permission");
        }
        OwnerOutcome::Failed { failure } => {
            tracing::warn!(owner = %owner, kind = %owner.kind, reason = %failure, "owner not reconciled");
        }
    }
}
