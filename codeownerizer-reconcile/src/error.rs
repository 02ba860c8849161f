//! Error types for codeownerizer-reconcile.
//!
//! [`ReconcileError`] ends a run. [`OwnerFailure`] is recorded against a
//! single owner and the run moves on.

use std::fmt;

use thiserror::Error;

use codeownerizer_codeowners::CodeownersError;
use codeownerizer_core::{
    types::{Login, OwnerKind, RepoRef},
    PlatformError,
};

use crate::report::ReconcileReport;

/// Which snapshot listing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Teams,
    Collaborators,
}

impl Listing {
    pub fn as_str(self) -> &'static str {
        match self {
            Listing::Teams => "teams",
            Listing::Collaborators => "collaborators",
        }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort a whole reconciliation run.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The team or collaborator snapshot could not be fetched. No grants were issued.
    #[error("failed to list {what} of {repo}: {source}")]
    Snapshot {
        what: Listing,
        repo: RepoRef,
        #[source]
        source: PlatformError,
    },

    /// The caller cancelled the run between owners.
    #[error("reconciliation of {} cancelled after {} of {} owners", .report.repo, .report.owners.len(), .total)]
    Cancelled {
        total: usize,
        /// Outcomes of the owners processed before cancellation.
        report: Box<ReconcileReport>,
    },

    /// Declared owners could not be loaded.
    #[error("failed to load declared owners: {0}")]
    Owners(#[from] CodeownersError),
}

/// Why a single owner was not reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnerFailure {
    /// The email directory search returned nothing.
    #[error("no account found with email {email}")]
    EmailNotFound { email: String },

    /// The email directory search returned several accounts.
    #[error("{} accounts match email {email}: {}", .candidates.len(), join_logins(.candidates))]
    EmailAmbiguous {
        email: String,
        candidates: Vec<Login>,
    },

    /// The email directory search itself failed.
    #[error("account search failed: {0}")]
    Search(#[source] PlatformError),

    /// The grant call failed.
    #[error("grant failed: {0}")]
    Grant(#[source] PlatformError),

    /// The declaration has a known kind but an unusable shape.
    #[error("malformed {kind} owner: {reason}")]
    Malformed {
        kind: OwnerKind,
        reason: &'static str,
    },

    /// The declaration's kind is not team, user or email.
    #[error("unknown owner kind")]
    UnknownKind,
}

impl OwnerFailure {
    /// Stable machine-readable code, used in JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            OwnerFailure::EmailNotFound { .. } => "email_not_found",
            OwnerFailure::EmailAmbiguous { .. } => "email_ambiguous",
            OwnerFailure::Search(_) => "search_failed",
            OwnerFailure::Grant(_) => "grant_failed",
            OwnerFailure::Malformed { .. } => "malformed",
            OwnerFailure::UnknownKind => "unknown_kind",
        }
    }
}

fn join_logins(logins: &[Login]) -> String {
    logins
        .iter()
        .map(|l| l.0.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
