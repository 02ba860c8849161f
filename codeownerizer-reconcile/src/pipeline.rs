//! Shared reconciliation entrypoint: load declared owners, then reconcile.

use std::path::PathBuf;

use codeownerizer_codeowners::{
    load_file, load_from_standard_location, load_owner_list, CodeownersError,
};
use codeownerizer_core::{types::OwnerRecord, PlatformApi};

use crate::cancel::CancelToken;
use crate::engine::{reconcile, ReconcileConfig};
use crate::error::ReconcileError;
use crate::report::ReconcileReport;

/// Where declared owners come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerSource {
    /// A checkout root; CODEOWNERS is looked up in the standard locations.
    Root(PathBuf),
    /// An explicit CODEOWNERS file.
    Codeowners(PathBuf),
    /// An explicit `[{kind, raw}]` owner list (JSON or YAML).
    OwnerList(PathBuf),
}

/// Load declared owners, in declaration order, duplicates included.
pub fn load_owners(source: &OwnerSource) -> Result<Vec<OwnerRecord>, CodeownersError> {
    match source {
        OwnerSource::Root(root) => Ok(load_from_standard_location(root)?.owners()),
        OwnerSource::Codeowners(path) => Ok(load_file(path)?.owners()),
        OwnerSource::OwnerList(path) => load_owner_list(path),
    }
}

/// Load owners from `source` and reconcile them against `config.repo`.
pub fn run<P: PlatformApi>(
    api: &P,
    config: &ReconcileConfig,
    source: &OwnerSource,
    cancel: &CancelToken,
) -> Result<ReconcileReport, ReconcileError> {
    let owners = load_owners(source)?;
    tracing::debug!(source = ?source, owners = owners.len(), "declared owners loaded");
    reconcile(api, config, &owners, cancel)
}
