pub mod config;
pub mod owners;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use codeownerizer_reconcile::OwnerSource;

/// Where to read declared owners from. At most one may be given; the default
/// is the standard CODEOWNERS locations under the current directory.
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct SourceArgs {
    /// Repository checkout to search for CODEOWNERS.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Explicit CODEOWNERS file.
    #[arg(long, value_name = "FILE")]
    pub codeowners: Option<PathBuf>,

    /// Owner list file (`[{kind, raw}]`, JSON or YAML).
    #[arg(long, value_name = "FILE")]
    pub owners_file: Option<PathBuf>,
}

impl SourceArgs {
    pub fn owner_source(&self) -> Result<OwnerSource> {
        if let Some(path) = &self.codeowners {
            return Ok(OwnerSource::Codeowners(path.clone()));
        }
        if let Some(path) = &self.owners_file {
            return Ok(OwnerSource::OwnerList(path.clone()));
        }
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("could not determine current directory")?,
        };
        Ok(OwnerSource::Root(root))
    }
}
