//! `codeownerizer owners`: offline listing of the declared owners.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use codeownerizer_core::types::{OwnerKind, OwnerRecord};
use codeownerizer_reconcile::{dedupe, pipeline::load_owners};

use super::SourceArgs;

/// Arguments for `codeownerizer owners`.
#[derive(Args, Debug)]
pub struct OwnersArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl OwnersArgs {
    pub fn run(self) -> Result<()> {
        let source = self.source.owner_source()?;
        let declared = load_owners(&source).context("failed to load declared owners")?;
        let unique = dedupe(&declared);
        tracing::debug!(declared = declared.len(), unique = unique.len(), "owners loaded");

        if self.json {
            let payload = OwnersJson {
                declared: declared.len(),
                owners: &unique,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize owners")?
            );
            return Ok(());
        }

        print_table(declared.len(), &unique);
        Ok(())
    }
}

#[derive(Serialize)]
struct OwnersJson<'a> {
    declared: usize,
    owners: &'a [OwnerRecord],
}

#[derive(Tabled)]
struct OwnerRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "owner")]
    owner: String,
    #[tabled(rename = "kind")]
    kind: String,
}

fn print_table(declared: usize, owners: &[OwnerRecord]) {
    println!("{} unique owners ({declared} declared)", owners.len());
    if owners.is_empty() {
        return;
    }

    let rows: Vec<OwnerRow> = owners
        .iter()
        .enumerate()
        .map(|(idx, owner)| OwnerRow {
            index: idx + 1,
            owner: owner.raw.clone(),
            kind: kind_label(owner.kind),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    let unknown = owners
        .iter()
        .filter(|o| o.kind == OwnerKind::Unknown)
        .count();
    if unknown > 0 {
        println!(
            "{} {unknown} owner(s) are not a team, user or email and will be skipped by sync",
            "warning:".yellow().bold()
        );
    }
}

fn kind_label(kind: OwnerKind) -> String {
    match kind {
        OwnerKind::Unknown => kind.to_string().red().to_string(),
        _ => kind.to_string(),
    }
}
