//! `codeownerizer sync`: grant push permission to declared owners that lack it.

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use codeownerizer_core::{
    settings,
    types::{GrantRequest, OwnerKind, RepoRef},
};
use codeownerizer_github::{ClientOptions, GitHubClient};
use codeownerizer_reconcile::{
    pipeline, Access, CancelToken, OwnerOutcome, ReconcileConfig, ReconcileReport,
};

use super::SourceArgs;

/// Arguments for `codeownerizer sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Organization owning the repository. Defaults to GITHUB_REPOSITORY in GitHub Actions.
    #[arg(long)]
    pub org: Option<String>,

    /// Repository name. Defaults to GITHUB_REPOSITORY in GitHub Actions.
    #[arg(long)]
    pub repo: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Decide grants without issuing them.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    /// Exit non-zero when any owner could not be reconciled.
    #[arg(long)]
    pub strict: bool,

    /// REST API root, overriding the settings file.
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,
}

impl SyncArgs {
    pub fn run(self) -> Result<ExitCode> {
        let repo = resolve_repo(self.org.as_deref(), self.repo.as_deref(), |key| {
            std::env::var(key).ok()
        })?;

        let mut settings = settings::load().context("failed to load settings")?;
        if let Some(api_url) = self.api_url.clone() {
            settings.api_url = api_url;
        }

        let token = std::env::var(&settings.token_env)
            .ok()
            .filter(|token| !token.is_empty());
        if token.is_none() {
            tracing::warn!(
                env = %settings.token_env,
                "no API token in environment; requests are unauthenticated"
            );
        }
        let client = GitHubClient::new(ClientOptions::from_settings(&settings, token));

        let source = self.source.owner_source()?;
        let config = ReconcileConfig {
            repo,
            dry_run: self.dry_run,
        };
        let report = pipeline::run(&client, &config, &source, &CancelToken::new())
            .with_context(|| format!("sync of {} failed", config.repo))?;

        if self.json {
            print_json(&report)?;
        } else {
            print_table(&report);
        }

        if self.strict && !report.is_clean() {
            eprintln!(
                "{} {} owner(s) could not be reconciled",
                "error:".red().bold(),
                report.failed()
            );
            return Ok(ExitCode::FAILURE);
        }
        Ok(ExitCode::SUCCESS)
    }
}

// ---------------------------------------------------------------------------
// Repository resolution
// ---------------------------------------------------------------------------

/// Fold `--org`/`--repo` with the GitHub Actions defaults.
///
/// An empty flag counts as missing. `GITHUB_REPOSITORY` is read only when a
/// flag is missing, and only when `CI=true` and `GITHUB_ACTION` is non-empty.
pub fn resolve_repo<F>(org: Option<&str>, repo: Option<&str>, env: F) -> Result<RepoRef>
where
    F: Fn(&str) -> Option<String>,
{
    let org = org.filter(|s| !s.is_empty());
    let repo = repo.filter(|s| !s.is_empty());
    if let (Some(org), Some(repo)) = (org, repo) {
        return Ok(RepoRef::new(org, repo));
    }

    let in_actions = env("CI").as_deref() == Some("true")
        && env("GITHUB_ACTION").is_some_and(|action| !action.is_empty());
    let from_actions = match env("GITHUB_REPOSITORY").filter(|_| in_actions) {
        Some(value) => value
            .parse::<RepoRef>()
            .context("GITHUB_REPOSITORY is not of the form <org>/<repo>")?,
        None => bail!(
            "repository not specified: pass --org and --repo, \
             or run inside GitHub Actions with GITHUB_REPOSITORY set"
        ),
    };

    Ok(RepoRef {
        org: org.map_or(from_actions.org, Into::into),
        repo: repo.map_or(from_actions.repo, Into::into),
    })
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SyncReportJson<'a> {
    repo: String,
    dry_run: bool,
    started_at: String,
    finished_at: String,
    summary: SyncSummaryJson,
    owners: Vec<OwnerJson<'a>>,
}

#[derive(Serialize)]
struct SyncSummaryJson {
    declared: usize,
    unique: usize,
    sufficient: usize,
    granted: usize,
    would_grant: usize,
    failed: usize,
}

#[derive(Serialize)]
struct OwnerJson<'a> {
    owner: &'a str,
    kind: OwnerKind,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    identity: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    before: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    grant: Option<&'a GrantRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorJson>,
}

#[derive(Serialize)]
struct ErrorJson {
    code: &'static str,
    message: String,
}

#[derive(Tabled)]
struct OwnerRow {
    #[tabled(rename = "owner")]
    owner: String,
    #[tabled(rename = "kind")]
    kind: String,
    #[tabled(rename = "result")]
    result: String,
    #[tabled(rename = "detail")]
    detail: String,
}

fn print_json(report: &ReconcileReport) -> Result<()> {
    let payload = SyncReportJson {
        repo: report.repo.to_string(),
        dry_run: report.dry_run,
        started_at: report.started_at.to_rfc3339(),
        finished_at: report.finished_at.to_rfc3339(),
        summary: SyncSummaryJson {
            declared: report.declared,
            unique: report.owners.len(),
            sufficient: report.sufficient(),
            granted: report.granted(),
            would_grant: report.would_grant(),
            failed: report.failed(),
        },
        owners: report
            .owners
            .iter()
            .map(|entry| {
                let mut row = OwnerJson {
                    owner: &entry.owner.raw,
                    kind: entry.owner.kind,
                    outcome: entry.outcome.label(),
                    identity: None,
                    before: None,
                    grant: None,
                    error: None,
                };
                match &entry.outcome {
                    OwnerOutcome::Sufficient { identity } => {
                        row.identity = Some(identity.as_str());
                    }
                    OwnerOutcome::Granted { grant, before }
                    | OwnerOutcome::WouldGrant { grant, before } => {
                        row.identity = Some(grant.identity());
                        row.before = Some(access_key(*before));
                        row.grant = Some(grant);
                    }
                    OwnerOutcome::Failed { failure } => {
                        row.error = Some(ErrorJson {
                            code: failure.code(),
                            message: failure.to_string(),
                        });
                    }
                }
                row
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize sync report")?
    );
    Ok(())
}

fn print_table(report: &ReconcileReport) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    println!(
        "{prefix}codeownerizer v{} | {} | {} owners ({} declared)",
        env!("CARGO_PKG_VERSION"),
        report.repo,
        report.owners.len(),
        report.declared,
    );

    if report.owners.is_empty() {
        println!("No owners declared.");
        return;
    }

    let rows: Vec<OwnerRow> = report
        .owners
        .iter()
        .map(|entry| OwnerRow {
            owner: entry.owner.raw.clone(),
            kind: entry.owner.kind.to_string(),
            result: outcome_marker(&entry.outcome),
            detail: outcome_detail(&entry.outcome),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    let changed = if report.dry_run {
        format!("{} would be granted", report.would_grant())
    } else {
        format!("{} granted", report.granted())
    };
    println!(
        "{prefix}{changed}, {} already sufficient, {} failed",
        report.sufficient(),
        report.failed()
    );
}

fn outcome_marker(outcome: &OwnerOutcome) -> String {
    let label = outcome.label();
    match outcome {
        OwnerOutcome::Sufficient { .. } => label.green().to_string(),
        OwnerOutcome::Granted { .. } => label.cyan().bold().to_string(),
        OwnerOutcome::WouldGrant { .. } => label.yellow().to_string(),
        OwnerOutcome::Failed { .. } => label.red().bold().to_string(),
    }
}

fn outcome_detail(outcome: &OwnerOutcome) -> String {
    match outcome {
        OwnerOutcome::Sufficient { identity } => format!("{identity} already has push"),
        OwnerOutcome::Granted { grant, before } | OwnerOutcome::WouldGrant { grant, before } => {
            format!("{grant} (was {})", access_key(*before))
        }
        OwnerOutcome::Failed { failure } => failure.to_string(),
    }
}

fn access_key(access: Access) -> &'static str {
    match access {
        Access::Write => "write",
        Access::WithoutWrite => "read-only",
        Access::Absent => "absent",
    }
}
