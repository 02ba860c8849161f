//! codeownerizer: grant push access to every CODEOWNERS-declared owner.
//!
//! # Usage
//!
//! ```text
//! codeownerizer sync [--org <org>] [--repo <repo>] [--root <dir> | --codeowners <file> | --owners-file <file>]
//!                    [--dry-run] [--json] [--strict] [--api-url <url>]
//! codeownerizer owners [--root <dir> | --codeowners <file> | --owners-file <file>] [--json]
//! codeownerizer config path|show|init [--force]
//! ```

mod commands;

use std::process::ExitCode;
use std::sync::OnceLock;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{config::ConfigCommand, owners::OwnersArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "codeownerizer",
    version,
    long_version = long_version(),
    about = "Grant push permission to every owner declared in CODEOWNERS",
    long_about = None,
)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile declared owners against the repository's permissions.
    Sync(SyncArgs),

    /// List the deduplicated declared owners without contacting GitHub.
    Owners(OwnersArgs),

    /// Inspect or create ~/.codeownerizer/config.yaml.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Crate version, plus the build revision when one was baked in.
fn long_version() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| match option_env!("CODEOWNERIZER_REVISION") {
        Some(rev) if !rev.is_empty() => format!("{} (revision {rev})", env!("CARGO_PKG_VERSION")),
        _ => env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Owners(args) => args.run().map(|()| ExitCode::SUCCESS),
        Commands::Config { command } => commands::config::run(command).map(|()| ExitCode::SUCCESS),
    }
}
