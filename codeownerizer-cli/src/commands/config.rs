//! `codeownerizer config`: the settings file at `~/.codeownerizer/config.yaml`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use codeownerizer_core::{settings, Settings};

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the settings file location.
    Path,

    /// Print the effective settings as YAML.
    Show,

    /// Write a settings file with default values.
    Init {
        /// Overwrite an existing settings file.
        #[arg(long)]
        force: bool,
    },
}

pub fn run(command: ConfigCommand) -> Result<()> {
    let home: PathBuf = dirs::home_dir().context("could not determine home directory")?;
    let path = settings::settings_path_at(&home);

    match command {
        ConfigCommand::Path => println!("{}", path.display()),
        ConfigCommand::Show => {
            let settings = settings::load_at(&home).context("failed to load settings")?;
            let yaml = serde_yaml::to_string(&settings).context("failed to serialize settings")?;
            print!("{yaml}");
        }
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            let written = settings::save_at(&home, &Settings::default())
                .context("failed to write settings")?;
            println!("✓ wrote {}", written.display());
        }
    }
    Ok(())
}
