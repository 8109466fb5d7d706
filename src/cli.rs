//! CLI argument parsing
//!
//! One flat command; destination and mode come from flags or from the
//! interactive prompts. Boolean options that default to on (`--confirm`,
//! `--prompt`) take an explicit value; `--delete`/`--dry-run` work as bare
//! flags or with a value, and staying silent leaves the decision to the
//! configuration and prompts.

use std::path::PathBuf;

use clap::Parser;

use crate::merge::RuntimeArgs;

/// Ferry - configuration-driven rsync deployment helper
#[derive(Parser, Debug)]
#[command(name = "ferry")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(
    after_help = "Reads destinations from deploy.toml, or from the \"deploy\"/\"rsync\" key in package.json."
)]
pub struct Cli {
    /// Use an aliased destination instead of prompting
    #[arg(short, long)]
    pub alias: Option<String>,

    /// Ask for confirmation before executing the sync command
    #[arg(short = 'f', long, default_value_t = true, action = clap::ArgAction::Set)]
    pub confirm: bool,

    /// Prompt interactively for destination and deploy mode
    #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
    pub prompt: bool,

    /// Delete remote files that do not exist locally
    #[arg(short, long, num_args = 0..=1, default_missing_value = "true")]
    pub delete: Option<bool>,

    /// Build and show the sync command without transferring files
    #[arg(short = 'n', long, num_args = 0..=1, default_missing_value = "true")]
    pub dry_run: Option<bool>,

    /// Machine-readable event output
    #[arg(long)]
    pub json: bool,

    /// Project directory containing the deploy configuration
    #[arg(short = 'C', long = "dir", default_value = ".")]
    pub dir: PathBuf,

    /// Print version
    #[arg(short = 'v', short_alias = 'V', long, action = clap::ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    /// The runtime-argument record consumed by the merger.
    pub fn runtime_args(&self) -> RuntimeArgs {
        RuntimeArgs {
            alias: self.alias.clone(),
            delete: self.delete,
            dry_run: self.dry_run,
            prompt: self.prompt,
            confirm: self.confirm,
        }
    }
}
