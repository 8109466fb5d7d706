//! Ferry CLI - configuration-driven rsync deployment helper
//!
//! Usage: ferry [OPTIONS]
//!
//! Reads destinations from deploy.toml (or package.json), prompts for the
//! host and deploy mode when not given on the command line, then runs
//! pre-hooks, rsync and post-hooks.

use anyhow::Result;
use clap::Parser;

use ferry::cli::Cli;
use ferry::commands::deploy::cmd_deploy;
use ferry::prompt::TermPrompter;
use ferry::FerryError;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let runtime = cli.runtime_args();

    cmd_deploy(&cli.dir, &runtime, &TermPrompter, cli.json).map_err(|err| {
        // A failed command already produced output worth seeing.
        if let FerryError::Exec { stdout, stderr, .. } = &err {
            if !stdout.is_empty() {
                print!("{stdout}");
            }
            if !stderr.is_empty() {
                eprint!("{stderr}");
            }
        }
        anyhow::Error::from(err)
    })?;

    Ok(())
}
