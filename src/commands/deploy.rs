//! The deploy flow
//!
//! Resolve the configuration, show the sync command, confirm, then run
//! pre-hooks, the sync command and post-hooks strictly in order. Any
//! failing step aborts the rest of the sequence.

use std::path::Path;

use crate::command::{build_command, render_command_line};
use crate::config::{ConfigWarning, GlobalConfig};
use crate::error::{FerryError, FerryResult};
use crate::exec::{rsync_available, run_shell};
use crate::merge::{merge, EffectiveConfig, RuntimeArgs};
use crate::prompt::Prompter;

/// Run one deploy from the configuration in `dir`.
pub fn cmd_deploy(
    dir: &Path,
    runtime: &RuntimeArgs,
    prompter: &dyn Prompter,
    json: bool,
) -> FerryResult<()> {
    let (global, warnings) = GlobalConfig::load(dir)?;
    print_warnings(&warnings, json);

    let config = merge(runtime, Some(&global), prompter)?;
    let command_line = render_command_line(&build_command(&config));

    if json {
        emit(serde_json::json!({
            "event": "plan",
            "command": command_line,
            "dest": config.dest,
            "delete": config.delete,
            "dry_run": config.dry_run,
            "pre_hooks": config.pre_hooks.len(),
            "post_hooks": config.post_hooks.len(),
        }));
    } else {
        println!("Command: {command_line}");
    }

    // JSON mode is for machines; the confirmation prompt only makes sense
    // on a terminal run.
    if runtime.confirm
        && !json
        && !prompter.confirm("Do you want to execute the above command?", true)?
    {
        return Err(FerryError::Aborted);
    }

    if !rsync_available() {
        return Err(FerryError::SyncToolMissing);
    }

    for hook in &config.pre_hooks {
        run_step("pre-hook", hook, &config, json)?;
    }
    run_step("sync", &command_line, &config, json)?;
    for hook in &config.post_hooks {
        run_step("post-hook", hook, &config, json)?;
    }

    if json {
        emit(serde_json::json!({ "event": "done", "status": "success" }));
    } else {
        println!("Done.");
    }
    Ok(())
}

fn run_step(stage: &str, command: &str, config: &EffectiveConfig, json: bool) -> FerryResult<()> {
    let output = run_shell(command, &config.env)?;

    if json {
        emit(serde_json::json!({
            "event": "exec",
            "stage": stage,
            "command": command,
            "code": output.code,
        }));
    } else {
        if !output.stdout.is_empty() {
            print!("{}", output.stdout);
        }
        if !output.stderr.is_empty() {
            eprint!("{}", output.stderr);
        }
    }
    Ok(())
}

fn print_warnings(warnings: &[ConfigWarning], json: bool) {
    for warning in warnings {
        if json {
            emit(serde_json::json!({
                "event": "warning",
                "key": warning.key,
                "file": warning.file.display().to_string(),
                "line": warning.line,
                "suggestion": warning.suggestion,
            }));
        } else {
            let location = match warning.line {
                Some(line) => format!("{}:{line}", warning.file.display()),
                None => warning.file.display().to_string(),
            };
            match &warning.suggestion {
                Some(suggestion) => eprintln!(
                    "Warning: unknown configuration key '{}' in {location} (did you mean '{suggestion}'?)",
                    warning.key
                ),
                None => eprintln!(
                    "Warning: unknown configuration key '{}' in {location}",
                    warning.key
                ),
            }
        }
    }
}

fn emit(value: serde_json::Value) {
    println!("{value}");
}
