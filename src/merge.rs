//! Configuration merging
//!
//! `merge` folds the runtime arguments, the global configuration and the
//! selected destination into one validated deploy plan. Precedence, later
//! wins: interactive answers, then global config fields, then destination
//! overrides, then explicit CLI flags. Hooks and env are concatenated and
//! overlaid rather than replaced.

use crate::config::{Destination, GlobalConfig};
use crate::env::{derive_env, ResolvedEnv};
use crate::error::{FerryError, FerryResult};
use crate::hooks::resolve_hooks;
use crate::prompt::Prompter;

/// Runtime arguments, produced once at the CLI boundary and never
/// re-parsed downstream.
#[derive(Debug, Clone)]
pub struct RuntimeArgs {
    pub alias: Option<String>,
    pub delete: Option<bool>,
    pub dry_run: Option<bool>,
    pub prompt: bool,
    pub confirm: bool,
}

impl Default for RuntimeArgs {
    fn default() -> Self {
        Self {
            alias: None,
            delete: None,
            dry_run: None,
            prompt: true,
            confirm: true,
        }
    }
}

/// The merged, validated deploy plan. Immutable once produced; `dest` is
/// guaranteed non-empty and every list field is a real list.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub dest: String,
    pub src: String,
    pub args: Vec<String>,
    pub exclude: Vec<String>,
    pub delete: bool,
    pub dry_run: bool,
    pub pre_hooks: Vec<String>,
    pub post_hooks: Vec<String>,
    pub env: ResolvedEnv,
}

/// Answers from the deploy-mode prompt. Unanswered flags stay `None` so
/// config scopes can still claim them.
#[derive(Debug, Clone, Copy, Default)]
struct ModeAnswer {
    delete: Option<bool>,
    dry_run: Option<bool>,
}

const MODE_LABELS: [&str; 4] = [
    "Normal (--dry-run)",
    "Normal",
    "Delete (--delete --dry-run)",
    "Delete (--delete)",
];

/// Resolve runtime arguments and a loaded configuration into an
/// [`EffectiveConfig`].
///
/// Destination selection and the deploy-mode question are delegated to the
/// prompt collaborator; with `prompt` disabled both are skipped and an
/// unresolvable destination is an error rather than a question.
pub fn merge(
    runtime: &RuntimeArgs,
    config: Option<&GlobalConfig>,
    prompter: &dyn Prompter,
) -> FerryResult<EffectiveConfig> {
    let global = config.ok_or(FerryError::MissingConfig)?;

    if global.destinations.is_empty() && global.dest.is_none() {
        return Err(FerryError::MissingDestination);
    }

    let destination = match &runtime.alias {
        Some(alias) => lookup_alias(&global.destinations, alias),
        None if runtime.prompt => select_destination(&global.destinations, prompter)?,
        None => Destination::default(),
    };

    let (pre_hooks, post_hooks) = resolve_hooks(global, &destination);

    let answers = if runtime.prompt {
        ask_mode(prompter)?
    } else {
        ModeAnswer::default()
    };

    // Overlay, field by field: answers, then global, then destination.
    let mut delete = answers.delete;
    let mut dry_run = answers.dry_run;
    let mut src = Some(global.src.clone());
    let mut dest = global.dest.clone();
    let mut args = Some(global.args.clone());
    let mut exclude = Some(global.exclude.clone());

    if global.delete.is_some() {
        delete = global.delete;
    }
    if global.dry_run.is_some() {
        dry_run = global.dry_run;
    }

    if destination.delete.is_some() {
        delete = destination.delete;
    }
    if destination.dry_run.is_some() {
        dry_run = destination.dry_run;
    }
    if destination.src.is_some() {
        src = destination.src.clone();
    }
    if destination.dest.is_some() {
        dest = destination.dest.clone();
    }
    if destination.args.is_some() {
        args = destination.args.clone();
    }
    if destination.exclude.is_some() {
        exclude = destination.exclude.clone();
    }

    let dest = match dest {
        Some(d) if !d.is_empty() => d,
        _ => {
            return Err(FerryError::NoDestination {
                aliases: global.aliases().join(","),
            })
        }
    };

    let env = derive_env(global, &destination, &dest);

    // Explicit CLI flags win over everything resolved above.
    if runtime.delete.is_some() {
        delete = runtime.delete;
    }
    if runtime.dry_run.is_some() {
        dry_run = runtime.dry_run;
    }

    Ok(EffectiveConfig {
        dest,
        src: src.unwrap_or_else(|| "./".to_string()),
        args: args.unwrap_or_default(),
        exclude: exclude.unwrap_or_default(),
        delete: delete.unwrap_or(false),
        dry_run: dry_run.unwrap_or(false),
        pre_hooks,
        post_hooks,
        env,
    })
}

/// An unknown alias resolves to an empty placeholder; the missing `dest`
/// is reported afterwards together with the list of valid aliases.
fn lookup_alias(destinations: &[Destination], alias: &str) -> Destination {
    destinations
        .iter()
        .find(|d| d.alias.as_deref() == Some(alias))
        .cloned()
        .unwrap_or_default()
}

fn select_destination(
    destinations: &[Destination],
    prompter: &dyn Prompter,
) -> FerryResult<Destination> {
    if destinations.len() <= 1 {
        return Ok(destinations.first().cloned().unwrap_or_default());
    }

    let labels: Vec<String> = destinations.iter().map(destination_label).collect();
    let index = prompter.choose("Which host do you want to deploy to?", &labels)?;

    destinations
        .get(index)
        .cloned()
        .ok_or_else(|| FerryError::Selection {
            message: format!(
                "destination {} is out of range (1-{})",
                index + 1,
                destinations.len()
            ),
        })
}

fn destination_label(destination: &Destination) -> String {
    destination
        .name
        .clone()
        .or_else(|| destination.alias.clone())
        .or_else(|| destination.dest.clone())
        .unwrap_or_else(|| "(unnamed)".to_string())
}

fn ask_mode(prompter: &dyn Prompter) -> FerryResult<ModeAnswer> {
    let labels: Vec<String> = MODE_LABELS.iter().map(|s| s.to_string()).collect();

    match prompter.choose("How would you like to deploy?", &labels)? {
        0 => Ok(ModeAnswer {
            dry_run: Some(true),
            ..ModeAnswer::default()
        }),
        1 => Ok(ModeAnswer::default()),
        2 => Ok(ModeAnswer {
            delete: Some(true),
            dry_run: Some(true),
        }),
        3 => Ok(ModeAnswer {
            delete: Some(true),
            ..ModeAnswer::default()
        }),
        other => Err(FerryError::Selection {
            message: format!("deploy mode {} is out of range (1-4)", other + 1),
        }),
    }
}
