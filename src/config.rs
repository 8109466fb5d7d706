//! Deploy configuration model and loading
//!
//! Configuration is discovered per project directory, in order:
//! 1. `deploy.toml`
//! 2. `package.json` under the `"deploy"` key, then the `"rsync"` key
//!
//! Fields that accept either a bare string or a list (`args`, `exclude`,
//! `pre_hooks`, `post_hooks`, and `destinations` itself) are normalized to
//! sequences at the serde layer, so downstream code never sees the scalar
//! shape. camelCase spellings (`preHooks`, `dryRun`) are accepted for
//! compatibility with JSON configs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::error::{FerryError, FerryResult};

/// Project-level configuration: global defaults plus the destination list.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GlobalConfig {
    #[serde(default, deserialize_with = "destination_list")]
    pub destinations: Vec<Destination>,

    #[serde(default, deserialize_with = "string_list")]
    pub args: Vec<String>,

    /// Local directory handed to rsync as the transfer source
    #[serde(default = "default_src")]
    pub src: String,

    /// Fallback sync target when no destination provides one
    #[serde(default)]
    pub dest: Option<String>,

    #[serde(default, deserialize_with = "string_list")]
    pub exclude: Vec<String>,

    /// Extra environment entries for hook execution
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    #[serde(default, alias = "preHooks", deserialize_with = "string_list")]
    pub pre_hooks: Vec<String>,

    #[serde(default, alias = "postHooks", deserialize_with = "string_list")]
    pub post_hooks: Vec<String>,

    #[serde(default)]
    pub delete: Option<bool>,

    #[serde(default, alias = "dryRun")]
    pub dry_run: Option<bool>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            destinations: Vec::new(),
            args: Vec::new(),
            src: default_src(),
            dest: None,
            exclude: Vec::new(),
            env: BTreeMap::new(),
            pre_hooks: Vec::new(),
            post_hooks: Vec::new(),
            delete: None,
            dry_run: None,
        }
    }
}

/// One named, aliasable sync target with per-destination overrides.
///
/// `dest` is optional here; the merged configuration is what guarantees a
/// destination in the end.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Destination {
    #[serde(default)]
    pub alias: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub dest: Option<String>,

    #[serde(default)]
    pub src: Option<String>,

    #[serde(default, deserialize_with = "opt_string_list")]
    pub args: Option<Vec<String>>,

    #[serde(default, deserialize_with = "opt_string_list")]
    pub exclude: Option<Vec<String>>,

    #[serde(default)]
    pub env: BTreeMap<String, String>,

    #[serde(default, alias = "preHooks", deserialize_with = "string_list")]
    pub pre_hooks: Vec<String>,

    #[serde(default, alias = "postHooks", deserialize_with = "string_list")]
    pub post_hooks: Vec<String>,

    #[serde(default)]
    pub delete: Option<bool>,

    #[serde(default, alias = "dryRun")]
    pub dry_run: Option<bool>,
}

fn default_src() -> String {
    "./".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum StringList {
    One(String),
    Many(Vec<String>),
}

impl StringList {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(s) => vec![s],
            Self::Many(v) => v,
        }
    }
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StringList::deserialize(deserializer)?.into_vec())
}

fn opt_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(StringList::deserialize(deserializer)?.into_vec()))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum DestinationListDe {
    One(Destination),
    Many(Vec<Destination>),
}

fn destination_list<'de, D>(deserializer: D) -> Result<Vec<Destination>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match DestinationListDe::deserialize(deserializer)? {
        DestinationListDe::One(d) => vec![d],
        DestinationListDe::Many(v) => v,
    })
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl GlobalConfig {
    /// Locate and load the deploy configuration for a project directory.
    ///
    /// Returns the parsed configuration plus any unknown-key warnings.
    pub fn load(dir: &Path) -> FerryResult<(Self, Vec<ConfigWarning>)> {
        let toml_path = dir.join("deploy.toml");
        if toml_path.exists() {
            return Self::from_toml(&toml_path);
        }

        let pkg_path = dir.join("package.json");
        if pkg_path.exists() {
            if let Some(loaded) = Self::from_package_json(&pkg_path)? {
                return Ok(loaded);
            }
        }

        Err(FerryError::ConfigNotFound {
            dir: dir.to_path_buf(),
        })
    }

    fn from_toml(path: &Path) -> FerryResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Self = serde_ignored::deserialize(deserializer, |path| {
            unknown_paths.push(path.to_string());
        })
        .map_err(|e| FerryError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok((config, warnings_for(&unknown_paths, path, &content)))
    }

    /// Legacy configs live under package.json's `rsync` key; `deploy` is
    /// the preferred spelling and checked first.
    fn from_package_json(path: &Path) -> FerryResult<Option<(Self, Vec<ConfigWarning>)>> {
        let content = fs::read_to_string(path)?;

        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| FerryError::InvalidConfig {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let Some(section) = value.get("deploy").or_else(|| value.get("rsync")) else {
            return Ok(None);
        };

        let mut unknown_paths: Vec<String> = Vec::new();
        let config: Self = serde_ignored::deserialize(section.clone(), |path| {
            unknown_paths.push(path.to_string());
        })
        .map_err(|e: serde_json::Error| FerryError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Some((config, warnings_for(&unknown_paths, path, &content))))
    }

    /// Aliases of all configured destinations, in declaration order.
    pub fn aliases(&self) -> Vec<&str> {
        self.destinations
            .iter()
            .filter_map(|d| d.alias.as_deref())
            .collect()
    }
}

fn warnings_for(unknown_paths: &[String], file: &Path, content: &str) -> Vec<ConfigWarning> {
    unknown_paths
        .iter()
        .map(|path_str| {
            let key = path_str
                .rsplit('.')
                .next()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: file.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect()
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "destinations",
        "args",
        "src",
        "dest",
        "exclude",
        "env",
        "pre_hooks",
        "preHooks",
        "post_hooks",
        "postHooks",
        "delete",
        "dry_run",
        "dryRun",
        "alias",
        "name",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] = std::cmp::min(
                std::cmp::min(prev[j + 1] + 1, curr[j] + 1),
                prev[j] + cost,
            );
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
