//! Error types for Ferry
//!
//! Uses `thiserror` for library errors; the binary surfaces them through
//! `anyhow` and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Ferry operations
pub type FerryResult<T> = Result<T, FerryError>;

/// Main error type for Ferry operations
#[derive(Error, Debug)]
pub enum FerryError {
    /// The merger was handed no configuration at all
    #[error("Must provide a configuration")]
    MissingConfig,

    /// Neither a destination list nor a global dest is configured
    #[error("Must define a destination")]
    MissingDestination,

    /// Alias lookup or merge produced no usable dest
    #[error("No destination found. Available aliases: {aliases}")]
    NoDestination { aliases: String },

    /// No recognized configuration source in the project directory
    #[error("no deploy configuration found in {dir} - expected deploy.toml or a \"deploy\"/\"rsync\" key in package.json")]
    ConfigNotFound { dir: PathBuf },

    /// A configuration file exists but does not parse
    #[error("invalid configuration in {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// Interactive choice was invalid or unavailable
    #[error("invalid selection: {message}")]
    Selection { message: String },

    /// A hook or the sync command exited non-zero or failed to spawn
    #[error("command exited with {}: {command}", status_label(.code))]
    Exec {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// rsync is not installed or not on PATH
    #[error("rsync does not appear to be installed (rsync --version failed)")]
    SyncToolMissing,

    /// Run aborted at the confirmation prompt
    #[error("deploy aborted by user")]
    Aborted,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn status_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_no_destination() {
        let err = FerryError::NoDestination {
            aliases: "staging,production".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No destination found. Available aliases: staging,production"
        );
    }

    #[test]
    fn test_error_display_missing_config() {
        assert_eq!(
            FerryError::MissingConfig.to_string(),
            "Must provide a configuration"
        );
        assert_eq!(
            FerryError::MissingDestination.to_string(),
            "Must define a destination"
        );
    }

    #[test]
    fn test_error_display_exec_with_code() {
        let err = FerryError::Exec {
            command: "rsync -av ./ host:/srv".to_string(),
            code: Some(23),
            stdout: String::new(),
            stderr: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "command exited with status 23: rsync -av ./ host:/srv"
        );
    }

    #[test]
    fn test_error_display_exec_signal() {
        let err = FerryError::Exec {
            command: "sleep 60".to_string(),
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "command exited with signal: sleep 60");
    }
}
