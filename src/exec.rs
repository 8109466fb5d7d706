//! Shell execution of hooks and the sync command
//!
//! Both run the same way: `sh -c <line>` with the resolved deploy
//! environment overlaid on the parent environment, output captured and
//! reported when the command finishes. stdin stays attached so ssh can
//! still ask for a password.

use std::collections::BTreeMap;
use std::process::{Command, Stdio};

use crate::error::{FerryError, FerryResult};

/// Captured result of a completed shell command.
#[derive(Debug)]
pub struct ShellOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run one command line through `sh -c`.
///
/// Non-zero exit (or failure to spawn) is an error carrying the exit code
/// and whatever output was captured.
pub fn run_shell(command_line: &str, env: &BTreeMap<String, String>) -> FerryResult<ShellOutput> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command_line)
        .envs(env)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| FerryError::Exec {
            command: command_line.to_string(),
            code: None,
            stdout: String::new(),
            stderr: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(FerryError::Exec {
            command: command_line.to_string(),
            code: output.status.code(),
            stdout,
            stderr,
        });
    }

    Ok(ShellOutput {
        code: output.status.code().unwrap_or(0),
        stdout,
        stderr,
    })
}

/// Check that rsync is installed and on PATH.
pub fn rsync_available() -> bool {
    Command::new("rsync")
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_env() -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    #[test]
    fn captures_stdout_of_successful_command() {
        let output = run_shell("echo hello", &empty_env()).unwrap();
        assert_eq!(output.code, 0);
        assert_eq!(output.stdout, "hello\n");
        assert_eq!(output.stderr, "");
    }

    #[test]
    fn nonzero_exit_is_an_error_with_code() {
        let err = run_shell("exit 3", &empty_env()).unwrap_err();
        match err {
            FerryError::Exec { code, command, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(command, "exit 3");
            }
            other => panic!("expected Exec error, got {other:?}"),
        }
    }

    #[test]
    fn failed_command_keeps_captured_output() {
        let err = run_shell("echo partial; echo oops >&2; false", &empty_env()).unwrap_err();
        match err {
            FerryError::Exec { stdout, stderr, .. } => {
                assert_eq!(stdout, "partial\n");
                assert_eq!(stderr, "oops\n");
            }
            other => panic!("expected Exec error, got {other:?}"),
        }
    }

    #[test]
    fn env_entries_reach_the_child() {
        let env: BTreeMap<String, String> =
            [("DEPLOY_DEST_HOST".to_string(), "example.com".to_string())]
                .into_iter()
                .collect();

        let output = run_shell("printf '%s' \"$DEPLOY_DEST_HOST\"", &env).unwrap();
        assert_eq!(output.stdout, "example.com");
    }

    #[test]
    fn rsync_available_does_not_panic() {
        let _ = rsync_available();
    }
}
