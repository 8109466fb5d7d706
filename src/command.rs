//! Sync command construction
//!
//! Turns an [`EffectiveConfig`] into the literal rsync argument list and
//! renders it as a single shell line for display and execution.

use crate::merge::EffectiveConfig;

/// The wrapped synchronization tool.
pub const SYNC_TOOL: &str = "rsync";

/// Build the rsync argument list: tool, verbose-archive flag, delete and
/// dry-run flags when set, one `--exclude` per pattern, extra args, source
/// path, destination URI.
pub fn build_command(config: &EffectiveConfig) -> Vec<String> {
    let mut argv = vec![SYNC_TOOL.to_string(), "-av".to_string()];

    if config.delete {
        argv.push("--delete".to_string());
    }
    if config.dry_run {
        argv.push("--dry-run".to_string());
    }
    for pattern in &config.exclude {
        argv.push("--exclude".to_string());
        argv.push(pattern.clone());
    }

    argv.extend(config.args.iter().cloned());
    argv.push(config.src.clone());
    argv.push(config.dest.clone());
    argv
}

/// Render an argument list as one `sh`-ready command line.
pub fn render_command_line(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| shell_quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Single-quote anything that is not a plain word.
fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./~^-_".contains(c));

    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(dest: &str) -> EffectiveConfig {
        EffectiveConfig {
            dest: dest.to_string(),
            src: "./".to_string(),
            args: Vec::new(),
            exclude: Vec::new(),
            delete: false,
            dry_run: false,
            pre_hooks: Vec::new(),
            post_hooks: Vec::new(),
            env: Default::default(),
        }
    }

    #[test]
    fn minimal_command() {
        let argv = build_command(&plan("user@example.com:/srv"));
        assert_eq!(argv, vec!["rsync", "-av", "./", "user@example.com:/srv"]);
    }

    #[test]
    fn flags_precede_excludes_and_paths() {
        let config = EffectiveConfig {
            delete: true,
            dry_run: true,
            exclude: vec![".git*".to_string(), "node_modules".to_string()],
            args: vec!["--checksum".to_string()],
            ..plan("host:/srv")
        };

        let argv = build_command(&config);
        assert_eq!(
            argv,
            vec![
                "rsync",
                "-av",
                "--delete",
                "--dry-run",
                "--exclude",
                ".git*",
                "--exclude",
                "node_modules",
                "--checksum",
                "./",
                "host:/srv",
            ]
        );
    }

    #[test]
    fn render_quotes_patterns_with_metacharacters() {
        let config = EffectiveConfig {
            exclude: vec![".git*".to_string(), "my files".to_string()],
            ..plan("host:/srv")
        };

        let line = render_command_line(&build_command(&config));
        assert_eq!(
            line,
            "rsync -av --exclude '.git*' --exclude 'my files' ./ host:/srv"
        );
    }

    #[test]
    fn render_escapes_single_quotes() {
        assert_eq!(shell_quote("it's"), "'it'\\''s'");
        assert_eq!(shell_quote("plain-word_1.txt"), "plain-word_1.txt");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn destination_uris_stay_unquoted() {
        let line = render_command_line(&build_command(&plan("ssh://user@example.com:~/temp")));
        assert_eq!(line, "rsync -av ./ ssh://user@example.com:~/temp");
    }
}
