use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// POSIX shells in preference order; the first one present on disk wins.
const POSIX_SHELLS: [&str; 5] = [
    "/bin/zsh",
    "/usr/bin/zsh",
    "/bin/bash",
    "/usr/bin/bash",
    "/bin/sh",
];

/// How child commands reach the operating system. Picked once at startup
/// and injected everywhere a process is spawned, so the dispatch path and
/// the readiness probe always agree on the environment they run in.
#[derive(Debug, Clone, Copy)]
pub enum ShellStrategy {
    /// Login-shell stack (zsh, then bash, then sh) so PATH shims and
    /// version managers from the user's dotfiles are honored.
    Posix,
    /// PowerShell with profile loading off and execution policy bypassed.
    PowerShell,
}

impl ShellStrategy {
    pub fn detect() -> Self {
        if cfg!(windows) {
            ShellStrategy::PowerShell
        } else {
            ShellStrategy::Posix
        }
    }

    /// Synthesized command line: enter `dir`, then run `command`.
    pub fn compose(self, command: &str, dir: &Path) -> String {
        match self {
            ShellStrategy::Posix => format!("cd \"{}\" && {}", dir.display(), command),
            ShellStrategy::PowerShell => {
                format!("Set-Location -LiteralPath \"{}\"; {}", dir.display(), command)
            }
        }
    }

    /// Run `command` in `dir` through the shell and return the child's exit
    /// code unchanged (-1 when the child was killed by a signal).
    pub fn run(self, command: &str, dir: &Path) -> Result<i32> {
        let full = self.compose(command, dir);
        let status = match self {
            ShellStrategy::Posix => match first_shell() {
                Some(sh) => {
                    println!("[run] {full}  [shell={sh}]");
                    Command::new(sh)
                        .args(["-lc", &full])
                        .status()
                        .with_context(|| format!("spawning {sh}"))?
                }
                None => {
                    // No shell on disk at all: exec the split command
                    // directly. Skips dotfile PATH setup and cannot expand
                    // quoting or multiple statements; the built-in commands
                    // carry neither.
                    println!("[run] {full}  [shell=direct]");
                    let argv = split_naive(command);
                    let (prog, args) = argv.split_first().context("empty command")?;
                    Command::new(prog)
                        .args(args)
                        .current_dir(dir)
                        .status()
                        .with_context(|| format!("spawning {prog}"))?
                }
            },
            ShellStrategy::PowerShell => {
                println!("[run] (PS) {full}");
                Command::new("powershell")
                    .args(["-NoProfile", "-ExecutionPolicy", "Bypass", "-Command", &full])
                    .status()
                    .context("spawning powershell")?
            }
        };
        let code = status.code().unwrap_or(-1);
        println!("[run] exit {code}");
        Ok(code)
    }

    /// True when `tool` resolves on PATH inside the same shell environment
    /// `run` will use. A probe that cannot even spawn counts as not found.
    pub fn probe(self, tool: &str) -> bool {
        let status = match self {
            ShellStrategy::Posix => {
                let sh = first_shell().unwrap_or("/bin/sh");
                Command::new(sh)
                    .args(["-lc", &format!("command -v {tool} >/dev/null")])
                    .status()
            }
            ShellStrategy::PowerShell => Command::new("powershell")
                .args([
                    "-NoProfile",
                    "-Command",
                    &format!(
                        "$ErrorActionPreference='SilentlyContinue'; \
                         if (Get-Command {tool}) {{ exit 0 }} else {{ exit 1 }}"
                    ),
                ])
                .status(),
        };
        status.map(|s| s.success()).unwrap_or(false)
    }
}

fn first_shell() -> Option<&'static str> {
    POSIX_SHELLS.iter().copied().find(|sh| Path::new(sh).exists())
}

fn split_naive(command: &str) -> Vec<&str> {
    command.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_posix_command_line() {
        let full = ShellStrategy::Posix.compose("flutter clean", Path::new("/home/me/app"));
        assert_eq!(full, "cd \"/home/me/app\" && flutter clean");
    }

    #[test]
    fn composes_powershell_command_line() {
        let full = ShellStrategy::PowerShell.compose("flutter clean", Path::new("C:\\app"));
        assert_eq!(full, "Set-Location -LiteralPath \"C:\\app\"; flutter clean");
    }

    #[test]
    fn naive_split_is_whitespace_only() {
        assert_eq!(split_naive("flutter pub get"), ["flutter", "pub", "get"]);
        assert_eq!(split_naive("  flutter   clean "), ["flutter", "clean"]);
    }

    #[cfg(unix)]
    #[test]
    fn a_posix_shell_exists() {
        assert!(first_shell().is_some());
    }

    #[cfg(unix)]
    #[test]
    fn probe_resolves_real_tools_only() {
        assert!(ShellStrategy::Posix.probe("sh"));
        assert!(!ShellStrategy::Posix.probe("zzz-no-such-tool"));
    }

    #[cfg(unix)]
    #[test]
    fn run_reports_child_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ShellStrategy::Posix.run("true", dir.path()).unwrap(), 0);
        assert_eq!(ShellStrategy::Posix.run("exit 7", dir.path()).unwrap(), 7);
    }
}
