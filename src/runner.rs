use anyhow::Result;
use std::path::Path;

use crate::shell::ShellStrategy;

/// Execute one mapped command against the project directory.
///
/// A missing directory is a configuration problem: reported without
/// spawning anything, with a sentinel that mirrors a failed child.
pub fn run(command: &str, dir: &Path, shell: ShellStrategy) -> Result<i32> {
    if !dir.exists() {
        println!("[run] warning: project directory not found: {}", dir.display());
        return Ok(1);
    }
    shell.run(command, dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_a_sentinel_not_a_spawn() {
        let code = run("true", Path::new("/definitely/not/here"), ShellStrategy::detect());
        assert_eq!(code.unwrap(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn existing_directory_runs_the_command() {
        let dir = tempfile::tempdir().unwrap();
        let code = run("true", dir.path(), ShellStrategy::Posix);
        assert_eq!(code.unwrap(), 0);
    }
}
