use crate::config::DaemonConfig;
use crate::error::DaemonError;
use crate::shell::ShellStrategy;
use crate::tokens::CommandTable;

/// Pre-flight validation: refuse to start listening when every dispatch
/// would be guaranteed to fail. Runs before any serial port is opened.
pub fn verify(
    cfg: &DaemonConfig,
    table: &CommandTable,
    shell: ShellStrategy,
) -> Result<(), DaemonError> {
    if !cfg.project_dir.exists() {
        return Err(DaemonError::ProjectDirMissing(cfg.project_dir.clone()));
    }
    if !shell.probe(table.tool()) {
        return Err(DaemonError::ToolMissing(table.tool().to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn cfg(project_dir: PathBuf) -> DaemonConfig {
        DaemonConfig {
            project_dir,
            baud: 115_200,
            port: None,
        }
    }

    #[test]
    fn missing_project_dir_fails_first() {
        let err = verify(
            &cfg(PathBuf::from("/definitely/not/here")),
            &CommandTable::flutter(),
            ShellStrategy::detect(),
        )
        .unwrap_err();
        assert!(matches!(err, DaemonError::ProjectDirMissing(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn unresolvable_tool_fails_with_127() {
        let dir = tempfile::tempdir().unwrap();
        let table = CommandTable::new("zzz-no-such-tool clean", "x", "y");
        let err = verify(&cfg(dir.path().into()), &table, ShellStrategy::Posix).unwrap_err();
        assert!(matches!(err, DaemonError::ToolMissing(_)));
        assert_eq!(err.exit_code(), 127);
    }

    #[cfg(unix)]
    #[test]
    fn resolvable_tool_passes() {
        let dir = tempfile::tempdir().unwrap();
        let table = CommandTable::new("sh -c true", "sh -c true", "sh -c true");
        assert!(verify(&cfg(dir.path().into()), &table, ShellStrategy::Posix).is_ok());
    }
}
