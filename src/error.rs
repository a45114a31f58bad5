use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions; each maps to its own process exit status. Malformed
/// tokens and decode noise are handled inside the dispatch loop and never
/// reach this type.
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("project directory not found: {}", .0.display())]
    ProjectDirMissing(PathBuf),
    #[error("'{0}' not found in your shell PATH; open a terminal and verify '{0} --version'")]
    ToolMissing(String),
    #[error("no serial ports found")]
    NoPorts,
    #[error("serial error: {0:#}")]
    Fatal(#[from] anyhow::Error),
}

impl DaemonError {
    pub fn exit_code(&self) -> i32 {
        match self {
            DaemonError::ProjectDirMissing(_) => 1,
            DaemonError::ToolMissing(_) => 127,
            DaemonError::NoPorts => 2,
            DaemonError::Fatal(_) => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_condition() {
        assert_eq!(DaemonError::ProjectDirMissing("/x".into()).exit_code(), 1);
        assert_eq!(DaemonError::ToolMissing("flutter".into()).exit_code(), 127);
        assert_eq!(DaemonError::NoPorts.exit_code(), 2);
        assert_eq!(DaemonError::Fatal(anyhow::anyhow!("boom")).exit_code(), 3);
    }
}
