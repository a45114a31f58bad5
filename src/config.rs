use std::path::PathBuf;

use crate::cli::ListenOpts;

/// Resolved once at startup and handed by reference into every component;
/// nothing reads the environment after this point.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub project_dir: PathBuf,
    pub baud: u32,
    /// Explicit device path; `None` triggers auto-selection.
    pub port: Option<String>,
}

impl DaemonConfig {
    pub fn from_opts(opts: ListenOpts) -> Self {
        Self {
            project_dir: opts.project.unwrap_or_else(default_project_dir),
            baud: opts.baud,
            // An empty FLUTTER_KEYS_PORT means "pick one for me".
            port: opts.port.filter(|p| !p.is_empty()),
        }
    }
}

fn default_project_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dev/my_flutter_app")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(project: Option<&str>, port: Option<&str>) -> ListenOpts {
        ListenOpts {
            project: project.map(PathBuf::from),
            baud: 115_200,
            port: port.map(String::from),
        }
    }

    #[test]
    fn empty_port_means_auto_select() {
        let cfg = DaemonConfig::from_opts(opts(Some("/tmp/app"), Some("")));
        assert_eq!(cfg.port, None);
    }

    #[test]
    fn explicit_port_is_kept() {
        let cfg = DaemonConfig::from_opts(opts(Some("/tmp/app"), Some("/dev/ttyACM0")));
        assert_eq!(cfg.port.as_deref(), Some("/dev/ttyACM0"));
    }

    #[test]
    fn project_defaults_under_home() {
        let cfg = DaemonConfig::from_opts(opts(None, None));
        assert!(cfg.project_dir.ends_with("dev/my_flutter_app"));
    }
}
