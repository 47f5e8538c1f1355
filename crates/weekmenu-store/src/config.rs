use std::env;
use std::path::{Path, PathBuf};

/// Recording log configuration.
///
/// Reads from the `WEEKMENU_LOG` environment variable, falling back to
/// `recorded_menus.json` in the working directory when unset.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Path of the JSON log file.
    pub path: PathBuf,
}

impl LogConfig {
    /// The default log path used when no environment variable is set.
    pub const DEFAULT_PATH: &str = "recorded_menus.json";

    /// Environment variable consulted by [`LogConfig::from_env`].
    pub const ENV_VAR: &str = "WEEKMENU_LOG";

    /// Build a config from the environment.
    ///
    /// Priority: `WEEKMENU_LOG` env var, then the compile-time default.
    pub fn from_env() -> Self {
        let path = env::var_os(Self::ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_PATH));
        Self { path }
    }

    /// Build a config from an explicit path (useful for tests and CLI flags).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Directory that holds the log. A bare file name resolves to `.`.
    pub fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Sidecar file used to serialise concurrent writers.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| Self::DEFAULT_PATH.into());
        name.push(".lock");
        self.directory().join(name)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
