//! Configuration file management for weekmenu.
//!
//! Provides a TOML-based config file at `~/.config/weekmenu/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use weekmenu_store::config::LogConfig;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub catalog: CatalogSection,
    pub log: LogSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogSection {
    /// Recipe catalog file (`.json` or `.toml`).
    pub path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogSection {
    /// Recorded-menus log file.
    pub path: PathBuf,
}

/// Catalog path used when nothing else is configured.
pub const DEFAULT_CATALOG_PATH: &str = "recipes.json";

/// Environment variable naming the catalog file.
pub const CATALOG_ENV_VAR: &str = "WEEKMENU_CATALOG";

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the weekmenu config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/weekmenu` or `~/.config/weekmenu`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("weekmenu");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("weekmenu")
}

/// Return the path to the weekmenu config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file at `path`.
pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file to `path`, creating parent dirs as
/// needed.
pub fn save_config_to(config: &ConfigFile, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

/// Write the config file to its default location.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    save_config_to(config, &config_path())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct WeekmenuConfig {
    pub catalog_path: PathBuf,
    pub log_config: LogConfig,
}

impl WeekmenuConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Catalog: `cli_catalog` > `WEEKMENU_CATALOG` env > `catalog.path` > `recipes.json`
    /// - Log: `cli_log` > `WEEKMENU_LOG` env > `log.path` > `LogConfig::DEFAULT_PATH`
    ///
    /// A missing config file is not an error; an unreadable or malformed one is.
    pub fn resolve(cli_catalog: Option<&Path>, cli_log: Option<&Path>) -> Result<Self> {
        let path = config_path();
        let file_config = if path.exists() {
            Some(load_config_from(&path)?)
        } else {
            None
        };

        let catalog_path = if let Some(p) = cli_catalog {
            p.to_path_buf()
        } else if let Some(p) = std::env::var_os(CATALOG_ENV_VAR) {
            PathBuf::from(p)
        } else if let Some(ref cfg) = file_config {
            cfg.catalog.path.clone()
        } else {
            PathBuf::from(DEFAULT_CATALOG_PATH)
        };

        let log_config = if let Some(p) = cli_log {
            LogConfig::new(p)
        } else if std::env::var_os(LogConfig::ENV_VAR).is_some() {
            LogConfig::from_env()
        } else if let Some(ref cfg) = file_config {
            LogConfig::new(&cfg.log.path)
        } else {
            LogConfig::new(LogConfig::DEFAULT_PATH)
        };

        Ok(Self {
            catalog_path,
            log_config,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        crate::test_util::lock_env()
    }

    /// Point XDG_CONFIG_HOME at a fresh temp dir for the duration of `f`.
    fn with_config_home<T>(f: impl FnOnce(&Path) -> T) -> T {
        let tmp = tempfile::TempDir::new().unwrap();
        let orig_xdg = std::env::var_os("XDG_CONFIG_HOME");
        unsafe { std::env::set_var("XDG_CONFIG_HOME", tmp.path()) };

        let result = f(tmp.path());

        match orig_xdg {
            Some(x) => unsafe { std::env::set_var("XDG_CONFIG_HOME", x) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }
        result
    }

    fn clear_env() {
        unsafe { std::env::remove_var(CATALOG_ENV_VAR) };
        unsafe { std::env::remove_var(LogConfig::ENV_VAR) };
    }

    #[test]
    fn save_and_load_config_roundtrip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("weekmenu").join("config.toml");

        let original = ConfigFile {
            catalog: CatalogSection {
                path: PathBuf::from("/srv/kitchen/recipes.toml"),
            },
            log: LogSection {
                path: PathBuf::from("/srv/kitchen/menus.json"),
            },
        };
        save_config_to(&original, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.catalog.path, original.catalog.path);
        assert_eq!(loaded.log.path, original.log.path);
    }

    #[test]
    fn resolve_defaults_when_nothing_set() {
        let _lock = lock_env();
        clear_env();

        let config = with_config_home(|_| WeekmenuConfig::resolve(None, None).unwrap());
        assert_eq!(config.catalog_path, PathBuf::from(DEFAULT_CATALOG_PATH));
        assert_eq!(config.log_config.path, PathBuf::from(LogConfig::DEFAULT_PATH));
    }

    #[test]
    fn resolve_with_cli_flag_overrides_all() {
        let _lock = lock_env();
        unsafe { std::env::set_var(CATALOG_ENV_VAR, "/env/recipes.json") };
        unsafe { std::env::set_var(LogConfig::ENV_VAR, "/env/menus.json") };

        let config = with_config_home(|_| {
            WeekmenuConfig::resolve(
                Some(Path::new("/cli/recipes.json")),
                Some(Path::new("/cli/menus.json")),
            )
            .unwrap()
        });
        assert_eq!(config.catalog_path, PathBuf::from("/cli/recipes.json"));
        assert_eq!(config.log_config.path, PathBuf::from("/cli/menus.json"));

        clear_env();
    }

    #[test]
    fn resolve_with_env_var_overrides_config_file() {
        let _lock = lock_env();
        clear_env();

        let config = with_config_home(|home| {
            let file = ConfigFile {
                catalog: CatalogSection {
                    path: PathBuf::from("/file/recipes.json"),
                },
                log: LogSection {
                    path: PathBuf::from("/file/menus.json"),
                },
            };
            save_config_to(&file, &home.join("weekmenu/config.toml")).unwrap();
            unsafe { std::env::set_var(CATALOG_ENV_VAR, "/env/recipes.json") };

            WeekmenuConfig::resolve(None, None).unwrap()
        });
        clear_env();

        assert_eq!(config.catalog_path, PathBuf::from("/env/recipes.json"));
        assert_eq!(config.log_config.path, PathBuf::from("/file/menus.json"));
    }

    #[test]
    fn resolve_errors_on_malformed_config_file() {
        let _lock = lock_env();
        clear_env();

        let result = with_config_home(|home| {
            std::fs::create_dir_all(home.join("weekmenu")).unwrap();
            std::fs::write(home.join("weekmenu/config.toml"), "[catalog\n").unwrap();
            WeekmenuConfig::resolve(None, None)
        });

        let msg = format!("{:#}", result.unwrap_err());
        assert!(
            msg.contains("failed to parse config file"),
            "unexpected error: {msg}"
        );
    }

    #[test]
    fn config_path_ends_with_expected_filename() {
        let _lock = lock_env();
        let path = config_path();
        assert!(
            path.ends_with("weekmenu/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }
}
