//! The recording log: an append-only JSON array of finalized menus.
//!
//! Logically the log only grows. Physically every append rewrites the whole
//! file: the new contents go to a temporary file in the same directory, which
//! is then renamed over the log, so a reader sees either the old or the new
//! array and never a truncated one. The read-modify-write runs under
//! [`LogLock`] so concurrent writers cannot drop each other's entries.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::LogConfig;
use crate::lock::LogLock;
use crate::models::{RecordedMenuEntry, TIMESTAMP_FORMAT, WeeklyMenu};

/// Errors raised while reading or writing the recording log.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read menu log {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("menu log {} is not valid: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize menu log: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write menu log {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to lock menu log {}: {source}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Handle on the recording log file.
#[derive(Debug, Clone)]
pub struct MenuLog {
    config: LogConfig,
}

impl MenuLog {
    pub fn new(config: LogConfig) -> Self {
        Self { config }
    }

    /// Open the log at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::new(LogConfig::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Read every recorded entry, oldest first.
    ///
    /// A missing log is an empty log. A file holding only whitespace is
    /// also treated as empty.
    pub fn entries(&self) -> Result<Vec<RecordedMenuEntry>, PersistenceError> {
        let path = &self.config.path;
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "menu log does not exist yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: path.clone(),
                    source,
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|source| PersistenceError::Parse {
            path: path.clone(),
            source,
        })
    }

    /// Append a snapshot of `menu` stamped with the current local time.
    pub fn record(&self, menu: &WeeklyMenu) -> Result<RecordedMenuEntry, PersistenceError> {
        self.record_at(menu, Local::now().naive_local())
    }

    /// Append a snapshot of `menu` stamped with `at`.
    ///
    /// Returns the entry as written.
    pub fn record_at(
        &self,
        menu: &WeeklyMenu,
        at: NaiveDateTime,
    ) -> Result<RecordedMenuEntry, PersistenceError> {
        let dir = self.config.directory();
        std::fs::create_dir_all(dir).map_err(|source| PersistenceError::Write {
            path: self.config.path.clone(),
            source,
        })?;

        let lock_path = self.config.lock_path();
        let _lock = LogLock::acquire(&lock_path).map_err(|source| PersistenceError::Lock {
            path: lock_path.clone(),
            source,
        })?;

        let mut entries = self.entries()?;
        let entry = RecordedMenuEntry {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            menu: menu.clone(),
        };
        entries.push(entry.clone());

        self.replace(&entries)?;

        info!(
            path = %self.config.path.display(),
            timestamp = %entry.timestamp,
            entries = entries.len(),
            "recorded menu"
        );
        Ok(entry)
    }

    /// Atomically replace the log contents with `entries`.
    fn replace(&self, entries: &[RecordedMenuEntry]) -> Result<(), PersistenceError> {
        let path = &self.config.path;
        let write_err = |source| PersistenceError::Write {
            path: path.clone(),
            source,
        };

        let bytes = to_pretty_json(entries)?;

        let dir = self.config.directory();
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&bytes).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        // Make the rename itself durable.
        if let Err(e) = sync_dir(dir) {
            debug!(dir = %dir.display(), error = %e, "failed to sync menu log directory");
        }
        Ok(())
    }
}

/// Flush a directory's entries to disk.
fn sync_dir(dir: &Path) -> io::Result<()> {
    std::fs::File::open(dir)?.sync_all()
}

/// Serialize with 4-space indentation.
fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, PersistenceError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(PersistenceError::Serialize)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{Day, Selection};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 30)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn missing_log_reads_as_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        let log = MenuLog::at(tmp.path().join("nope.json"));
        assert!(log.entries().unwrap().is_empty());
    }

    #[test]
    fn blank_log_reads_as_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("log.json");
        std::fs::write(&path, "  \n").unwrap();
        assert!(MenuLog::at(&path).entries().unwrap().is_empty());
    }

    #[test]
    fn record_formats_timestamp_to_the_second() {
        let tmp = tempfile::TempDir::new().unwrap();
        let log = MenuLog::at(tmp.path().join("log.json"));
        let entry = log.record_at(&WeeklyMenu::default(), at(7, 5, 9)).unwrap();
        assert_eq!(entry.timestamp, "2024-09-30 07:05:09");
    }

    #[test]
    fn record_writes_four_space_indent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("log.json");
        MenuLog::at(&path)
            .record_at(&WeeklyMenu::default(), at(12, 0, 0))
            .unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n    {\n        \"timestamp\""), "{raw}");
    }

    #[test]
    fn record_creates_missing_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested/deeper/log.json");
        MenuLog::at(&path)
            .record_at(&WeeklyMenu::default(), at(12, 0, 0))
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn snapshot_is_not_aliased() {
        let tmp = tempfile::TempDir::new().unwrap();
        let log = MenuLog::at(tmp.path().join("log.json"));
        let mut menu = WeeklyMenu::default();
        menu.day_mut(Day::Monday).breakfast = Selection::recipe("Eggs");
        log.record_at(&menu, at(8, 0, 0)).unwrap();

        menu.day_mut(Day::Monday).breakfast = Selection::recipe("Toast");

        let entries = log.entries().unwrap();
        assert_eq!(
            entries[0].menu.day(Day::Monday).breakfast,
            Selection::recipe("Eggs")
        );
    }

    #[test]
    fn sync_dir_reports_failures() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(sync_dir(tmp.path()).is_ok());
        assert!(sync_dir(&tmp.path().join("gone")).is_err());
    }

    #[test]
    fn malformed_log_is_a_parse_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("log.json");
        std::fs::write(&path, "{not json").unwrap();
        let log = MenuLog::at(&path);

        let err = log.record_at(&WeeklyMenu::default(), at(1, 2, 3)).unwrap_err();
        assert!(
            matches!(err, PersistenceError::Parse { .. }),
            "expected Parse, got: {err}"
        );
        // The bad file is left untouched.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
    }
}
