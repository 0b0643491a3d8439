//! Runtime configuration for storage and logging.
//!
//! # Invariants
//! - Directories are absolute; relative paths are rejected up front so the
//!   store location does not depend on the working directory.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File name of the record store inside `data_dir`.
pub const DEFAULT_DB_FILE_NAME: &str = "roster.sqlite3";
/// Log directory name used when no explicit one is configured.
pub const DEFAULT_LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub db_file_name: String,
}

impl CoreConfig {
    /// Builds a configuration rooted at `data_dir` with default log settings.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            log_dir: data_dir.join(DEFAULT_LOG_DIR_NAME),
            data_dir,
            log_level: default_log_level().to_string(),
            db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
        }
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file_name)
    }

    /// # Errors
    /// - `ConfigError::RelativePath` when a directory is not absolute.
    /// - `ConfigError::EmptyFileName` when the store file name is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_absolute("data_dir", &self.data_dir)?;
        ensure_absolute("log_dir", &self.log_dir)?;
        if self.db_file_name.trim().is_empty() {
            return Err(ConfigError::EmptyFileName);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RelativePath { field: &'static str, path: PathBuf },
    EmptyFileName,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativePath { field, path } => write!(
                f,
                "{field} must be an absolute path, got `{}`",
                path.display()
            ),
            Self::EmptyFileName => write!(f, "store file name must not be blank"),
        }
    }
}

impl Error for ConfigError {}

fn ensure_absolute(field: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() || !path.is_absolute() {
        return Err(ConfigError::RelativePath {
            field,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
