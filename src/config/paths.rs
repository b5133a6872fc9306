//! Path management for timesheet reporting
//!
//! Provides XDG-compliant path resolution for configuration, data, and the
//! transient export directory.
//!
//! ## Path Resolution Order
//!
//! 1. `TIMESHEET_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/timesheet-report` or `~/.config/timesheet-report`
//! 3. Windows: `%APPDATA%\timesheet-report`

use std::path::PathBuf;

use crate::error::TimesheetError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "TIMESHEET_DATA_DIR";

/// Manages all paths used by the application
#[derive(Debug, Clone)]
pub struct TimesheetPaths {
    /// Base directory for all application data
    base_dir: PathBuf,
}

impl TimesheetPaths {
    /// Create a new TimesheetPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, TimesheetError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create TimesheetPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Directory shared by all in-flight exports for staging files
    pub fn export_tmp_dir(&self) -> PathBuf {
        self.base_dir.join("tmp").join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to clients.json
    pub fn clients_file(&self) -> PathBuf {
        self.data_dir().join("clients.json")
    }

    /// Get the path to entries.json
    pub fn entries_file(&self) -> PathBuf {
        self.data_dir().join("entries.json")
    }

    /// Ensure the base and data directories exist
    ///
    /// The transient export directory is created lazily by the exporter.
    pub fn ensure_directories(&self) -> Result<(), TimesheetError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TimesheetError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| TimesheetError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, TimesheetError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("timesheet-report"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| TimesheetError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("timesheet-report"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, TimesheetError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| TimesheetError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("timesheet-report"))
}
