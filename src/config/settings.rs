//! User settings for timesheet reporting
//!
//! Manages user preferences including display date format and the page
//! geometry used by the document exporter.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::TimesheetPaths;
use crate::error::TimesheetError;
use crate::export::pdf::DocumentLayout;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Date format for terminal output (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Page geometry for document exports
    #[serde(default)]
    pub document: DocumentLayout,
}

fn default_schema_version() -> u32 {
    1
}

/// Date format used when none is configured
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

/// Whether chrono can render dates with this strftime pattern
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            date_format: default_date_format(),
            document: DocumentLayout::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &TimesheetPaths) -> Result<Self, TimesheetError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TimesheetError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| TimesheetError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check values that serde accepts but rendering cannot use
    pub fn validate(&self) -> Result<(), TimesheetError> {
        if !is_valid_date_format(&self.date_format) {
            return Err(TimesheetError::Config(format!(
                "Invalid date_format '{}'",
                self.date_format
            )));
        }
        self.document.validate()
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TimesheetPaths) -> Result<(), TimesheetError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TimesheetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TimesheetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
