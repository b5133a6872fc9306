//! Time entry model
//!
//! One logged unit of work: a date, a number of hours and an optional
//! description, belonging to a client and an owner.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::hours::Hours;
use super::ids::{ClientId, EntryId, OwnerScope};

/// Maximum length of an entry description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// A single time-tracking record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier
    pub id: EntryId,

    /// The client the work was done for
    pub client_id: ClientId,

    /// Hours worked (0.01 - 24.00)
    pub hours: Hours,

    /// What the work was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Day the work was done
    pub date: NaiveDate,

    /// Owner the entry is scoped to
    pub owner: OwnerScope,

    /// When the entry was created
    pub created_at: DateTime<Utc>,

    /// When the entry was last modified
    pub updated_at: DateTime<Utc>,
}

impl TimeEntry {
    /// Create a new time entry
    pub fn new(
        id: EntryId,
        client_id: ClientId,
        date: NaiveDate,
        hours: Hours,
        owner: OwnerScope,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            client_id,
            hours,
            description: None,
            date,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style description setter; blank descriptions are stored as absent
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    /// The description, or an empty string when none was recorded
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Validate the entry
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if !self.hours.is_valid_entry() {
            return Err(EntryValidationError::HoursOutOfRange(self.hours));
        }

        if let Some(description) = &self.description {
            let len = description.chars().count();
            if len > MAX_DESCRIPTION_LEN {
                return Err(EntryValidationError::DescriptionTooLong(len));
            }
        }

        Ok(())
    }
}

impl fmt::Display for TimeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}h", self.date, self.hours)?;
        if let Some(description) = &self.description {
            write!(f, " {}", description)?;
        }
        Ok(())
    }
}

/// Validation errors for time entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    HoursOutOfRange(Hours),
    DescriptionTooLong(usize),
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HoursOutOfRange(hours) => write!(
                f,
                "Hours must be between {} and {}, got {}",
                Hours::MIN_ENTRY,
                Hours::MAX_ENTRY,
                hours
            ),
            Self::DescriptionTooLong(len) => write!(
                f,
                "Description is too long ({} characters, max {})",
                len, MAX_DESCRIPTION_LEN
            ),
        }
    }
}

impl std::error::Error for EntryValidationError {}
