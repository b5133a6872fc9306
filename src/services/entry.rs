//! Time entry service
//!
//! Logs work against a client and lists what was logged.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{TimesheetError, TimesheetResult};
use crate::models::{Hours, OwnerScope, TimeEntry};
use crate::storage::Storage;

use super::client::ClientService;

/// Service for time entry management
pub struct EntryService<'a> {
    storage: &'a Storage,
}

impl<'a> EntryService<'a> {
    /// Create a new entry service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Log hours against a client visible to `owner`
    pub fn create(
        &self,
        client_ref: &str,
        date: NaiveDate,
        hours: &str,
        description: Option<&str>,
        owner: &OwnerScope,
    ) -> TimesheetResult<TimeEntry> {
        let client = ClientService::new(self.storage).get(client_ref, owner)?;
        let hours = Hours::parse(hours).map_err(|e| TimesheetError::Validation(e.to_string()))?;

        let mut entry = TimeEntry::new(
            self.storage.entries.next_id()?,
            client.id,
            date,
            hours,
            owner.clone(),
        );
        if let Some(description) = description {
            entry = entry.with_description(description.trim());
        }

        entry
            .validate()
            .map_err(|e| TimesheetError::Validation(e.to_string()))?;

        self.storage.entries.upsert(entry.clone())?;
        self.storage.entries.save()?;

        info!(entry_id = %entry.id, client_id = %client.id, hours = %entry.hours, "logged time entry");
        Ok(entry)
    }

    /// Entries logged against a client, newest first
    pub fn list_for_client(
        &self,
        client_ref: &str,
        owner: &OwnerScope,
    ) -> TimesheetResult<Vec<TimeEntry>> {
        let client = ClientService::new(self.storage).get(client_ref, owner)?;
        self.storage.entries.list_for_client(client.id, owner)
    }
}
