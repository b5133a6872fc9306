//! Time entry repository for JSON storage
//!
//! Manages loading and saving time entries to entries.json, with an index
//! from client to entries.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TimesheetError;
use crate::models::{ClientId, EntryId, OwnerScope, TimeEntry};

use super::file_io::{read_json, write_json_atomic};

/// Serializable entry data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct EntryData {
    entries: Vec<TimeEntry>,
}

/// Repository for time entry persistence with a per-client index
pub struct EntryRepository {
    path: PathBuf,
    data: RwLock<HashMap<EntryId, TimeEntry>>,
    /// Index: client_id -> entry_ids
    by_client: RwLock<HashMap<ClientId, Vec<EntryId>>>,
}

impl EntryRepository {
    /// Create a new entry repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_client: RwLock::new(HashMap::new()),
        }
    }

    /// Load entries from disk and build the index
    pub fn load(&self) -> Result<(), TimesheetError> {
        let file_data: EntryData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_client = self.by_client.write().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_client.clear();

        for entry in file_data.entries {
            by_client.entry(entry.client_id).or_default().push(entry.id);
            data.insert(entry.id, entry);
        }

        Ok(())
    }

    /// Save entries to disk
    pub fn save(&self) -> Result<(), TimesheetError> {
        let data = self.data.read().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut entries: Vec<_> = data.values().cloned().collect();
        entries.sort_by_key(|e| e.id);

        write_json_atomic(&self.path, &EntryData { entries })
    }

    /// Entries for a client visible to the owner, newest first
    ///
    /// Ordered by date descending, then creation time descending.
    pub fn list_for_client(
        &self,
        client_id: ClientId,
        owner: &OwnerScope,
    ) -> Result<Vec<TimeEntry>, TimesheetError> {
        let data = self.data.read().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_client = self.by_client.read().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut entries: Vec<_> = by_client
            .get(&client_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| data.get(id))
                    .filter(|e| &e.owner == owner)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        entries.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });
        Ok(entries)
    }

    /// The ID the next inserted entry should use
    pub fn next_id(&self) -> Result<EntryId, TimesheetError> {
        let data = self.data.read().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .keys()
            .max()
            .map(|id| id.next())
            .unwrap_or(EntryId::new(1)))
    }

    /// Insert or update an entry, keeping the client index in sync
    pub fn upsert(&self, entry: TimeEntry) -> Result<(), TimesheetError> {
        let mut data = self.data.write().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_client = self.by_client.write().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(old) = data.get(&entry.id) {
            if let Some(ids) = by_client.get_mut(&old.client_id) {
                ids.retain(|id| *id != entry.id);
            }
        }

        by_client.entry(entry.client_id).or_default().push(entry.id);
        data.insert(entry.id, entry);
        Ok(())
    }

    /// Count all entries
    pub fn count(&self) -> Result<usize, TimesheetError> {
        let data = self.data.read().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
