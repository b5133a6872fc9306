//! Storage layer for timesheet reporting
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation, plus the [`TimesheetStore`] seam the report service reads
//! through. Every read is scoped to an owner.

pub mod clients;
pub mod entries;
pub mod file_io;

pub use clients::ClientRepository;
pub use entries::EntryRepository;
pub use file_io::{read_json, write_json_atomic};

use crate::config::paths::TimesheetPaths;
use crate::error::{TimesheetError, TimesheetResult};
use crate::models::{Client, ClientId, OwnerScope, TimeEntry};

/// Read access the report pipeline needs from the store
///
/// Both lookups are scoped to the owner; a client that exists under a
/// different owner is reported as absent.
pub trait TimesheetStore {
    /// Look up a client visible to the owner
    fn find_client_by_id(
        &self,
        id: ClientId,
        owner: &OwnerScope,
    ) -> TimesheetResult<Option<Client>>;

    /// All entries logged against a client by the owner
    fn list_entries_for_client(
        &self,
        client_id: ClientId,
        owner: &OwnerScope,
    ) -> TimesheetResult<Vec<TimeEntry>>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TimesheetPaths,
    pub clients: ClientRepository,
    pub entries: EntryRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TimesheetPaths) -> Result<Self, TimesheetError> {
        paths.ensure_directories()?;

        Ok(Self {
            clients: ClientRepository::new(paths.clients_file()),
            entries: EntryRepository::new(paths.entries_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TimesheetPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), TimesheetError> {
        self.clients.load()?;
        self.entries.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), TimesheetError> {
        self.clients.save()?;
        self.entries.save()?;
        Ok(())
    }
}

impl TimesheetStore for Storage {
    fn find_client_by_id(
        &self,
        id: ClientId,
        owner: &OwnerScope,
    ) -> TimesheetResult<Option<Client>> {
        self.clients.get_owned(id, owner)
    }

    fn list_entries_for_client(
        &self,
        client_id: ClientId,
        owner: &OwnerScope,
    ) -> TimesheetResult<Vec<TimeEntry>> {
        self.entries.list_for_client(client_id, owner)
    }
}
