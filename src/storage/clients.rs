//! Client repository for JSON storage
//!
//! Manages loading and saving clients to clients.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TimesheetError;
use crate::models::{Client, ClientId, OwnerScope};

use super::file_io::{read_json, write_json_atomic};

/// Serializable client data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ClientData {
    clients: Vec<Client>,
}

/// Repository for client persistence
pub struct ClientRepository {
    path: PathBuf,
    data: RwLock<HashMap<ClientId, Client>>,
}

impl ClientRepository {
    /// Create a new client repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load clients from disk
    pub fn load(&self) -> Result<(), TimesheetError> {
        let file_data: ClientData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for client in file_data.clients {
            data.insert(client.id, client);
        }

        Ok(())
    }

    /// Save clients to disk
    pub fn save(&self) -> Result<(), TimesheetError> {
        let data = self.data.read().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut clients: Vec<_> = data.values().cloned().collect();
        clients.sort_by_key(|c| c.id);

        write_json_atomic(&self.path, &ClientData { clients })
    }

    /// Get a client by ID, only if it belongs to the owner
    pub fn get_owned(
        &self,
        id: ClientId,
        owner: &OwnerScope,
    ) -> Result<Option<Client>, TimesheetError> {
        let data = self.data.read().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).filter(|c| c.is_owned_by(owner)).cloned())
    }

    /// Get all clients for an owner, sorted by name
    pub fn list_owned(&self, owner: &OwnerScope) -> Result<Vec<Client>, TimesheetError> {
        let data = self.data.read().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut clients: Vec<_> = data
            .values()
            .filter(|c| c.is_owned_by(owner))
            .cloned()
            .collect();
        clients.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(clients)
    }

    /// The ID the next inserted client should use
    pub fn next_id(&self) -> Result<ClientId, TimesheetError> {
        let data = self.data.read().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .keys()
            .max()
            .map(|id| id.next())
            .unwrap_or(ClientId::new(1)))
    }

    /// Insert or update a client
    pub fn upsert(&self, client: Client) -> Result<(), TimesheetError> {
        let mut data = self.data.write().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(client.id, client);
        Ok(())
    }

    /// Count all clients (across owners)
    pub fn count(&self) -> Result<usize, TimesheetError> {
        let data = self.data.read().map_err(|e| {
            TimesheetError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
