//! Client service
//!
//! Creates and lists clients for an owner.

use tracing::info;

use crate::error::{TimesheetError, TimesheetResult};
use crate::models::{Client, ClientId, OwnerScope};
use crate::storage::Storage;

/// Service for client management
pub struct ClientService<'a> {
    storage: &'a Storage,
}

impl<'a> ClientService<'a> {
    /// Create a new client service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new client owned by `owner`
    pub fn create(
        &self,
        name: &str,
        description: Option<&str>,
        owner: &OwnerScope,
    ) -> TimesheetResult<Client> {
        let mut client = Client::new(self.storage.clients.next_id()?, name.trim(), owner.clone());
        client.description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);

        client
            .validate()
            .map_err(|e| TimesheetError::Validation(e.to_string()))?;

        self.storage.clients.upsert(client.clone())?;
        self.storage.clients.save()?;

        info!(client_id = %client.id, name = %client.name, "created client");
        Ok(client)
    }

    /// Look up a client by caller-supplied reference
    pub fn get(&self, client_ref: &str, owner: &OwnerScope) -> TimesheetResult<Client> {
        let id = ClientId::parse(client_ref)
            .map_err(|e| TimesheetError::InvalidReference(e.to_string()))?;

        self.storage
            .clients
            .get_owned(id, owner)?
            .ok_or_else(|| TimesheetError::client_not_found(id.to_string()))
    }

    /// All clients visible to `owner`, by name
    pub fn list(&self, owner: &OwnerScope) -> TimesheetResult<Vec<Client>> {
        self.storage.clients.list_owned(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TimesheetPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TimesheetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_client() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);
        let owner = OwnerScope::new("alice@example.com");

        let first = service.create("  Acme  ", Some("Retainer"), &owner).unwrap();
        let second = service.create("Globex", None, &owner).unwrap();

        assert_eq!(first.id, ClientId::new(1));
        assert_eq!(first.name, "Acme");
        assert_eq!(first.description.as_deref(), Some("Retainer"));
        assert_eq!(second.id, ClientId::new(2));
        assert!(storage.paths().clients_file().exists());
    }

    #[test]
    fn test_empty_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);

        let err = service
            .create("   ", None, &OwnerScope::new("alice@example.com"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.clients.count().unwrap(), 0);
    }

    #[test]
    fn test_get_scoped_to_owner() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);
        let alice = OwnerScope::new("alice@example.com");
        service.create("Acme", None, &alice).unwrap();

        assert_eq!(service.get("1", &alice).unwrap().name, "Acme");
        assert!(service
            .get("1", &OwnerScope::new("bob@example.com"))
            .unwrap_err()
            .is_not_found());
        assert!(matches!(
            service.get("one", &alice),
            Err(TimesheetError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_list_only_own_clients() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);
        let alice = OwnerScope::new("alice@example.com");
        let bob = OwnerScope::new("bob@example.com");

        service.create("Zeta", None, &alice).unwrap();
        service.create("alpha", None, &alice).unwrap();
        service.create("Bobco", None, &bob).unwrap();

        let names: Vec<_> = service
            .list(&alice)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["alpha", "Zeta"]);
    }
}
