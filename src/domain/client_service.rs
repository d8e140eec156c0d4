use log::{debug, info};

use crate::domain::models::Client;
use crate::domain::validators;
use crate::error::Result;
use crate::storage::{Repository, SaveOutcome, UpdateOutcome};

/// Service for managing the client register.
///
/// Validates, then delegates to whichever repository backend it was
/// constructed with.
pub struct ClientService {
    repository: Box<dyn Repository<Client>>,
}

impl ClientService {
    pub fn new(repository: Box<dyn Repository<Client>>) -> Self {
        Self { repository }
    }

    /// Validate and store a new client.
    pub fn add_client(&self, client: Client) -> Result<SaveOutcome<Client>> {
        info!("Adding client {}: {} {}", client.id, client.first_name, client.last_name);
        validators::validate_client(&client)?;
        self.repository.save(client)
    }

    /// Validate and replace the stored client with the same id.
    pub fn update_client(&self, client: Client) -> Result<UpdateOutcome<Client>> {
        info!("Updating client {}", client.id);
        validators::validate_client(&client)?;
        self.repository.update(client)
    }

    pub fn delete_client(&self, id: u32) -> Result<Option<Client>> {
        info!("Deleting client {}", id);
        self.repository.delete(id)
    }

    pub fn find_one(&self, id: u32) -> Result<Option<Client>> {
        self.repository.find_one(id)
    }

    pub fn list_clients(&self) -> Result<Vec<Client>> {
        self.repository.find_all()
    }

    /// Clients where `search` occurs literally (case-sensitive) in the
    /// first name, last name, or address.
    pub fn filter_clients(&self, search: &str) -> Result<Vec<Client>> {
        debug!("Filtering clients by {:?}", search);
        let clients = self.repository.find_all()?;
        Ok(clients
            .into_iter()
            .filter(|client| {
                client.first_name.contains(search)
                    || client.last_name.contains(search)
                    || client.address.contains(search)
            })
            .collect())
    }
}
