use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::domain::models::Client;
use crate::error::Result;
use crate::storage::traits::{require_assigned, Repository, SaveOutcome, UpdateOutcome};

/// SQLite-backed client repository.
pub struct SqliteClientRepository {
    db: Database,
}

impl SqliteClientRepository {
    pub(crate) fn new(db: Database) -> Self {
        Self { db }
    }

    fn row_to_client(row: &Row) -> rusqlite::Result<Client> {
        Ok(Client {
            id: row.get("id")?,
            first_name: row.get("firstname")?,
            last_name: row.get("lastname")?,
            address: row.get("address")?,
        })
    }
}

impl Repository<Client> for SqliteClientRepository {
    fn find_one(&self, id: u32) -> Result<Option<Client>> {
        require_assigned(id)?;
        let conn = self.db.conn()?;
        let client = conn
            .query_row(
                "SELECT id, firstname, lastname, address FROM client WHERE id = ?1",
                params![id],
                Self::row_to_client,
            )
            .optional()?;
        Ok(client)
    }

    fn find_all(&self) -> Result<Vec<Client>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare("SELECT id, firstname, lastname, address FROM client")?;
        let rows = stmt.query_map([], Self::row_to_client)?;

        let mut clients = Vec::new();
        for row in rows {
            clients.push(row?);
        }
        Ok(clients)
    }

    fn save(&self, client: Client) -> Result<SaveOutcome<Client>> {
        require_assigned(client.id)?;
        if let Some(existing) = self.find_one(client.id)? {
            return Ok(SaveOutcome::Conflict(existing));
        }

        let conn = self.db.conn()?;
        conn.execute(
            "INSERT INTO client (id, firstname, lastname, address) VALUES (?1, ?2, ?3, ?4)",
            params![client.id, client.first_name, client.last_name, client.address],
        )?;
        Ok(SaveOutcome::Inserted)
    }

    fn delete(&self, id: u32) -> Result<Option<Client>> {
        require_assigned(id)?;
        let existing = self.find_one(id)?;
        if existing.is_some() {
            let conn = self.db.conn()?;
            conn.execute("DELETE FROM client WHERE id = ?1", params![id])?;
        }
        Ok(existing)
    }

    fn update(&self, client: Client) -> Result<UpdateOutcome<Client>> {
        require_assigned(client.id)?;
        let conn = self.db.conn()?;
        let affected = conn.execute(
            "UPDATE client SET firstname = ?2, lastname = ?3, address = ?4 WHERE id = ?1",
            params![client.id, client.first_name, client.last_name, client.address],
        )?;
        if affected == 0 {
            Ok(UpdateOutcome::NotFound)
        } else {
            Ok(UpdateOutcome::Updated(client))
        }
    }
}
