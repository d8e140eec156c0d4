use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::domain::models::Purchase;
use crate::error::Result;
use crate::storage::traits::{require_assigned, Repository, SaveOutcome, UpdateOutcome};

/// SQLite-backed purchase repository.
pub struct SqlitePurchaseRepository {
    db: Database,
}

impl SqlitePurchaseRepository {
    pub(crate) fn new(db: Database) -> Self {
        Self { db }
    }

    fn row_to_purchase(row: &Row) -> rusqlite::Result<Purchase> {
        Ok(Purchase {
            id: row.get("id")?,
            client_id: row.get("clientid")?,
            book_id: row.get("bookid")?,
            library: row.get("library")?,
        })
    }
}

impl Repository<Purchase> for SqlitePurchaseRepository {
    fn find_one(&self, id: u32) -> Result<Option<Purchase>> {
        require_assigned(id)?;
        let conn = self.db.conn()?;
        let purchase = conn
            .query_row(
                "SELECT id, clientid, bookid, library FROM purchase WHERE id = ?1",
                params![id],
                Self::row_to_purchase,
            )
            .optional()?;
        Ok(purchase)
    }

    fn find_all(&self) -> Result<Vec<Purchase>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare("SELECT id, clientid, bookid, library FROM purchase")?;
        let rows = stmt.query_map([], Self::row_to_purchase)?;

        let mut purchases = Vec::new();
        for row in rows {
            purchases.push(row?);
        }
        Ok(purchases)
    }

    fn save(&self, purchase: Purchase) -> Result<SaveOutcome<Purchase>> {
        require_assigned(purchase.id)?;
        if let Some(existing) = self.find_one(purchase.id)? {
            return Ok(SaveOutcome::Conflict(existing));
        }

        let conn = self.db.conn()?;
        conn.execute(
            "INSERT INTO purchase (id, clientid, bookid, library) VALUES (?1, ?2, ?3, ?4)",
            params![purchase.id, purchase.client_id, purchase.book_id, purchase.library],
        )?;
        Ok(SaveOutcome::Inserted)
    }

    fn delete(&self, id: u32) -> Result<Option<Purchase>> {
        require_assigned(id)?;
        let existing = self.find_one(id)?;
        if existing.is_some() {
            let conn = self.db.conn()?;
            conn.execute("DELETE FROM purchase WHERE id = ?1", params![id])?;
        }
        Ok(existing)
    }

    fn update(&self, purchase: Purchase) -> Result<UpdateOutcome<Purchase>> {
        require_assigned(purchase.id)?;
        let conn = self.db.conn()?;
        let affected = conn.execute(
            "UPDATE purchase SET clientid = ?2, bookid = ?3, library = ?4 WHERE id = ?1",
            params![purchase.id, purchase.client_id, purchase.book_id, purchase.library],
        )?;
        if affected == 0 {
            Ok(UpdateOutcome::NotFound)
        } else {
            Ok(UpdateOutcome::Updated(purchase))
        }
    }
}
