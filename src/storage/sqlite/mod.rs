//! SQLite storage backend.
//!
//! A [`Database`] owns a connection pool and hands out one repository per
//! entity kind. The schema is created on open; there is no migration
//! machinery beyond that.

mod book_repository;
mod client_repository;
mod purchase_repository;

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::error::Result;

pub use book_repository::SqliteBookRepository;
pub use client_repository::SqliteClientRepository;
pub use purchase_repository::SqlitePurchaseRepository;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS book (
    id              INTEGER PRIMARY KEY,
    title           TEXT NOT NULL,
    author          TEXT NOT NULL,
    publisher       TEXT NOT NULL,
    publicationyear INTEGER NOT NULL,
    price           REAL NOT NULL
);
CREATE TABLE IF NOT EXISTS client (
    id        INTEGER PRIMARY KEY,
    firstname TEXT NOT NULL,
    lastname  TEXT NOT NULL,
    address   TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS purchase (
    id       INTEGER PRIMARY KEY,
    clientid INTEGER NOT NULL,
    bookid   INTEGER NOT NULL,
    library  TEXT NOT NULL
);
";

/// SQLite connection pool plus repository factory.
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Open (creating if needed) a database file and set up the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(SqliteConnectionManager::file(path.as_ref()), 4)
    }

    /// An in-memory database, useful for testing. Pool size 1 keeps every
    /// operation on the single connection that holds the data.
    pub fn in_memory() -> Result<Self> {
        Self::build(SqliteConnectionManager::memory(), 1)
    }

    fn build(manager: SqliteConnectionManager, max_size: u32) -> Result<Self> {
        let pool = Pool::builder().max_size(max_size).build(manager)?;
        pool.get()?.execute_batch(SCHEMA)?;
        Ok(Self { pool })
    }

    pub(crate) fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    pub fn books(&self) -> SqliteBookRepository {
        SqliteBookRepository::new(self.clone())
    }

    pub fn clients(&self) -> SqliteClientRepository {
        SqliteClientRepository::new(self.clone())
    }

    pub fn purchases(&self) -> SqlitePurchaseRepository {
        SqlitePurchaseRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Book, Client, Purchase};
    use crate::error::BookstoreError;
    use crate::storage::{Repository, UpdateOutcome};

    fn sample_book(id: u32) -> Book {
        Book::new(id, "The Trial", "Franz Kafka", "Schocken", 1968, 25.5)
    }

    #[test]
    fn book_crud_round_trip() {
        let db = Database::in_memory().unwrap();
        let repo = db.books();

        assert!(repo.save(sample_book(1)).unwrap().is_inserted());
        let found = repo.find_one(1).unwrap().unwrap();
        assert_eq!(found.title, "The Trial");
        assert_eq!(found.price, 25.5);

        let mut changed = sample_book(1);
        changed.price = 30.0;
        assert!(repo.update(changed).unwrap().is_updated());
        assert_eq!(repo.find_one(1).unwrap().unwrap().price, 30.0);

        let removed = repo.delete(1).unwrap().unwrap();
        assert_eq!(removed.price, 30.0);
        assert!(repo.find_one(1).unwrap().is_none());
    }

    #[test]
    fn save_with_taken_id_returns_the_stored_book() {
        let db = Database::in_memory().unwrap();
        let repo = db.books();
        repo.save(sample_book(1)).unwrap();

        let mut other = sample_book(1);
        other.title = "The Castle".to_string();
        let existing = repo.save(other).unwrap().conflicting().unwrap();
        assert_eq!(existing.title, "The Trial");
        assert_eq!(repo.find_all().unwrap().len(), 1);
    }

    #[test]
    fn update_of_missing_row_reports_not_found() {
        let db = Database::in_memory().unwrap();
        let repo = db.clients();

        let outcome = repo.update(Client::new(5, "Ana", "Pop", "ana@home")).unwrap();
        assert_eq!(outcome, UpdateOutcome::NotFound);
    }

    #[test]
    fn purchase_rows_map_every_column() {
        let db = Database::in_memory().unwrap();
        let repo = db.purchases();

        let purchase = Purchase {
            id: 9,
            client_id: 4,
            book_id: 2,
            library: "Central".to_string(),
        };
        repo.save(purchase.clone()).unwrap();

        assert_eq!(repo.find_one(9).unwrap().unwrap(), purchase);
        assert_eq!(repo.find_all().unwrap(), vec![purchase]);
    }

    #[test]
    fn nil_id_is_rejected_without_touching_the_database() {
        let db = Database::in_memory().unwrap();
        let repo = db.books();

        assert!(matches!(
            repo.find_one(0),
            Err(BookstoreError::IllegalArgument(_))
        ));
        assert!(matches!(
            repo.save(sample_book(0)),
            Err(BookstoreError::IllegalArgument(_))
        ));
    }

    #[test]
    fn delete_of_missing_row_is_a_no_op() {
        let db = Database::in_memory().unwrap();
        let repo = db.clients();
        repo.save(Client::new(1, "Ana", "Pop", "ana@home")).unwrap();

        assert!(repo.delete(3).unwrap().is_none());
        assert_eq!(repo.find_all().unwrap().len(), 1);
    }

    #[test]
    fn file_database_persists_across_reopens() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bookstore.db");

        {
            let db = Database::open(&path).unwrap();
            db.books().save(sample_book(1)).unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.books().find_one(1).unwrap().unwrap(), sample_book(1));
    }
}
