use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::domain::models::Book;
use crate::error::Result;
use crate::storage::traits::{require_assigned, Repository, SaveOutcome, UpdateOutcome};

/// SQLite-backed book repository.
pub struct SqliteBookRepository {
    db: Database,
}

impl SqliteBookRepository {
    pub(crate) fn new(db: Database) -> Self {
        Self { db }
    }

    fn row_to_book(row: &Row) -> rusqlite::Result<Book> {
        Ok(Book {
            id: row.get("id")?,
            title: row.get("title")?,
            author: row.get("author")?,
            publisher: row.get("publisher")?,
            publication_year: row.get("publicationyear")?,
            price: row.get("price")?,
        })
    }
}

impl Repository<Book> for SqliteBookRepository {
    fn find_one(&self, id: u32) -> Result<Option<Book>> {
        require_assigned(id)?;
        let conn = self.db.conn()?;
        let book = conn
            .query_row(
                "SELECT id, title, author, publisher, publicationyear, price \
                 FROM book WHERE id = ?1",
                params![id],
                Self::row_to_book,
            )
            .optional()?;
        Ok(book)
    }

    fn find_all(&self) -> Result<Vec<Book>> {
        let conn = self.db.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, title, author, publisher, publicationyear, price FROM book")?;
        let rows = stmt.query_map([], Self::row_to_book)?;

        let mut books = Vec::new();
        for row in rows {
            books.push(row?);
        }
        Ok(books)
    }

    fn save(&self, book: Book) -> Result<SaveOutcome<Book>> {
        require_assigned(book.id)?;
        if let Some(existing) = self.find_one(book.id)? {
            return Ok(SaveOutcome::Conflict(existing));
        }

        let conn = self.db.conn()?;
        conn.execute(
            "INSERT INTO book (id, title, author, publisher, publicationyear, price) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                book.id,
                book.title,
                book.author,
                book.publisher,
                book.publication_year,
                book.price
            ],
        )?;
        Ok(SaveOutcome::Inserted)
    }

    fn delete(&self, id: u32) -> Result<Option<Book>> {
        require_assigned(id)?;
        let existing = self.find_one(id)?;
        if existing.is_some() {
            let conn = self.db.conn()?;
            conn.execute("DELETE FROM book WHERE id = ?1", params![id])?;
        }
        Ok(existing)
    }

    fn update(&self, book: Book) -> Result<UpdateOutcome<Book>> {
        require_assigned(book.id)?;
        let conn = self.db.conn()?;
        let affected = conn.execute(
            "UPDATE book SET title = ?2, author = ?3, publisher = ?4, \
             publicationyear = ?5, price = ?6 WHERE id = ?1",
            params![
                book.id,
                book.title,
                book.author,
                book.publisher,
                book.publication_year,
                book.price
            ],
        )?;
        if affected == 0 {
            Ok(UpdateOutcome::NotFound)
        } else {
            Ok(UpdateOutcome::Updated(book))
        }
    }
}
