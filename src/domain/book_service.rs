use log::{debug, info};

use crate::domain::models::Book;
use crate::domain::validators;
use crate::error::Result;
use crate::storage::{Repository, SaveOutcome, UpdateOutcome};

/// Service for managing the book catalog.
pub struct BookService {
    repository: Box<dyn Repository<Book>>,
}

impl BookService {
    pub fn new(repository: Box<dyn Repository<Book>>) -> Self {
        Self { repository }
    }

    /// Validate and store a new book.
    pub fn add_book(&self, book: Book) -> Result<SaveOutcome<Book>> {
        info!("Adding book {}: {}", book.id, book.title);
        validators::validate_book(&book)?;
        self.repository.save(book)
    }

    /// Validate and replace the stored book with the same id.
    pub fn update_book(&self, book: Book) -> Result<UpdateOutcome<Book>> {
        info!("Updating book {}", book.id);
        validators::validate_book(&book)?;
        self.repository.update(book)
    }

    pub fn delete_book(&self, id: u32) -> Result<Option<Book>> {
        info!("Deleting book {}", id);
        self.repository.delete(id)
    }

    pub fn find_one(&self, id: u32) -> Result<Option<Book>> {
        self.repository.find_one(id)
    }

    pub fn list_books(&self) -> Result<Vec<Book>> {
        self.repository.find_all()
    }

    /// Books where `search` occurs literally (case-sensitive) in the
    /// title, author, or publisher.
    pub fn filter_books(&self, search: &str) -> Result<Vec<Book>> {
        debug!("Filtering books by {:?}", search);
        let books = self.repository.find_all()?;
        Ok(books
            .into_iter()
            .filter(|book| {
                book.title.contains(search)
                    || book.author.contains(search)
                    || book.publisher.contains(search)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryRepository;

    fn service() -> BookService {
        BookService::new(Box::new(InMemoryRepository::<Book>::new()))
    }

    #[test]
    fn invalid_book_is_rejected_before_any_write() {
        let service = service();

        let err = service
            .add_book(Book::new(1, "Dune", "Frank Herbert", "Chilton", 1931, 5.0))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(service.list_books().unwrap().is_empty());
    }

    #[test]
    fn save_conflict_is_reported_to_the_caller() {
        let service = service();
        service
            .add_book(Book::new(1, "Dune", "Frank Herbert", "Chilton", 1965, 31.5))
            .unwrap();

        let outcome = service
            .add_book(Book::new(1, "Solaris", "Stanislaw Lem", "Walker", 1970, 18.0))
            .unwrap();
        assert_eq!(outcome.conflicting().unwrap().title, "Dune");
    }

    #[test]
    fn filter_matches_title_author_and_publisher() {
        let service = service();
        service
            .add_book(Book::new(1, "Dune", "Frank Herbert", "Chilton", 1965, 31.5))
            .unwrap();
        service
            .add_book(Book::new(2, "Solaris", "Stanislaw Lem", "Walker", 1970, 18.0))
            .unwrap();
        service
            .add_book(Book::new(3, "Dune Messiah", "Frank Herbert", "Putnam", 1969, 22.0))
            .unwrap();

        assert_eq!(service.filter_books("Dune").unwrap().len(), 2);
        assert_eq!(service.filter_books("Herbert").unwrap().len(), 2);
        assert_eq!(service.filter_books("Walker").unwrap().len(), 1);
        assert!(service.filter_books("dune").unwrap().is_empty());
    }
}
