//! Structural validation, one pure function per entity kind.
//!
//! Every invariant is checked independently; a failing entity produces a
//! single error carrying all of its violated rules, not just the first.

use crate::domain::models::{Book, Client, Purchase};
use crate::error::{BookstoreError, Result};
use crate::storage::EntityId;

fn reject_if_any(kind: &str, violations: Vec<&str>) -> Result<()> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(BookstoreError::Validation(format!(
            "{kind}: {}",
            violations.join("; ")
        )))
    }
}

pub fn validate_client(client: &Client) -> Result<()> {
    let mut violations = Vec::new();
    if client.first_name.is_empty() {
        violations.push("first name must not be empty");
    }
    if client.last_name.is_empty() {
        violations.push("last name must not be empty");
    }
    if client.address.is_empty() || !client.address.contains('@') {
        violations.push("address must contain an '@' contact token");
    }
    reject_if_any("client", violations)
}

pub fn validate_book(book: &Book) -> Result<()> {
    let mut violations = Vec::new();
    if book.title.is_empty() {
        violations.push("title must not be empty");
    }
    if book.author.is_empty() {
        violations.push("author must not be empty");
    }
    if book.publisher.is_empty() {
        violations.push("publisher must not be empty");
    }
    if !(1950..=2020).contains(&book.publication_year) {
        violations.push("publication year must be between 1950 and 2020");
    }
    if book.price <= 0.0 {
        violations.push("price must be positive");
    }
    reject_if_any("book", violations)
}

pub fn validate_purchase(purchase: &Purchase) -> Result<()> {
    let mut violations = Vec::new();
    if purchase.client_id.is_nil() {
        violations.push("client id must be assigned");
    }
    if purchase.book_id.is_nil() {
        violations.push("book id must be assigned");
    }
    if purchase.library.is_empty() {
        violations.push("library must not be empty");
    }
    reject_if_any("purchase", violations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_entities_pass() {
        validate_client(&Client::new(1, "Ana", "Pop", "ana@home")).unwrap();
        validate_book(&Book::new(1, "Dune", "Frank Herbert", "Chilton", 1965, 31.5)).unwrap();
        validate_purchase(&Purchase {
            id: 1,
            client_id: 1,
            book_id: 1,
            library: "Central".to_string(),
        })
        .unwrap();
    }

    #[test]
    fn all_violations_are_accumulated_into_one_message() {
        let err = validate_book(&Book::new(1, "", "", "Chilton", 1880, -4.0)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("title"));
        assert!(message.contains("author"));
        assert!(message.contains("publication year"));
        assert!(message.contains("price"));
        assert!(!message.contains("publisher must"));
    }

    #[test]
    fn address_without_contact_token_is_invalid() {
        let err = validate_client(&Client::new(1, "Ana", "Pop", "str. Unirii 3")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn boundary_publication_years_are_accepted() {
        validate_book(&Book::new(1, "A", "B", "C", 1950, 1.0)).unwrap();
        validate_book(&Book::new(2, "A", "B", "C", 2020, 1.0)).unwrap();
        assert!(validate_book(&Book::new(3, "A", "B", "C", 1949, 1.0)).is_err());
        assert!(validate_book(&Book::new(4, "A", "B", "C", 2021, 1.0)).is_err());
    }
}
