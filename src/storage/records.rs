//! Flat-record mappings for the file-backed stores. Field order here is
//! the CSV column order and the XML tag order; tag names keep the wire
//! spelling (`firstName`, `publicationYear`) rather than the Rust one.

use std::fmt::Display;
use std::str::FromStr;

use crate::domain::models::{Book, Client, Purchase};
use crate::error::{BookstoreError, Result};
use crate::storage::file::FileRecord;

fn parse_field<T: FromStr>(field: &str, name: &str) -> Result<T>
where
    T::Err: Display,
{
    field
        .trim()
        .parse()
        .map_err(|err| BookstoreError::Storage(format!("bad {name} value {field:?}: {err}")))
}

fn check_len(fields: &[String], expected: usize, record: &str) -> Result<()> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(BookstoreError::Storage(format!(
            "{record} record has {} fields, expected {expected}",
            fields.len()
        )))
    }
}

impl FileRecord for Client {
    const COLLECTION: &'static str = "clients";
    const RECORD: &'static str = "client";
    const FIELDS: &'static [&'static str] = &["id", "firstName", "lastName", "address"];

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.address.clone(),
        ]
    }

    fn from_fields(fields: &[String]) -> Result<Self> {
        check_len(fields, Self::FIELDS.len(), Self::RECORD)?;
        Ok(Client {
            id: parse_field(&fields[0], "id")?,
            first_name: fields[1].clone(),
            last_name: fields[2].clone(),
            address: fields[3].clone(),
        })
    }
}

impl FileRecord for Book {
    const COLLECTION: &'static str = "books";
    const RECORD: &'static str = "book";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "title",
        "author",
        "publisher",
        "publicationYear",
        "price",
    ];

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.author.clone(),
            self.publisher.clone(),
            self.publication_year.to_string(),
            self.price.to_string(),
        ]
    }

    fn from_fields(fields: &[String]) -> Result<Self> {
        check_len(fields, Self::FIELDS.len(), Self::RECORD)?;
        Ok(Book {
            id: parse_field(&fields[0], "id")?,
            title: fields[1].clone(),
            author: fields[2].clone(),
            publisher: fields[3].clone(),
            publication_year: parse_field(&fields[4], "publicationYear")?,
            price: parse_field(&fields[5], "price")?,
        })
    }
}

impl FileRecord for Purchase {
    const COLLECTION: &'static str = "purchases";
    const RECORD: &'static str = "purchase";
    const FIELDS: &'static [&'static str] = &["id", "clientId", "bookId", "library"];

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.client_id.to_string(),
            self.book_id.to_string(),
            self.library.clone(),
        ]
    }

    fn from_fields(fields: &[String]) -> Result<Self> {
        check_len(fields, Self::FIELDS.len(), Self::RECORD)?;
        Ok(Purchase {
            id: parse_field(&fields[0], "id")?,
            client_id: parse_field(&fields[1], "clientId")?,
            book_id: parse_field(&fields[2], "bookId")?,
            library: fields[3].clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_fields_follow_declaration_order() {
        let book = Book::new(7, "Dune", "Frank Herbert", "Chilton", 1965, 31.5);
        assert_eq!(
            book.to_fields(),
            vec!["7", "Dune", "Frank Herbert", "Chilton", "1965", "31.5"]
        );
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let fields: Vec<String> = ["1", "Ana", "Pop"].iter().map(|s| s.to_string()).collect();
        assert!(Client::from_fields(&fields).is_err());
    }

    #[test]
    fn numeric_fields_reject_garbage() {
        let fields: Vec<String> = ["1", "4", "not-a-book", "Central"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(Purchase::from_fields(&fields).is_err());
    }
}
