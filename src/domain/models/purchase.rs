use serde::{Deserialize, Serialize};

use crate::storage::Entity;

/// One sale: a client bought a book at some library branch.
///
/// `client_id` and `book_id` are non-owning references; the purchase
/// service checks that both resolve before any write. `library` names the
/// branch where the sale happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: u32,
    pub client_id: u32,
    pub book_id: u32,
    pub library: String,
}

impl Purchase {
    /// A purchase as supplied by callers: the id stays nil until the
    /// purchase service assigns one on `add`.
    pub fn new(client_id: u32, book_id: u32, library: impl Into<String>) -> Self {
        Self {
            id: 0,
            client_id,
            book_id,
            library: library.into(),
        }
    }
}

impl Entity for Purchase {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}
