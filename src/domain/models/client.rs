use serde::{Deserialize, Serialize};

use crate::storage::Entity;

/// A registered client of the bookstore.
///
/// The address doubles as a contact token and must contain an `@`; it is
/// not required to be a well-formed e-mail address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
}

impl Client {
    pub fn new(
        id: u32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
        }
    }
}

impl Entity for Client {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

// Value equality: two clients with the same names and address are equal
// regardless of which ids they were stored under.
impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.address == other.address
    }
}
