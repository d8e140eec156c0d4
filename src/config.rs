//! Backend selection and wiring.
//!
//! The services are agnostic of how their repository was constructed; this
//! module is the one place that knows. A [`StorageConfig`] names the
//! backend (read from a YAML file or built in code) and [`StorageConfig::open`]
//! turns it into a fully wired [`Bookstore`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::domain::models::{Book, Client, Purchase};
use crate::domain::{BookService, ClientService, PurchaseService};
use crate::error::Result;
use crate::storage::{CsvFormat, Database, FileRepository, InMemoryRepository, Repository, XmlFormat};

/// Which storage backend the services run on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Volatile in-memory maps.
    Memory,
    /// CSV flat files `clients.csv` / `books.csv` / `purchases.csv` under
    /// `data_dir`.
    Csv { data_dir: PathBuf },
    /// XML documents `clients.xml` / `books.xml` / `purchases.xml` under
    /// `data_dir`.
    Xml { data_dir: PathBuf },
    /// A SQLite database file.
    Sqlite { path: PathBuf },
}

impl StorageConfig {
    /// Read a configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Ok(serde_yaml::from_str(&text)?)
    }

    /// Build the three repositories and wire the services around them.
    pub fn open(&self) -> Result<Bookstore> {
        info!("Opening bookstore with {:?}", self);

        let clients: Box<dyn Repository<Client>>;
        let books: Box<dyn Repository<Book>>;
        let purchases: Box<dyn Repository<Purchase>>;

        match self {
            StorageConfig::Memory => {
                clients = Box::new(InMemoryRepository::<Client>::new());
                books = Box::new(InMemoryRepository::<Book>::new());
                purchases = Box::new(InMemoryRepository::<Purchase>::new());
            }
            StorageConfig::Csv { data_dir } => {
                fs::create_dir_all(data_dir)?;
                clients = Box::new(FileRepository::<Client, _>::open(
                    data_dir.join("clients.csv"),
                    CsvFormat,
                )?);
                books = Box::new(FileRepository::<Book, _>::open(
                    data_dir.join("books.csv"),
                    CsvFormat,
                )?);
                purchases = Box::new(FileRepository::<Purchase, _>::open(
                    data_dir.join("purchases.csv"),
                    CsvFormat,
                )?);
            }
            StorageConfig::Xml { data_dir } => {
                fs::create_dir_all(data_dir)?;
                clients = Box::new(FileRepository::<Client, _>::open(
                    data_dir.join("clients.xml"),
                    XmlFormat,
                )?);
                books = Box::new(FileRepository::<Book, _>::open(
                    data_dir.join("books.xml"),
                    XmlFormat,
                )?);
                purchases = Box::new(FileRepository::<Purchase, _>::open(
                    data_dir.join("purchases.xml"),
                    XmlFormat,
                )?);
            }
            StorageConfig::Sqlite { path } => {
                let db = Database::open(path)?;
                clients = Box::new(db.clients());
                books = Box::new(db.books());
                purchases = Box::new(db.purchases());
            }
        }

        Ok(Bookstore::new(clients, books, purchases))
    }
}

/// The wired service graph, ready for a transport or UI layer to call.
pub struct Bookstore {
    pub clients: Arc<ClientService>,
    pub books: Arc<BookService>,
    pub purchases: PurchaseService,
}

impl Bookstore {
    pub fn new(
        clients: Box<dyn Repository<Client>>,
        books: Box<dyn Repository<Book>>,
        purchases: Box<dyn Repository<Purchase>>,
    ) -> Self {
        let clients = Arc::new(ClientService::new(clients));
        let books = Arc::new(BookService::new(books));
        let purchases = PurchaseService::new(clients.clone(), books.clone(), purchases);
        Self {
            clients,
            books,
            purchases,
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn yaml_selects_the_backend() {
        let memory: StorageConfig = serde_yaml::from_str("backend: memory").unwrap();
        assert!(matches!(memory, StorageConfig::Memory));

        let csv: StorageConfig =
            serde_yaml::from_str("backend: csv\ndata_dir: /tmp/bookstore").unwrap();
        match csv {
            StorageConfig::Csv { data_dir } => {
                assert_eq!(data_dir, PathBuf::from("/tmp/bookstore"));
            }
            other => panic!("expected csv config, got {other:?}"),
        }

        let sqlite: StorageConfig =
            serde_yaml::from_str("backend: sqlite\npath: bookstore.db").unwrap();
        assert!(matches!(sqlite, StorageConfig::Sqlite { .. }));
    }

    #[test]
    fn config_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookstore.yaml");
        std::fs::write(&path, "backend: xml\ndata_dir: data\n").unwrap();

        let config = StorageConfig::from_file(&path).unwrap();
        assert!(matches!(config, StorageConfig::Xml { .. }));
    }

    #[test]
    fn wired_services_share_one_referential_world() {
        let store = StorageConfig::Memory.open().unwrap();
        store
            .clients
            .add_client(Client::new(1, "Ana", "Pop", "ana@home"))
            .unwrap();
        store
            .books
            .add_book(Book::new(1, "Dune", "Frank Herbert", "Chilton", 1965, 10.0))
            .unwrap();

        let purchase = store.purchases.add(Purchase::new(1, 1, "Central")).unwrap();
        assert_eq!(purchase.id, 1);

        let report = store.purchases.report_top3_best_selling_books().unwrap();
        assert_eq!(report[0].1, 1);
    }

    #[test]
    fn csv_backend_survives_a_reopen() {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig::Csv {
            data_dir: dir.path().join("data"),
        };

        {
            let store = config.open().unwrap();
            store
                .clients
                .add_client(Client::new(1, "Ana", "Pop", "ana@home"))
                .unwrap();
            store
                .books
                .add_book(Book::new(1, "Dune", "Frank Herbert", "Chilton", 1965, 10.0))
                .unwrap();
            store.purchases.add(Purchase::new(1, 1, "Central")).unwrap();
        }

        let store = config.open().unwrap();
        assert_eq!(store.clients.list_clients().unwrap().len(), 1);
        assert_eq!(store.purchases.list_purchases().unwrap().len(), 1);
        assert_eq!(
            store.purchases.report_top3_clients_by_money_spent().unwrap()[0].1,
            10.0
        );
    }
}
