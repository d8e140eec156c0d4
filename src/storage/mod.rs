//! Storage layer: the repository contract and its four backends
//! (in-memory, CSV file, XML document, SQLite).

pub mod file;
pub mod memory;
pub mod sqlite;
pub mod traits;

mod csv_format;
mod records;
mod xml_format;

pub use csv_format::CsvFormat;
pub use file::{FileFormat, FileRecord, FileRepository};
pub use memory::InMemoryRepository;
pub use sqlite::Database;
pub use traits::{Entity, EntityId, Repository, SaveOutcome, UpdateOutcome};
pub use xml_format::XmlFormat;
