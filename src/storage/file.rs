//! File-backed repository: an in-memory store wrapped with a
//! load-on-construct / rewrite-after-mutate persistence lifecycle,
//! parameterized by a pluggable serialization format.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::Result;
use crate::storage::memory::InMemoryRepository;
use crate::storage::traits::{Entity, Repository, SaveOutcome, UpdateOutcome};

/// Flat-record mapping for one entity kind. The declared field order is
/// both the CSV column order and the XML tag order.
pub trait FileRecord: Entity<Id = u32> {
    /// Root element name of the XML document (`books`, `clients`, ...).
    const COLLECTION: &'static str;
    /// Per-entity element name (`book`, `client`, ...).
    const RECORD: &'static str;
    /// Field names, in declaration order.
    const FIELDS: &'static [&'static str];

    fn to_fields(&self) -> Vec<String>;
    fn from_fields(fields: &[String]) -> Result<Self>;
}

/// Serialization strategy for a whole dataset.
pub trait FileFormat<E: FileRecord>: Send + Sync {
    /// Load the dataset. A missing file is an empty dataset; a malformed
    /// record is skipped and logged, never fatal.
    fn load(&self, path: &Path) -> Result<Vec<E>>;

    /// Rewrite the whole dataset, replacing the file's previous content.
    fn store(&self, path: &Path, entities: &[E]) -> Result<()>;
}

/// Repository persisted to a single file.
///
/// The file is read once, synchronously, at construction. After every
/// mutation that changed state the entire dataset is serialized back,
/// overwriting the file; the rewrite is not atomic against concurrent
/// external readers.
pub struct FileRepository<E: FileRecord, F: FileFormat<E>> {
    store: InMemoryRepository<E>,
    path: PathBuf,
    format: F,
}

impl<E: FileRecord, F: FileFormat<E>> FileRepository<E, F> {
    pub fn open(path: impl Into<PathBuf>, format: F) -> Result<Self> {
        let path = path.into();
        let store = InMemoryRepository::new();

        let records = format.load(&path)?;
        debug!("loaded {} <{}> records from {}", records.len(), E::RECORD, path.display());
        for entity in records {
            match store.save(entity) {
                Ok(SaveOutcome::Inserted) => {}
                Ok(SaveOutcome::Conflict(_)) => {
                    warn!(
                        "duplicate {} id in {}, keeping the first record",
                        E::RECORD,
                        path.display()
                    );
                }
                Err(err) => {
                    warn!("skipping {} record in {}: {}", E::RECORD, path.display(), err);
                }
            }
        }

        Ok(Self { store, path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let mut entities = self.store.find_all()?;
        entities.sort_by_key(|entity| entity.id());
        self.format.store(&self.path, &entities)
    }
}

impl<E: FileRecord, F: FileFormat<E>> Repository<E> for FileRepository<E, F> {
    fn find_one(&self, id: E::Id) -> Result<Option<E>> {
        self.store.find_one(id)
    }

    fn find_all(&self) -> Result<Vec<E>> {
        self.store.find_all()
    }

    fn save(&self, entity: E) -> Result<SaveOutcome<E>> {
        let outcome = self.store.save(entity)?;
        if outcome.is_inserted() {
            self.persist()?;
        }
        Ok(outcome)
    }

    fn delete(&self, id: E::Id) -> Result<Option<E>> {
        let removed = self.store.delete(id)?;
        if removed.is_some() {
            self.persist()?;
        }
        Ok(removed)
    }

    fn update(&self, entity: E) -> Result<UpdateOutcome<E>> {
        let outcome = self.store.update(entity)?;
        if outcome.is_updated() {
            self.persist()?;
        }
        Ok(outcome)
    }
}
