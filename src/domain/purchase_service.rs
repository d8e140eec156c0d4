use std::sync::Arc;

use log::{debug, info, warn};

use crate::domain::book_service::BookService;
use crate::domain::client_service::ClientService;
use crate::domain::models::{Book, Client, Purchase};
use crate::domain::validators;
use crate::error::{BookstoreError, Result};
use crate::storage::{EntityId, Repository, SaveOutcome, UpdateOutcome};

/// Purchase bookkeeping and the two sales reports.
///
/// Holds read-only views of the client and book services for
/// referential-integrity checks; it never mutates their repositories.
/// Deleting a client or book does not cascade here: dependent purchases
/// stay behind until a caller removes them explicitly (see
/// [`delete_purchases_for_client`] / [`delete_purchases_for_book`]).
///
/// [`delete_purchases_for_client`]: PurchaseService::delete_purchases_for_client
/// [`delete_purchases_for_book`]: PurchaseService::delete_purchases_for_book
pub struct PurchaseService {
    clients: Arc<ClientService>,
    books: Arc<BookService>,
    repository: Box<dyn Repository<Purchase>>,
}

impl PurchaseService {
    pub fn new(
        clients: Arc<ClientService>,
        books: Arc<BookService>,
        repository: Box<dyn Repository<Purchase>>,
    ) -> Self {
        Self {
            clients,
            books,
            repository,
        }
    }

    /// Both referenced ids must resolve at the time of the write.
    fn references_resolve(&self, purchase: &Purchase) -> Result<bool> {
        if purchase.client_id.is_nil() || purchase.book_id.is_nil() {
            return Ok(false);
        }
        Ok(self.clients.find_one(purchase.client_id)?.is_some()
            && self.books.find_one(purchase.book_id)?.is_some())
    }

    /// First free purchase id, computed against the current repository
    /// state on every call; ids are never cached across calls.
    fn next_available_id(&self) -> Result<u32> {
        let purchases = self.repository.find_all()?;
        Ok(purchases
            .iter()
            .map(|purchase| purchase.id)
            .max()
            .map_or(1, |max| max + 1))
    }

    /// Record a new purchase, assigning its id. The supplied id is ignored.
    pub fn add(&self, purchase: Purchase) -> Result<Purchase> {
        if !self.references_resolve(&purchase)? {
            warn!(
                "Rejecting purchase: client {} and/or book {} does not resolve",
                purchase.client_id, purchase.book_id
            );
            return Err(BookstoreError::InvalidReference);
        }
        validators::validate_purchase(&purchase)?;

        let mut purchase = purchase;
        purchase.id = self.next_available_id()?;
        info!(
            "Adding purchase {} (client {}, book {}, library {})",
            purchase.id, purchase.client_id, purchase.book_id, purchase.library
        );
        match self.repository.save(purchase.clone())? {
            SaveOutcome::Inserted => Ok(purchase),
            // Only reachable when another writer grabbed the id between the
            // max(ids) scan and the insert.
            SaveOutcome::Conflict(_) => Err(BookstoreError::Storage(format!(
                "purchase id {} was taken concurrently",
                purchase.id
            ))),
        }
    }

    /// Replace a stored purchase. The replacement's references are checked
    /// the same way as on `add`.
    pub fn update_purchase(&self, purchase: Purchase) -> Result<UpdateOutcome<Purchase>> {
        if !self.references_resolve(&purchase)? {
            warn!(
                "Rejecting purchase update {}: client {} and/or book {} does not resolve",
                purchase.id, purchase.client_id, purchase.book_id
            );
            return Err(BookstoreError::InvalidReference);
        }
        validators::validate_purchase(&purchase)?;
        info!("Updating purchase {}", purchase.id);
        self.repository.update(purchase)
    }

    pub fn delete_purchase(&self, id: u32) -> Result<Option<Purchase>> {
        info!("Deleting purchase {}", id);
        self.repository.delete(id)
    }

    pub fn find_one(&self, id: u32) -> Result<Option<Purchase>> {
        self.repository.find_one(id)
    }

    pub fn list_purchases(&self) -> Result<Vec<Purchase>> {
        self.repository.find_all()
    }

    /// Remove every purchase referencing the given client. Returns how
    /// many were removed. This cleanup is always explicit; deleting the
    /// client itself does not trigger it.
    pub fn delete_purchases_for_client(&self, client_id: u32) -> Result<u32> {
        let purchases = self.repository.find_all()?;
        let mut removed = 0;
        for purchase in purchases
            .into_iter()
            .filter(|purchase| purchase.client_id == client_id)
        {
            if self.repository.delete(purchase.id)?.is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            info!("Removed {} purchases of client {}", removed, client_id);
        }
        Ok(removed)
    }

    /// Remove every purchase referencing the given book.
    pub fn delete_purchases_for_book(&self, book_id: u32) -> Result<u32> {
        let purchases = self.repository.find_all()?;
        let mut removed = 0;
        for purchase in purchases
            .into_iter()
            .filter(|purchase| purchase.book_id == book_id)
        {
            if self.repository.delete(purchase.id)?.is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            info!("Removed {} purchases of book {}", removed, book_id);
        }
        Ok(removed)
    }

    /// Total spent by one client. A purchase whose book no longer resolves
    /// contributes nothing; it is not an error.
    fn money_spent(&self, client_id: u32, purchases: &[Purchase]) -> Result<f64> {
        let mut total = 0.0;
        for purchase in purchases
            .iter()
            .filter(|purchase| purchase.client_id == client_id)
        {
            if let Some(book) = self.books.find_one(purchase.book_id)? {
                total += book.price;
            }
        }
        Ok(total)
    }

    /// The three clients who spent the most, highest first. Clients with
    /// no purchases are ranked too, at 0.0; fewer than three clients give
    /// a shorter list.
    pub fn report_top3_clients_by_money_spent(&self) -> Result<Vec<(Client, f64)>> {
        debug!("Computing top-3 clients by money spent");
        let purchases = self.repository.find_all()?;

        let mut totals = Vec::new();
        for client in self.clients.list_clients()? {
            let spent = self.money_spent(client.id, &purchases)?;
            totals.push((client, spent));
        }
        totals.sort_by(|a, b| b.1.total_cmp(&a.1));
        totals.truncate(3);
        Ok(totals)
    }

    /// The three most-sold books, highest first. Books that never sold are
    /// ranked too, at count 0.
    pub fn report_top3_best_selling_books(&self) -> Result<Vec<(Book, u64)>> {
        debug!("Computing top-3 best-selling books");
        let purchases = self.repository.find_all()?;

        let mut sales = Vec::new();
        for book in self.books.list_books()? {
            let count = purchases
                .iter()
                .filter(|purchase| purchase.book_id == book.id)
                .count() as u64;
            sales.push((book, count));
        }
        sales.sort_by(|a, b| b.1.cmp(&a.1));
        sales.truncate(3);
        Ok(sales)
    }
}
