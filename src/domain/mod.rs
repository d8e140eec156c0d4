//! Domain layer: entity models, validation, and the services callers talk
//! to. Services validate, enforce referential integrity, and delegate all
//! storage to the repository they were wired with.

pub mod book_service;
pub mod client_service;
pub mod models;
pub mod purchase_service;
pub mod validators;

pub use book_service::BookService;
pub use client_service::ClientService;
pub use purchase_service::PurchaseService;
