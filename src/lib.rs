//! # Bookstore Backend
//!
//! Inventory and purchase tracking for a small bookstore: clients, books,
//! and the purchases joining them, plus two analytic reports (top-3
//! clients by money spent, top-3 best-selling books).
//!
//! The backend is split into two layers:
//! - [`storage`]: the [`Repository`](storage::Repository) contract and
//!   four interchangeable backends (in-memory maps, CSV flat files, XML
//!   documents, SQLite).
//! - [`domain`]: entity models, structural validation, and the services
//!   that enforce referential integrity and compute the reports.
//!
//! [`config`] wires a chosen backend into a ready-to-use [`Bookstore`].
//! Everything is synchronous; a transport layer (RPC, UI) sits on top and
//! is not part of this crate.

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;

pub use config::{Bookstore, StorageConfig};
pub use error::{BookstoreError, Result};
