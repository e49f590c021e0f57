//! # Space Search Core
//!
//! Runtime-free logic for Space Search: the catalog of imagery records,
//! the keyword-overlap search engine, and the in-memory search history
//! ledger.
//!
//! This crate contains no tokio, HTTP, filesystem I/O, or logging. The
//! application crate owns loading files from disk and serving requests.

pub mod catalog;
pub mod error;
pub mod history;
pub mod models;
pub mod search;
pub mod seed;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use history::HistoryLedger;
pub use models::{HistoryEntry, HistoryPage, SearchMatch, SourceRecord, TopResult};
