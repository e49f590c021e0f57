//! Error types for catalog loading.

use thiserror::Error;

/// Errors raised while building a [`Catalog`](crate::Catalog) from raw input.
///
/// Both variants are fatal: a catalog is either loaded whole or not at all.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Input was not valid JSON, or a field had the wrong JSON type.
    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input was valid JSON but not the expected `collection.items` shape.
    #[error("Catalog shape error: {0}")]
    Shape(String),
}
