//! Read-only catalog of imagery records.
//!
//! The catalog is built once from a NASA-style image collection:
//!
//! ```json
//! { "collection": { "items": [
//!     { "data":  [{ "title": "...", "media_type": "image",
//!                   "date_created": "...", "description": "..." }],
//!       "links": [{ "href": "https://...", "render": "image" }] }
//! ] } }
//! ```
//!
//! Only the first `data` element of each item is read. The image URL comes
//! from the first link rendered as `"image"`. Records get sequential 1-based
//! ids in input order.

use serde::Deserialize;

use crate::error::CatalogError;
use crate::models::{SourceRecord, ACTIVE_STATUS};

#[derive(Debug, Deserialize)]
struct RawCatalog {
    collection: RawCollection,
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    data: Vec<RawData>,
    #[serde(default)]
    links: Vec<RawLink>,
}

#[derive(Debug, Default, Deserialize)]
struct RawData {
    title: Option<String>,
    media_type: Option<String>,
    date_created: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    href: Option<String>,
    render: Option<String>,
}

/// The fixed set of records available for browsing and search.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<SourceRecord>,
}

impl Catalog {
    /// Wrap already-built records. Callers are responsible for id uniqueness.
    pub fn from_records(records: Vec<SourceRecord>) -> Self {
        Self { records }
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(input: &str) -> Result<Self, CatalogError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Build a catalog from a parsed JSON document.
    ///
    /// Fails if the document is not an object with a `collection.items`
    /// array, or if any item has fields of the wrong type.
    pub fn from_value(value: serde_json::Value) -> Result<Self, CatalogError> {
        let has_items = value
            .get("collection")
            .and_then(|c| c.get("items"))
            .is_some_and(serde_json::Value::is_array);
        if !has_items {
            return Err(CatalogError::Shape(
                "expected an object with a `collection.items` array".to_string(),
            ));
        }

        let raw: RawCatalog = serde_json::from_value(value)?;
        let records = raw
            .collection
            .items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| to_record(idx as u64 + 1, item))
            .collect();

        Ok(Self { records })
    }

    /// All records in load order.
    pub fn all(&self) -> &[SourceRecord] {
        &self.records
    }

    /// Look up a record by id.
    pub fn get(&self, id: u64) -> Option<&SourceRecord> {
        // Ids are positional, but don't rely on it for hand-built catalogs.
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn to_record(id: u64, item: RawItem) -> SourceRecord {
    let data = item.data.into_iter().next().unwrap_or_default();
    let image_url = item
        .links
        .into_iter()
        .find(|l| l.render.as_deref() == Some("image"))
        .and_then(|l| l.href);

    SourceRecord {
        id,
        name: data.title.unwrap_or_else(|| format!("Item {}", id)),
        kind: data.media_type.unwrap_or_else(|| "unknown".to_string()),
        launch_date: data.date_created.unwrap_or_default(),
        description: data.description.unwrap_or_default(),
        image_url,
        status: ACTIVE_STATUS.to_string(),
    }
}
