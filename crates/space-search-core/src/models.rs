//! Core data models shared by the catalog, search engine, and history ledger.
//!
//! Field names serialize in snake_case, matching the JSON API.

use serde::{Deserialize, Serialize};

/// Status assigned to every catalog record at load time.
pub const ACTIVE_STATUS: &str = "Active";

/// An imagery record from the catalog. Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// 1-based position in the source collection.
    pub id: u64,
    pub name: String,
    /// Media type, e.g. `"image"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form creation date text. May be empty.
    pub launch_date: String,
    pub description: String,
    pub image_url: Option<String>,
    pub status: String,
}

/// A catalog record paired with its relevance to a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMatch {
    #[serde(flatten)]
    pub record: SourceRecord,
    /// Percentage of query tokens found in the record, in `[0, 100]`.
    pub confidence: f64,
}

/// Compact preview of the best match, kept on a history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopResult {
    pub name: String,
    pub confidence: f64,
    pub image_url: Option<String>,
}

impl From<&SearchMatch> for TopResult {
    fn from(m: &SearchMatch) -> Self {
        Self {
            name: m.record.name.clone(),
            confidence: m.confidence,
            image_url: m.record.image_url.clone(),
        }
    }
}

/// One executed search, as stored by the [`HistoryLedger`](crate::HistoryLedger).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 32-character lowercase hex identifier.
    pub id: String,
    pub query: String,
    /// ISO 8601 UTC timestamp.
    pub timestamp: String,
    pub results_count: usize,
    pub top_result: Option<TopResult>,
}

/// A page of history, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    /// Number of surviving entries across all pages.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub entries: Vec<HistoryEntry>,
}
