//! In-memory search history ledger.
//!
//! Entries are kept in insertion order behind a single `RwLock`, so
//! concurrent `record`, `delete`, and `list` calls never observe a torn
//! sequence. Listing walks the sequence backwards: page 1 always starts
//! with the most recently recorded surviving entry.
//!
//! `record` reads the clock while holding the write lock and never stamps
//! an entry earlier than the newest one, so timestamps and insertion order
//! always agree.
//!
//! History is volatile and lost on restart.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use uuid::Uuid;

use crate::models::{HistoryEntry, HistoryPage, SearchMatch, TopResult};

/// Largest page size `list` will honor.
pub const MAX_PAGE_SIZE: usize = 100;

/// Digits of fractional seconds kept on entry timestamps.
const TIMESTAMP_PRECISION: u16 = 6;

#[derive(Debug, Default)]
struct Entries {
    items: Vec<HistoryEntry>,
    /// Timestamp of the newest entry ever appended, deleted or not.
    latest: Option<DateTime<Utc>>,
}

impl Entries {
    fn push(&mut self, query: &str, matches: &[SearchMatch], at: DateTime<Utc>) -> String {
        let entry = HistoryEntry {
            id: Uuid::new_v4().simple().to_string(),
            query: query.to_string(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Micros, true),
            results_count: matches.len(),
            top_result: matches.first().map(TopResult::from),
        };
        let id = entry.id.clone();
        self.items.push(entry);
        self.latest = Some(self.latest.map_or(at, |l| l.max(at)));
        id
    }
}

/// Append-and-delete log of executed searches.
#[derive(Debug, Default)]
pub struct HistoryLedger {
    entries: RwLock<Entries>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a search at the current time and return the new entry id.
    ///
    /// `matches` must be ranked best first; the first one becomes the
    /// entry's top-result preview. If the clock reads earlier than the
    /// newest entry, the newest entry's timestamp is reused.
    pub fn record(&self, query: &str, matches: &[SearchMatch]) -> String {
        let mut entries = self.write();
        let now = Utc::now().trunc_subsecs(TIMESTAMP_PRECISION);
        let at = entries.latest.map_or(now, |latest| latest.max(now));
        entries.push(query, matches, at)
    }

    /// Record a search with an explicit timestamp.
    ///
    /// The entry is appended, so callers must supply timestamps in
    /// chronological order to keep the ledger sorted by time.
    pub fn record_at(&self, query: &str, matches: &[SearchMatch], at: DateTime<Utc>) -> String {
        let at = at.trunc_subsecs(TIMESTAMP_PRECISION);
        self.write().push(query, matches, at)
    }

    /// Return one page of history, newest first.
    ///
    /// `page` is 1-based. Out-of-range arguments are clamped (`page` to at
    /// least 1, `page_size` to `1..=MAX_PAGE_SIZE`). A page past the end has
    /// no entries but still reports the full `total`.
    pub fn list(&self, page: usize, page_size: usize) -> HistoryPage {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let skip = (page - 1).saturating_mul(page_size);

        let entries = self.read();
        HistoryPage {
            total: entries.items.len(),
            page,
            page_size,
            entries: entries
                .items
                .iter()
                .rev()
                .skip(skip)
                .take(page_size)
                .cloned()
                .collect(),
        }
    }

    /// Remove the entry with `id`. Returns `false` if no such entry exists.
    pub fn delete(&self, id: &str) -> bool {
        let mut entries = self.write();
        match entries.items.iter().position(|e| e.id == id) {
            Some(idx) => {
                entries.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    // A panic while holding the lock cannot leave the Vec half-modified,
    // so a poisoned lock is safe to keep using.
    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
