//! Demo history seeding.
//!
//! Populates a ledger with canned searches spread over the last six
//! months so a fresh server has something to page through. Nothing calls
//! this implicitly; the application enables it with `history.seed_demo`.

use chrono::{DateTime, Duration, Utc};

use crate::catalog::Catalog;
use crate::history::HistoryLedger;
use crate::search::search;

/// Canned queries, mixing one-, two-, and three-word searches.
pub const DEMO_QUERIES: [&str; 21] = [
    "mars",
    "hubble telescope",
    "apollo mission",
    "moon landing",
    "satellite",
    "astronaut spacewalk",
    "earth from space",
    "solar system",
    "telescope",
    "jupiter moons",
    "venus surface",
    "nebula",
    "galaxy clusters",
    "space station",
    "rocket launch",
    "spacewalk",
    "planet earth",
    "comet tail",
    "asteroid belt",
    "eclipse",
    "shuttle mission",
];

/// Record every [`DEMO_QUERIES`] search against `catalog` into `ledger`.
///
/// The first four land within the last hour, the next four within the
/// last day, and the rest across the last 180 days. Entries are recorded
/// oldest first, so the ledger stays in chronological order. Returns the
/// number of entries written.
pub fn seed_demo_history(ledger: &HistoryLedger, catalog: &Catalog, now: DateTime<Utc>) -> usize {
    let mut planned: Vec<(DateTime<Utc>, &str)> = DEMO_QUERIES
        .iter()
        .enumerate()
        .map(|(i, q)| (now - demo_age(i as i64), *q))
        .collect();
    planned.sort_by_key(|(at, _)| *at);

    for (at, query) in &planned {
        let matches = search(catalog, query);
        ledger.record_at(query, &matches, *at);
    }
    planned.len()
}

fn demo_age(i: i64) -> Duration {
    match i {
        0..=3 => Duration::minutes(5 + i * 15),
        4..=7 => Duration::hours(1 + (i - 4) * 6),
        _ => Duration::days(180 - (i - 8) * 14),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{SubsecRound, TimeZone};
    use crate::models::{SourceRecord, ACTIVE_STATUS};

    fn catalog() -> Catalog {
        Catalog::from_records(vec![SourceRecord {
            id: 1,
            name: "Mars Rover".to_string(),
            kind: "image".to_string(),
            launch_date: String::new(),
            description: "Telescope view of the red planet.".to_string(),
            image_url: None,
            status: ACTIVE_STATUS.to_string(),
        }])
    }

    #[test]
    fn test_seed_writes_all_queries() {
        let ledger = HistoryLedger::new();
        let n = seed_demo_history(&ledger, &catalog(), Utc::now());
        assert_eq!(n, DEMO_QUERIES.len());
        assert_eq!(ledger.len(), DEMO_QUERIES.len());
    }

    #[test]
    fn test_seeded_history_is_chronological() {
        let ledger = HistoryLedger::new();
        // Stored stamps carry microseconds; keep `now` at the same precision.
        let now = Utc::now().trunc_subsecs(6);
        seed_demo_history(&ledger, &catalog(), now);

        let page = ledger.list(1, 100);
        let stamps: Vec<DateTime<Utc>> = page
            .entries
            .iter()
            .map(|e| {
                DateTime::parse_from_rfc3339(&e.timestamp)
                    .unwrap()
                    .with_timezone(&Utc)
            })
            .collect();
        assert!(stamps.windows(2).all(|w| w[0] >= w[1]), "newest first");
        assert!(stamps.iter().all(|t| *t <= now));
        assert!(*stamps.last().unwrap() >= now - Duration::days(180));

        // "mars" is the freshest demo search.
        assert_eq!(page.entries[0].query, "mars");
    }

    #[test]
    fn test_seed_with_nanosecond_clock_stays_in_window() {
        let ledger = HistoryLedger::new();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
            + Duration::nanoseconds(999_999_999);
        seed_demo_history(&ledger, &catalog(), now);

        let page = ledger.list(1, 100);
        let oldest = DateTime::parse_from_rfc3339(&page.entries[20].timestamp)
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(oldest, (now - Duration::days(180)).trunc_subsecs(6));
        assert_eq!(page.entries[20].timestamp, "2023-09-03T12:00:00.999999Z");
    }

    #[test]
    fn test_seeded_entries_reflect_search_results() {
        let ledger = HistoryLedger::new();
        seed_demo_history(&ledger, &catalog(), Utc::now());
        let page = ledger.list(1, 100);

        let mars = page.entries.iter().find(|e| e.query == "mars").unwrap();
        assert_eq!(mars.results_count, 1);
        assert_eq!(mars.top_result.as_ref().unwrap().name, "Mars Rover");

        let nebula = page.entries.iter().find(|e| e.query == "nebula").unwrap();
        assert_eq!(nebula.results_count, 0);
        assert!(nebula.top_result.is_none());
    }
}
