//! Keyword-overlap search over the [`Catalog`].
//!
//! # Scoring Algorithm
//!
//! 1. Tokenize the query: lowercase, ASCII punctuation → space, split on
//!    whitespace, deduplicate.
//! 2. Tokenize each record's name and description the same way and take
//!    the union.
//! 3. Drop records sharing no token with the query.
//! 4. `confidence = round(|matched| / |query tokens| × 100, 2)`.
//! 5. Sort by confidence (desc), then by how many matched tokens appear in
//!    the name (desc). The sort is stable, so full ties keep catalog order.
//!
//! A query with no tokens at all is a browse request: every record comes
//! back with confidence `100.0` in catalog order.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::models::{SearchMatch, SourceRecord};

/// Confidence assigned to every record in browse mode.
pub const BROWSE_CONFIDENCE: f64 = 100.0;

/// Split text into its set of normalized tokens.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect();
    normalized.split_whitespace().map(str::to_string).collect()
}

/// Run a search and return matches, best first.
///
/// Never fails; an empty result means nothing overlapped the query.
pub fn search(catalog: &Catalog, query: &str) -> Vec<SearchMatch> {
    let query_tokens = tokenize(query);
    if query_tokens.is_empty() {
        return browse(catalog);
    }

    struct Scored<'a> {
        record: &'a SourceRecord,
        confidence: f64,
        title_matches: usize,
    }

    let mut scored: Vec<Scored<'_>> = catalog
        .all()
        .iter()
        .filter_map(|record| {
            let title_tokens = tokenize(&record.name);
            let mut doc_tokens = tokenize(&record.description);
            doc_tokens.extend(title_tokens.iter().cloned());

            let matched = query_tokens.intersection(&doc_tokens).count();
            if matched == 0 {
                return None;
            }

            Some(Scored {
                record,
                confidence: confidence(matched, query_tokens.len()),
                title_matches: query_tokens.intersection(&title_tokens).count(),
            })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then(b.title_matches.cmp(&a.title_matches))
    });

    scored
        .into_iter()
        .map(|s| SearchMatch {
            record: s.record.clone(),
            confidence: s.confidence,
        })
        .collect()
}

fn browse(catalog: &Catalog) -> Vec<SearchMatch> {
    catalog
        .all()
        .iter()
        .map(|record| SearchMatch {
            record: record.clone(),
            confidence: BROWSE_CONFIDENCE,
        })
        .collect()
}

/// Percentage of query tokens matched, rounded to two decimals.
fn confidence(matched: usize, query_len: usize) -> f64 {
    let pct = matched as f64 / query_len as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ACTIVE_STATUS;

    fn rec(id: u64, name: &str, description: &str) -> SourceRecord {
        SourceRecord {
            id,
            name: name.to_string(),
            kind: "image".to_string(),
            launch_date: String::new(),
            description: description.to_string(),
            image_url: Some(format!("https://example.test/{}.jpg", id)),
            status: ACTIVE_STATUS.to_string(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            rec(
                1,
                "Mars Rover Landing",
                "First images from the Martian surface.",
            ),
            rec(
                2,
                "Hubble Deep Field",
                "A telescope view of distant galaxies, far beyond Mars.",
            ),
            rec(
                3,
                "KSC-04pd1644",
                "Workers at the launch pad prepare the shuttle for rollout.",
            ),
            rec(4, "Apollo 11 Launch", "The Saturn V lifts off with the landing crew."),
            rec(5, "Earthrise", "Earth seen from lunar orbit."),
        ])
    }

    fn ids(matches: &[SearchMatch]) -> Vec<u64> {
        matches.iter().map(|m| m.record.id).collect()
    }

    #[test]
    fn test_tokenize_folds_case_and_splits_punctuation() {
        let tokens = tokenize("KSC-04pd1644: Mars, MARS & moon!");
        let expected: BTreeSet<String> = ["ksc", "04pd1644", "mars", "moon"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_tokenize_blank_and_punctuation_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \n\t ").is_empty());
        assert!(tokenize("?!...--").is_empty());
    }

    #[test]
    fn test_single_word_match_is_full_confidence() {
        let results = search(&catalog(), "mars");
        assert_eq!(ids(&results), vec![1, 2]);
        assert!(results.iter().all(|m| m.confidence == 100.0));
    }

    #[test]
    fn test_scenario_mars_landing() {
        let results = search(&catalog(), "mars landing");
        // Record 1 matches both tokens, both in the title.
        assert_eq!(results[0].record.id, 1);
        assert_eq!(results[0].confidence, 100.0);
        // Record 2 matches "mars" in its description; record 4 matches
        // "landing" in its description. Equal score and title count, so
        // catalog order decides.
        assert_eq!(ids(&results[1..]), vec![2, 4]);
        assert!(results[1..].iter().all(|m| m.confidence == 50.0));
    }

    #[test]
    fn test_title_matches_break_confidence_ties() {
        let catalog = Catalog::from_records(vec![
            rec(1, "Launch complex", "A quiet night at the pad."),
            rec(2, "Night sky", "Rocket launch seen from far away."),
            rec(3, "Rocket launch", "Pad 39A at dawn."),
        ]);
        let results = search(&catalog, "rocket launch");
        // 2 and 3 both match every token; 3 has both in its name.
        assert_eq!(ids(&results), vec![3, 2, 1]);
        assert_eq!(results[0].confidence, 100.0);
        assert_eq!(results[1].confidence, 100.0);
        assert_eq!(results[2].confidence, 50.0);
    }

    #[test]
    fn test_confidence_rounds_to_two_decimals() {
        let results = search(&catalog(), "saturn rocket moon");
        assert_eq!(ids(&results), vec![4]);
        assert_eq!(results[0].confidence, 33.33);

        let results = search(&catalog(), "saturn crew moon");
        assert_eq!(results[0].confidence, 66.67);
    }

    #[test]
    fn test_confidence_formula_holds() {
        let query = "mars galaxies shuttle surface pad";
        let q = tokenize(query);
        for m in search(&catalog(), query) {
            let mut doc = tokenize(&m.record.name);
            doc.extend(tokenize(&m.record.description));
            let matched = q.intersection(&doc).count();
            let expected = ((matched as f64 / q.len() as f64 * 100.0) * 100.0).round() / 100.0;
            assert!(m.confidence > 0.0 && m.confidence <= 100.0);
            assert_eq!(m.confidence, expected);
        }
    }

    #[test]
    fn test_duplicate_query_words_count_once() {
        let results = search(&catalog(), "mars mars MARS");
        assert!(results.iter().all(|m| m.confidence == 100.0));
    }

    #[test]
    fn test_case_insensitive() {
        let upper = search(&catalog(), "MARS");
        let lower = search(&catalog(), "mars");
        let mixed = search(&catalog(), "MaRs");
        assert_eq!(upper, lower);
        assert_eq!(lower, mixed);
        assert_eq!(upper[0].record.id, mixed[0].record.id);
    }

    #[test]
    fn test_punctuation_is_a_separator() {
        let results = search(&catalog(), "ksc");
        assert_eq!(ids(&results), vec![3]);
        assert_eq!(results[0].confidence, 100.0);
    }

    #[test]
    fn test_no_overlap_returns_empty() {
        assert!(search(&catalog(), "xyzabc123nonexistent").is_empty());
    }

    #[test]
    fn test_substrings_do_not_match() {
        // "mar" is a prefix of "mars" but not a token.
        assert!(search(&catalog(), "mar").is_empty());
    }

    #[test]
    fn test_empty_query_browses_catalog() {
        for query in ["", "   ", "\n\t", "?!"] {
            let results = search(&catalog(), query);
            assert_eq!(ids(&results), vec![1, 2, 3, 4, 5], "query {:?}", query);
            assert!(results.iter().all(|m| m.confidence == BROWSE_CONFIDENCE));
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        let first = search(&catalog(), "the launch of earth");
        for _ in 0..5 {
            assert_eq!(search(&catalog(), "the launch of earth"), first);
        }
    }

    #[test]
    fn test_empty_catalog() {
        let empty = Catalog::default();
        assert!(search(&empty, "mars").is_empty());
        assert!(search(&empty, "").is_empty());
    }
}
