//! Trigger scoring: matches free text against dementia / caregiver scenario records.
//!
//! Pure and deterministic: literal, case-sensitive substring containment, one point per
//! trigger entry found in the query.

use crate::knowledge::models::{MatchResult, TriggerRecord};

/// Scores `query` against every record and returns the matching ones, best first.
///
/// Records scoring zero are dropped. Ties keep their input order.
pub fn score_triggers(query: &str, records: &[TriggerRecord]) -> Vec<MatchResult> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<MatchResult> = records
        .iter()
        .filter_map(|record| {
            let matched: Vec<String> = record
                .triggers
                .iter()
                .filter(|phrase| !phrase.is_empty() && query.contains(phrase.as_str()))
                .cloned()
                .collect();

            if matched.is_empty() {
                return None;
            }

            Some(MatchResult {
                name: record.display_name().to_string(),
                score: matched.len() as u32,
                matched,
                record: record.clone(),
            })
        })
        .collect();

    // sort_by is stable, which preserves input order for equal scores
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}
