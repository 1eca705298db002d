//! Known quirks of the heuristic pipeline, pinned on purpose.
//!
//! These behaviors look inconsistent but are load-bearing for downstream
//! consumers; the tests document them so nobody "fixes" them by accident.

use crate::{DocumentAnalyzer, ExtractedData, RequirementType};

fn analyze(text: &str) -> ExtractedData {
    DocumentAnalyzer::new()
        .analyze(text)
        .expect("document should analyze")
}

#[test]
fn mentions_count_sections_not_raw_occurrences() {
    // Three literal occurrences across two sections count as 2: the
    // mention count is "sections mentioning X", not a hit count.
    let data = analyze(
        "ALPHA\nDr. Jane Smith wrote this. Dr. Jane Smith signed this.\nBETA\nDr. Jane Smith reviewed everything carefully.",
    );
    let smith = data
        .entities
        .iter()
        .find(|e| e.name == "Dr. Jane Smith")
        .expect("person entity expected");
    assert_eq!(smith.mentions, 2);
}

#[test]
fn retained_entities_always_match_their_counts() {
    // An entity is rendered only when a second, independent occurrence
    // search re-locates it; names that fail that search stay counted but
    // unrendered. The retained list must agree with the counts exactly.
    let data = analyze(
        "ALPHA\nThe Uplink Gateway connects to Acme Inc. daily.\nBETA\nOur Uplink Gateway rarely drops packets overnight.",
    );
    for entity in &data.entities {
        assert_eq!(
            data.entity_counts.get(&entity.name).copied(),
            Some(entity.mentions)
        );
    }
    // Retained names are a subset of counted names, never the reverse.
    assert!(data.entities.len() <= data.entity_counts.len());
}

#[test]
fn first_pattern_wins_for_ambiguous_sentences() {
    let data = analyze("TERMS\nVendors must comply and should report monthly totals.");
    assert_eq!(data.requirements.len(), 1);
    assert_eq!(data.requirements[0].kind, RequirementType::Must);
}

#[test]
fn date_mentions_are_case_insensitive_but_date_entities_are_not() {
    // The aggregator's date scan is case-insensitive; the entity family
    // is not. A lower-cased month yields a date mention without a
    // corresponding entity count.
    let data = analyze("NOTES\nreviewed on jan 5, 2024 by the team.");
    assert_eq!(data.dates.len(), 1);
    assert_eq!(data.dates[0].date, "jan 5, 2024");
    assert!(!data.entity_counts.contains_key("jan 5, 2024"));
    assert!(data.metadata.get("date").is_none());
}

#[test]
fn short_capitalized_sentences_are_prose_not_headings() {
    let data = analyze("OVERVIEW\nThe system must log all events.\nUsers may opt out.");
    assert_eq!(data.sections.len(), 1);
    assert_eq!(data.sections[0].content.len(), 2);
}

#[test]
fn risk_words_overlap_by_design() {
    // "must not" also matches "not"; the risk vocabulary counts both, so
    // a single sentence can score several risk points.
    let data = analyze("RISKS\nThis process must not fail under uncertain network conditions.");
    assert!(data.sections[0].risk_score >= 3);
}
