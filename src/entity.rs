//! Named-entity extraction and occurrence tracking.
//!
//! Four fixed regex families (person, organization, date, metric) run per
//! section, plus a generic capitalized-phrase scan as the concept
//! fallback. The phrase scan is the dominant source of entity noise;
//! that is acceptable because the goal is exploratory discovery, not
//! precision NER.
//!
//! Entity types are inferred post hoc from the surface form of the name,
//! and occurrences are re-located by scanning section text with a regex
//! built from the escaped name. A name whose occurrence cannot be
//! re-located is dropped from the final entity list even though it was
//! counted; see the quirk notes in the aggregator.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::section::Section;

/// Leading words that disqualify a capitalized phrase.
static NOISE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "The", "A", "An", "If", "In", "For", "Now", "But", "My", "This", "That", "These", "Those",
    ]
    .into_iter()
    .collect()
});

/// Snippets longer than this are truncated with a `...` suffix.
const SNIPPET_MAX_CHARS: usize = 80;

/// Trailing context captured after an entity name when re-locating it.
const SNIPPET_TAIL_CHARS: usize = 50;

/// Minimum length for a capitalized phrase to count as an entity.
const MIN_PHRASE_CHARS: usize = 4;

/// The inferred type of an entity, from the surface form of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Person,
    Organization,
    Date,
    Metric,
    Concept,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Person => "person",
            EntityKind::Organization => "organization",
            EntityKind::Date => "date",
            EntityKind::Metric => "metric",
            EntityKind::Concept => "concept",
        };
        f.write_str(label)
    }
}

/// Where an entity occurrence was re-located.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub section_id: usize,
    pub section_title: String,
    pub snippet: String,
}

/// A named entity aggregated across the whole document.
///
/// `mentions` counts the sections whose extracted entity set contains the
/// name, not independent whole-text occurrences. The coarse definition is
/// load-bearing for downstream count displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub mentions: usize,
    pub first_occurrence: Occurrence,
    pub last_occurrence: Occurrence,
}

/// Extracts candidate entity names from section text.
pub struct EntityExtractor {
    person: Regex,
    organization: Regex,
    date: Regex,
    metric: Regex,
    capitalized: Regex,
    kind_date: Regex,
    kind_org: Regex,
    kind_person: Regex,
    kind_metric: Regex,
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityExtractor {
    pub fn new() -> Self {
        let person = Regex::new(
            r"(?:Prof\.|Professor|Dr\.|Mr\.|Ms\.|Mrs\.)\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*",
        )
        .expect("invalid person regex");
        // Suffix-anchored, taking trailing text up to the next period.
        // Two branches because the period-suffixed forms ("Inc.") cannot
        // carry a trailing word boundary.
        let organization = Regex::new(
            r"\b(?:Inc|Corp|Ltd)\.[^.\n]*|\b(?:LLC|Company|University|College|Institute)\b[^.\n]*",
        )
        .expect("invalid organization regex");
        let date = Regex::new(
            r"\b\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}\b|\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4}\b",
        )
        .expect("invalid date regex");
        // The `%` branch carries no trailing boundary; `%` is not a word
        // character so `\b` after it could never match.
        let metric = Regex::new(r"(?i)\b\d+(?:\.\d+)?\s*(?:%|(?:percent|MB|GB|TB|km|miles)\b)")
            .expect("invalid metric regex");
        let capitalized =
            Regex::new(r"[A-Z][a-z]+(?: [A-Z][a-z]+)*").expect("invalid capitalized phrase regex");

        let kind_date = Regex::new(r"\d{1,2}[/\-]\d").expect("invalid date kind regex");
        let kind_org =
            Regex::new(r"(?i)Inc|Corp|LLC|Ltd|University|College").expect("invalid org kind regex");
        let kind_person =
            Regex::new(r"(?i)(?:Prof|Dr|Mr|Ms|Mrs)\.").expect("invalid person kind regex");
        let kind_metric = Regex::new(r"(?i)%|MB|GB|TB|km|miles").expect("invalid metric kind regex");

        Self {
            person,
            organization,
            date,
            metric,
            capitalized,
            kind_date,
            kind_org,
            kind_person,
            kind_metric,
        }
    }

    /// Extract entity names from one section's text, deduped in
    /// first-seen order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut found: Vec<String> = Vec::new();

        for family in [&self.person, &self.organization, &self.date, &self.metric] {
            for m in family.find_iter(text) {
                let name = m.as_str().trim().to_string();
                if seen.insert(name.clone()) {
                    found.push(name);
                }
            }
        }

        // Phrases in sentence-start context (start of text, or right after
        // ". ") are rejected, but the scan resumes one character later so
        // a shorter phrase inside the rejected span can still match, e.g.
        // "Smith" inside a rejected "Jane Smith".
        let mut pos = 0;
        while let Some(m) = self.capitalized.find_at(text, pos) {
            if m.start() == 0 || text[..m.start()].ends_with(". ") {
                pos = m.start() + 1;
                continue;
            }
            let phrase = m.as_str();
            if phrase.chars().count() >= MIN_PHRASE_CHARS && !NOISE_WORDS.contains(phrase) {
                if seen.insert(phrase.to_string()) {
                    found.push(phrase.to_string());
                }
            }
            pos = m.end();
        }

        found
    }

    /// Infer an entity's type from the surface form of its name.
    pub fn infer_kind(&self, name: &str) -> EntityKind {
        if self.kind_date.is_match(name) {
            EntityKind::Date
        } else if self.kind_org.is_match(name) {
            EntityKind::Organization
        } else if self.kind_person.is_match(name) {
            EntityKind::Person
        } else if self.kind_metric.is_match(name) {
            EntityKind::Metric
        } else {
            EntityKind::Concept
        }
    }

    /// Re-locate `name` across all sections, returning its first and last
    /// occurrence with a trailing-context snippet.
    ///
    /// Returns `None` when no section's text contains the name; the
    /// caller then drops the entity from the final list.
    pub fn locate(&self, name: &str, sections: &[Section]) -> Option<(Occurrence, Occurrence)> {
        let pattern = format!("(?i){}.{{0,{}}}", regex::escape(name), SNIPPET_TAIL_CHARS);
        let regex = Regex::new(&pattern).ok()?;

        let mut first: Option<Occurrence> = None;
        let mut last: Option<Occurrence> = None;
        for section in sections {
            if let Some(m) = regex.find(&section.text) {
                let occurrence = Occurrence {
                    section_id: section.id,
                    section_title: section.title.clone(),
                    snippet: truncate_snippet(m.as_str()),
                };
                if first.is_none() {
                    first = Some(occurrence.clone());
                }
                last = Some(occurrence);
            }
        }
        first.zip(last)
    }
}

fn truncate_snippet(text: &str) -> String {
    if text.chars().count() > SNIPPET_MAX_CHARS {
        let cut: String = text.chars().take(SNIPPET_MAX_CHARS).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<String> {
        EntityExtractor::new().extract(text)
    }

    fn section(id: usize, title: &str, text: &str) -> Section {
        Section {
            id,
            title: title.to_string(),
            text: text.to_string(),
            content: vec![text.to_string()],
            word_count: 0,
            risk_score: 0,
            entities: Vec::new(),
            rules: Vec::new(),
        }
    }

    #[test]
    fn titled_names_are_people() {
        let names = extract("Please contact Dr. Jane Smith for details.");
        assert!(names.contains(&"Dr. Jane Smith".to_string()));
    }

    #[test]
    fn organization_suffixes_capture_trailing_text() {
        let names = extract("Hosting is provided by Acme Inc. under contract terms.");
        assert!(names.contains(&"Inc. under contract terms".to_string()));
        assert!(names.contains(&"Acme Inc".to_string()));
    }

    #[test]
    fn dates_and_metrics_are_extracted() {
        let names = extract("Launched on 12/01/2024 with 500 GB of storage and 95% uptime.");
        assert!(names.contains(&"12/01/2024".to_string()));
        assert!(names.contains(&"500 GB".to_string()));
        assert!(names.contains(&"95%".to_string()));
    }

    #[test]
    fn month_name_dates_are_extracted() {
        let names = extract("The audit happened on Mar 5, 2024 as planned.");
        assert!(names.contains(&"Mar 5, 2024".to_string()));
    }

    #[test]
    fn sentence_start_phrases_are_skipped() {
        // "Primary" opens the text, "Jane Smith" follows ". " - both are
        // sentence-start context and skipped by the phrase scan. The scan
        // resumes inside the rejected span, so "Smith" alone survives.
        let names = extract("Primary contact is Dr. Jane Smith today.");
        assert!(!names.contains(&"Primary".to_string()));
        assert!(!names.contains(&"Jane Smith".to_string()));
        assert!(names.contains(&"Smith".to_string()));
    }

    #[test]
    fn noise_words_and_short_phrases_are_filtered() {
        let names = extract("We met The team near Uplink Gateway yesterday.");
        assert!(!names.contains(&"The".to_string()));
        assert!(names.contains(&"Uplink Gateway".to_string()));
    }

    #[test]
    fn extraction_dedups_within_a_section() {
        let names = extract("See Dr. Jane Smith. Ask for Dr. Jane Smith again.");
        let hits = names.iter().filter(|n| *n == "Dr. Jane Smith").count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn kind_inference_follows_surface_form() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.infer_kind("12/01/2024"), EntityKind::Date);
        assert_eq!(extractor.infer_kind("Acme Inc"), EntityKind::Organization);
        assert_eq!(extractor.infer_kind("Dr. Jane Smith"), EntityKind::Person);
        assert_eq!(extractor.infer_kind("500 GB"), EntityKind::Metric);
        assert_eq!(extractor.infer_kind("Uplink Gateway"), EntityKind::Concept);
    }

    #[test]
    fn kind_inference_is_substring_based() {
        // Surface-form checks are substring matches; "km" inside a word
        // still reads as a metric. Accepted behavior, not a bug.
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.infer_kind("Kmart"), EntityKind::Metric);
    }

    #[test]
    fn locate_finds_first_and_last_sections() {
        let extractor = EntityExtractor::new();
        let sections = vec![
            section(0, "Intro", "Dr. Jane Smith wrote the draft."),
            section(1, "Middle", "Nothing relevant here."),
            section(2, "Close", "Reviewed by Dr. Jane Smith before signing."),
        ];
        let (first, last) = extractor
            .locate("Dr. Jane Smith", &sections)
            .expect("entity should be locatable");
        assert_eq!(first.section_id, 0);
        assert_eq!(last.section_id, 2);
        assert!(first.snippet.starts_with("Dr. Jane Smith"));
    }

    #[test]
    fn locate_is_case_insensitive() {
        let extractor = EntityExtractor::new();
        let sections = vec![section(0, "Intro", "the uplink gateway handles routing.")];
        let located = extractor.locate("Uplink Gateway", &sections);
        assert!(located.is_some());
    }

    #[test]
    fn locate_returns_none_when_absent() {
        let extractor = EntityExtractor::new();
        let sections = vec![section(0, "Intro", "No names appear here.")];
        assert!(extractor.locate("Dr. Jane Smith", &sections).is_none());
    }

    #[test]
    fn long_snippets_are_truncated() {
        let extractor = EntityExtractor::new();
        let long_tail = "x".repeat(60);
        let text = format!("University of Applied Marine Research {long_tail} end");
        let sections = vec![section(0, "Intro", &text)];
        let (first, _) = extractor
            .locate("University of Applied Marine Research", &sections)
            .expect("entity should be locatable");
        assert!(first.snippet.ends_with("..."));
        assert_eq!(first.snippet.chars().count(), SNIPPET_MAX_CHARS + 3);
    }
}
