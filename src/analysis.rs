//! Document aggregation: the analyzer facade and its output aggregate.
//!
//! `DocumentAnalyzer` runs the full pipeline over a raw text string:
//! segmentation, per-section entity extraction and requirement
//! classification, then document-level aggregation into [`ExtractedData`]
//! (metadata guesses, global entity table, flattened requirements, date
//! mentions, per-section risk scores). The aggregate is produced once per
//! document and treated as immutable by consumers.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::{Entity, EntityExtractor};
use crate::error::{AnalysisError, AnalysisResult};
use crate::requirement::{Requirement, RequirementClassifier};
use crate::section::{Section, SectionDraft, SectionSegmenter};
use crate::tokenize::word_count;

/// Words whose presence marks a section as risky or ambiguous.
/// Substring matches, case-insensitive, each counted at most once.
const RISK_WORDS: [&str; 9] = [
    "not",
    "unlikely",
    "error",
    "fail",
    "cannot",
    "must not",
    "risk",
    "uncertain",
    "ambiguous",
];

/// How much of the first section is scanned for an author guess.
const AUTHOR_SCAN_CHARS: usize = 500;

/// A date found in a section, with its surrounding match as context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateMention {
    pub date: String,
    pub context: String,
    pub section_id: usize,
}

/// The root aggregate handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    pub sections: Vec<Section>,
    pub full_text: String,
    /// Optional "author" and "date" guesses.
    pub metadata: BTreeMap<String, String>,
    /// Entities in first-seen order; only names with a locatable
    /// occurrence are retained here.
    pub entities: Vec<Entity>,
    /// Sections-mentioning counts for every extracted name, including
    /// names dropped from `entities`.
    pub entity_counts: BTreeMap<String, usize>,
    /// All requirements, section order then sentence order.
    pub requirements: Vec<Requirement>,
    pub dates: Vec<DateMention>,
}

impl ExtractedData {
    /// Sections whose title or body contains `query`, case-insensitively.
    /// An empty query returns every section.
    pub fn search_sections(&self, query: &str) -> Vec<&Section> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.sections.iter().collect();
        }
        self.sections
            .iter()
            .filter(|s| {
                s.title.to_lowercase().contains(&needle) || s.text.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Runs the extraction pipeline and aggregates the results.
pub struct DocumentAnalyzer {
    segmenter: SectionSegmenter,
    entities: EntityExtractor,
    requirements: RequirementClassifier,
    author: Regex,
    numeric_date: Regex,
    date_mention: Regex,
}

impl Default for DocumentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentAnalyzer {
    pub fn new() -> Self {
        let author =
            Regex::new(r"(?:Prof\.|Professor|Dr\.)\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*")
                .expect("invalid author regex");
        let numeric_date =
            Regex::new(r"\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}").expect("invalid numeric date regex");
        // Case-insensitive, unlike the entity family: lower-cased month
        // names still count as date mentions.
        let date_mention = Regex::new(
            r"(?i)\b(\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}|(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4})\b",
        )
        .expect("invalid date mention regex");

        Self {
            segmenter: SectionSegmenter::new(),
            entities: EntityExtractor::new(),
            requirements: RequirementClassifier::new(),
            author,
            numeric_date,
            date_mention,
        }
    }

    /// Analyze a document, rejecting empty or whitespace-only input.
    ///
    /// Validation is the caller-level contract; the pipeline itself never
    /// fails and degrades heuristic by heuristic.
    pub fn analyze(&self, text: &str) -> AnalysisResult<ExtractedData> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyDocument);
        }
        Ok(self.extract(text))
    }

    fn extract(&self, text: &str) -> ExtractedData {
        let drafts = self.segmenter.segment(text);
        let sections: Vec<Section> = drafts
            .into_iter()
            .enumerate()
            .map(|(id, draft)| self.build_section(id, draft))
            .collect();

        let full_text = sections
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let mut metadata = BTreeMap::new();
        if let Some(first) = sections.first() {
            let head: String = first.text.chars().take(AUTHOR_SCAN_CHARS).collect();
            if let Some(m) = self.author.find(&head) {
                metadata.insert("author".to_string(), m.as_str().to_string());
            }
        }
        if let Some(m) = self.numeric_date.find(&full_text) {
            metadata.insert("date".to_string(), m.as_str().to_string());
        }

        // Mention count = number of sections whose entity set contains the
        // name. `first_seen` preserves document order for the entity list.
        let mut entity_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut first_seen: Vec<String> = Vec::new();
        for section in &sections {
            for name in &section.entities {
                let count = entity_counts.entry(name.clone()).or_insert(0);
                if *count == 0 {
                    first_seen.push(name.clone());
                }
                *count += 1;
            }
        }

        let mut entities = Vec::new();
        for name in &first_seen {
            let mentions = entity_counts.get(name).copied().unwrap_or(0);
            // A name that cannot be re-located stays in `entity_counts`
            // but is dropped from the entity list.
            if let Some((first_occurrence, last_occurrence)) =
                self.entities.locate(name, &sections)
            {
                entities.push(Entity {
                    name: name.clone(),
                    kind: self.entities.infer_kind(name),
                    mentions,
                    first_occurrence,
                    last_occurrence,
                });
            }
        }

        let requirements: Vec<Requirement> = sections
            .iter()
            .flat_map(|s| s.rules.iter().cloned())
            .collect();

        let mut dates = Vec::new();
        for section in &sections {
            for caps in self.date_mention.captures_iter(&section.text) {
                if let (Some(whole), Some(date)) = (caps.get(0), caps.get(1)) {
                    dates.push(DateMention {
                        date: date.as_str().to_string(),
                        context: whole.as_str().to_string(),
                        section_id: section.id,
                    });
                }
            }
        }

        debug!(
            sections = sections.len(),
            entities = entities.len(),
            requirements = requirements.len(),
            dates = dates.len(),
            "document analysis complete"
        );

        ExtractedData {
            sections,
            full_text,
            metadata,
            entities,
            entity_counts,
            requirements,
            dates,
        }
    }

    fn build_section(&self, id: usize, draft: SectionDraft) -> Section {
        let text = draft.content.join("\n");
        let word_count = word_count(&text);
        let risk_score = risk_score(&text);
        let entities = self.entities.extract(&text);
        let rules = self.requirements.classify(&text, &draft.title, id);
        Section {
            id,
            title: draft.title,
            text,
            content: draft.content,
            word_count,
            risk_score,
            entities,
            rules,
        }
    }
}

/// Count distinct risk words present in the text, case-insensitively.
fn risk_score(text: &str) -> usize {
    let lower = text.to_lowercase();
    RISK_WORDS.iter().filter(|w| lower.contains(*w)).count()
}
