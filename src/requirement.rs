//! Requirement sentence classification.
//!
//! Scans sentences for modal/obligation language and classifies each into
//! a small requirement taxonomy with a priority. The pattern list is
//! evaluated in a fixed order and the first match wins, so a sentence
//! containing both "must" and "may" is always classified as `must`. The
//! order is part of the contract; reordering changes the classification
//! of ambiguous sentences.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tokenize::split_sentences;

/// The kind of requirement a sentence expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementType {
    /// "must" / "shall" - a mandatory obligation
    Must,
    /// "should" - a recommendation
    Should,
    /// "may" - a permission
    May,
    /// "definition" / "defined as" - a term definition
    Definition,
    /// "constraint" / "required" - a constraint statement
    Constraint,
    /// "rule" / "theorem" / "if and only if" - a formal rule
    Rule,
}

impl fmt::Display for RequirementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequirementType::Must => "must",
            RequirementType::Should => "should",
            RequirementType::May => "may",
            RequirementType::Definition => "definition",
            RequirementType::Constraint => "constraint",
            RequirementType::Rule => "rule",
        };
        f.write_str(label)
    }
}

/// Priority attached to a classified requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.write_str(label)
    }
}

/// A single classified requirement sentence.
///
/// `section` is a denormalized title snapshot, not a live reference;
/// `section_id` is the stable join key back to the section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: RequirementType,
    pub section: String,
    pub section_id: usize,
    pub priority: Priority,
}

/// Classifies sentences against the ordered modal pattern list.
pub struct RequirementClassifier {
    patterns: Vec<(Regex, RequirementType, Priority)>,
}

impl Default for RequirementClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RequirementClassifier {
    pub fn new() -> Self {
        // Order matters: first match wins.
        let table: [(&str, RequirementType, Priority); 7] = [
            (r"\bmust\b", RequirementType::Must, Priority::High),
            (r"\bshall\b", RequirementType::Must, Priority::High),
            (r"\bshould\b", RequirementType::Should, Priority::Medium),
            (r"\bmay\b", RequirementType::May, Priority::Low),
            (
                r"\bdefinition\b|\bdefined as\b",
                RequirementType::Definition,
                Priority::High,
            ),
            (
                r"\bconstraint\b|\brequired\b",
                RequirementType::Constraint,
                Priority::High,
            ),
            (
                r"\brule\b|\btheorem\b|\bif and only if\b",
                RequirementType::Rule,
                Priority::Medium,
            ),
        ];

        let patterns = table
            .into_iter()
            .map(|(pattern, kind, priority)| {
                let regex = Regex::new(pattern).expect("invalid requirement pattern");
                (regex, kind, priority)
            })
            .collect();

        Self { patterns }
    }

    /// Classify a single sentence; `None` when no pattern matches.
    pub fn classify_sentence(&self, sentence: &str) -> Option<(RequirementType, Priority)> {
        let lower = sentence.to_lowercase();
        self.patterns
            .iter()
            .find(|(regex, _, _)| regex.is_match(&lower))
            .map(|(_, kind, priority)| (*kind, *priority))
    }

    /// Classify every sentence of a section, in sentence order.
    pub fn classify(&self, text: &str, section_title: &str, section_id: usize) -> Vec<Requirement> {
        split_sentences(text)
            .into_iter()
            .filter_map(|sentence| {
                self.classify_sentence(sentence)
                    .map(|(kind, priority)| Requirement {
                        text: sentence.trim().to_string(),
                        kind,
                        section: section_title.to_string(),
                        section_id,
                        priority,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_one(sentence: &str) -> Option<(RequirementType, Priority)> {
        RequirementClassifier::new().classify_sentence(sentence)
    }

    #[test]
    fn must_outranks_should_and_may() {
        assert_eq!(
            classify_one("The vendor must deliver and may subcontract."),
            Some((RequirementType::Must, Priority::High))
        );
        assert_eq!(
            classify_one("Operators should review and may escalate."),
            Some((RequirementType::Should, Priority::Medium))
        );
    }

    #[test]
    fn shall_maps_to_must() {
        assert_eq!(
            classify_one("The Company shall retain records."),
            Some((RequirementType::Must, Priority::High))
        );
    }

    #[test]
    fn negated_modals_keep_the_modal_class() {
        assert_eq!(
            classify_one("The job must not run during business hours."),
            Some((RequirementType::Must, Priority::High))
        );
    }

    #[test]
    fn definition_constraint_and_rule_patterns() {
        assert_eq!(
            classify_one("Uptime is defined as the monthly availability ratio."),
            Some((RequirementType::Definition, Priority::High))
        );
        assert_eq!(
            classify_one("Encryption at rest is required for archives."),
            Some((RequirementType::Constraint, Priority::High))
        );
        assert_eq!(
            classify_one("A state is final if and only if no transitions remain."),
            Some((RequirementType::Rule, Priority::Medium))
        );
    }

    #[test]
    fn word_boundaries_prevent_partial_matches() {
        assert_eq!(classify_one("Maybe the mustard settles."), None);
        assert_eq!(classify_one("The display shows colors."), None);
    }

    #[test]
    fn unmatched_sentences_produce_nothing() {
        let classifier = RequirementClassifier::new();
        let requirements = classifier.classify("Plain narrative text. Nothing to see.", "Intro", 0);
        assert!(requirements.is_empty());
    }

    #[test]
    fn sentences_are_classified_in_order() {
        let classifier = RequirementClassifier::new();
        let requirements = classifier.classify(
            "The system must log all events. Users may opt out.",
            "INTRODUCTION",
            0,
        );
        assert_eq!(requirements.len(), 2);
        assert_eq!(requirements[0].text, "The system must log all events.");
        assert_eq!(requirements[0].kind, RequirementType::Must);
        assert_eq!(requirements[0].priority, Priority::High);
        assert_eq!(requirements[1].text, "Users may opt out.");
        assert_eq!(requirements[1].kind, RequirementType::May);
        assert_eq!(requirements[1].priority, Priority::Low);
        assert!(requirements.iter().all(|r| r.section == "INTRODUCTION"));
    }
}
