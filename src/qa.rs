//! Grounded question answering over analyzed sections.
//!
//! [`QaIndex`] precomputes per-section term frequencies and document
//! frequencies, then scores queries with a TF-IDF-style sum. The winning
//! section must clear a fixed minimum score; the answer cites the
//! best-overlapping sentence as its snippet. The index is a read-only
//! borrow of the analyzed sections: no mutable state, safe to query
//! repeatedly.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::section::Section;
use crate::tokenize::{content_tokens, split_sentences};

/// Scores at or below this never produce an answer.
const MIN_SCORE: f64 = 0.1;

/// Raw scores are divided by this and clamped to 1.0 for display.
const SCORE_DIVISOR: f64 = 10.0;

/// A grounded answer citing the best-matching section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaAnswer {
    /// Title of the cited section.
    pub section: String,
    pub section_id: usize,
    /// Best-matching sentence from the cited section.
    pub snippet: String,
    /// Whole text of the cited section.
    pub full_text: String,
    /// Crude confidence in `[0, 1]`; not a calibrated probability.
    pub score: f64,
}

/// TF-IDF-style index over a document's sections.
pub struct QaIndex<'a> {
    sections: &'a [Section],
    term_freqs: Vec<HashMap<String, usize>>,
    doc_freq: HashMap<String, usize>,
}

impl<'a> QaIndex<'a> {
    /// Precompute token tables for every section.
    ///
    /// Sections with blank text get empty tables; they can never clear
    /// the score threshold.
    pub fn build(sections: &'a [Section]) -> Self {
        let mut term_freqs = Vec::with_capacity(sections.len());
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for section in sections {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for token in content_tokens(&section.text) {
                *counts.entry(token).or_insert(0) += 1;
            }
            for token in counts.keys() {
                *doc_freq.entry(token.clone()).or_insert(0) += 1;
            }
            term_freqs.push(counts);
        }

        debug!(
            sections = sections.len(),
            vocabulary = doc_freq.len(),
            "qa index built"
        );

        Self {
            sections,
            term_freqs,
            doc_freq,
        }
    }

    fn idf(&self, token: &str) -> f64 {
        let n = self.sections.len() as f64;
        let df = self.doc_freq.get(token).copied().unwrap_or(0) as f64;
        ((n + 1.0) / (df + 1.0)).ln() + 1.0
    }

    /// Answer a freeform query, or `None` when no section scores above
    /// the minimum threshold. A miss is an absent value, never an error.
    pub fn answer(&self, query: &str) -> Option<QaAnswer> {
        let query_tokens = content_tokens(query);
        if query_tokens.is_empty() {
            return None;
        }

        let mut best: Option<usize> = None;
        let mut best_score = MIN_SCORE;
        for (idx, freqs) in self.term_freqs.iter().enumerate() {
            let mut score = 0.0;
            for token in &query_tokens {
                let tf = freqs.get(token).copied().unwrap_or(0);
                if tf > 0 {
                    score += tf as f64 * self.idf(token);
                }
            }
            // Strictly-greater keeps the earliest section on ties.
            if score > best_score {
                best_score = score;
                best = Some(idx);
            }
        }

        let section = &self.sections[best?];
        let sentences = split_sentences(&section.text);
        let query_set: HashSet<&str> = query_tokens.iter().map(String::as_str).collect();

        let mut snippet = sentences.first().copied().unwrap_or(section.text.as_str());
        let mut max_overlap = 0usize;
        for sentence in &sentences {
            let sentence_set: HashSet<String> = content_tokens(sentence).into_iter().collect();
            let overlap = query_set
                .iter()
                .filter(|t| sentence_set.contains(**t))
                .count();
            if overlap > max_overlap {
                max_overlap = overlap;
                snippet = sentence;
            }
        }

        Some(QaAnswer {
            section: section.title.clone(),
            section_id: section.id,
            snippet: snippet.to_string(),
            full_text: section.text.clone(),
            score: (best_score / SCORE_DIVISOR).min(1.0),
        })
    }
}
