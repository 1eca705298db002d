//! Heuristic document intelligence for unstructured text.
//!
//! Takes an already-decoded document string (DOCX/PDF/TXT conversion is an
//! upstream concern) and produces a structured analysis, plus a grounded
//! question-answering index over the result. The whole pipeline is pure,
//! synchronous, and in-memory; heuristics degrade silently instead of
//! failing.
//!
//! ## Pipeline
//!
//! - [`SectionSegmenter`] - splits raw text into titled sections using
//!   heading heuristics
//! - [`EntityExtractor`] - finds candidate entities (people, organizations,
//!   dates, metrics, capitalized concepts) per section
//! - [`RequirementClassifier`] - classifies sentences against an ordered
//!   modal taxonomy (must/should/may/definition/constraint/rule)
//! - [`DocumentAnalyzer`] - runs the pipeline and aggregates everything
//!   into [`ExtractedData`]
//! - [`QaIndex`] - TF-IDF-style index answering freeform queries with a
//!   cited snippet and confidence score
//!
//! ## Derived payloads
//!
//! - [`RelationshipGraph`] - recurring entities linked to the sections
//!   where they first occur
//! - [`DocumentOverview`] - excerpts, key takeaways, and topic counts
//! - [`export`] helpers - CSV tables and JSON summaries
//!
//! ## Example
//!
//! ```
//! use doc_intel::{DocumentAnalyzer, QaIndex};
//!
//! let analyzer = DocumentAnalyzer::new();
//! let data = analyzer
//!     .analyze("REQUIREMENTS\nThe service must respond within 200 milliseconds.")
//!     .unwrap();
//!
//! assert_eq!(data.sections[0].title, "REQUIREMENTS");
//! assert_eq!(data.requirements.len(), 1);
//!
//! let index = QaIndex::build(&data.sections);
//! let answer = index.answer("how fast must the service respond?");
//! assert!(answer.is_some());
//! ```

mod analysis;
mod entity;
mod error;
pub mod export;
mod graph;
mod overview;
mod qa;
mod requirement;
mod section;
mod tokenize;

pub use analysis::{DateMention, DocumentAnalyzer, ExtractedData};
pub use entity::{Entity, EntityExtractor, EntityKind, Occurrence};
pub use error::{AnalysisError, AnalysisResult};
pub use export::ChecklistRow;
pub use graph::{GraphEdge, GraphNode, NodeKind, RelationshipGraph, MAX_ENTITY_NODES};
pub use overview::{DocumentOverview, Takeaway, TopicCount};
pub use qa::{QaAnswer, QaIndex};
pub use requirement::{Priority, Requirement, RequirementClassifier, RequirementType};
pub use section::{
    Section, SectionDraft, SectionSegmenter, DEFAULT_SECTION_TITLE, FALLBACK_SECTION_TITLE,
};
pub use tokenize::{content_tokens, is_stop_word, split_sentences, tokenize, word_count};

#[cfg(test)]
mod tests {
    mod pipeline;
    mod qa_index;
    mod quirks;
}
