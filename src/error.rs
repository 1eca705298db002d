//! Error types for document analysis.
//!
//! Only input validation produces an error. Every heuristic inside the
//! pipeline degrades silently to a documented fallback (dropped entity,
//! fallback section, empty requirement list), and a Q&A miss is an
//! explicit `None`, never an error.

use thiserror::Error;

/// Errors surfaced by the analysis facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The input document was empty or contained only whitespace.
    #[error("document is empty or contains only whitespace")]
    EmptyDocument,
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
