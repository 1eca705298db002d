//! Section segmentation using heading heuristics.
//!
//! The segmenter walks non-blank lines and decides per line whether it
//! looks like a heading:
//! - lines longer than 80 characters are never headings
//! - `1. Numbered headings` are headings
//! - `ENTIRELY UPPER-CASE` lines (longer than 2 characters) are headings
//! - markdown `#` .. `######` prefixes are headings
//! - short capitalized phrases (at most 6 words, not ending in sentence
//!   punctuation) are headings
//!
//! A heading closes the current section when it has accumulated content;
//! a heading reaching an empty accumulator only retitles it, so
//! back-to-back headings never emit empty sections.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::requirement::Requirement;

/// Title of the implicit opening section before any heading is seen.
pub const DEFAULT_SECTION_TITLE: &str = "Introduction";

/// Title of the single fallback section when segmentation yields nothing.
pub const FALLBACK_SECTION_TITLE: &str = "Document";

/// A segmented section before aggregation: title plus raw content lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDraft {
    pub title: String,
    /// Body lines in document order, kept verbatim.
    pub content: Vec<String>,
}

/// A fully-built section of the analyzed document.
///
/// `id` is a contiguous 0-based index in document order and the stable
/// join key used by requirements, entities, date mentions, and Q&A
/// answers. Sections are immutable once the document parse completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: usize,
    pub title: String,
    /// Content lines joined with newlines.
    pub text: String,
    pub content: Vec<String>,
    pub word_count: usize,
    /// Count of distinct risk words found in the section text.
    pub risk_score: usize,
    /// Entity names extracted from this section, first-seen order, deduped.
    pub entities: Vec<String>,
    /// Requirements classified from this section's sentences.
    pub rules: Vec<Requirement>,
}

/// Splits raw text into titled sections.
pub struct SectionSegmenter {
    /// Lines longer than this are never headings.
    max_heading_len: usize,
    /// Short-phrase headings have at most this many words.
    max_heading_words: usize,
    numbered: Regex,
    markdown: Regex,
    title_prefix: Regex,
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionSegmenter {
    pub fn new() -> Self {
        Self {
            max_heading_len: 80,
            max_heading_words: 6,
            numbered: Regex::new(r"^\d+\.\s+.+").expect("invalid numbered heading regex"),
            markdown: Regex::new(r"^#{1,6}\s").expect("invalid markdown heading regex"),
            title_prefix: Regex::new(r"^#+\s*|^\d+\.\s*").expect("invalid title prefix regex"),
        }
    }

    /// Decide whether a single line reads as a heading.
    ///
    /// Self-contained per line; no neighboring-line context is consulted.
    fn is_heading(&self, line: &str) -> bool {
        let len = line.chars().count();
        if len > self.max_heading_len {
            return false;
        }
        if self.numbered.is_match(line) {
            return true;
        }
        if len > 2 && line == line.to_uppercase() {
            return true;
        }
        if self.markdown.is_match(line) {
            return true;
        }
        // Short capitalized phrases are treated as titles, unless they end
        // like a sentence ("Users may opt out." is prose, not a title).
        if line.split_whitespace().count() <= self.max_heading_words {
            let capitalized = line.chars().next().is_some_and(|c| !c.is_lowercase());
            let sentence_like = matches!(line.trim_end().chars().last(), Some('.' | '!' | '?'));
            if capitalized && !sentence_like {
                return true;
            }
        }
        false
    }

    /// Strip leading `#` markers or a leading `N.` ordinal from a heading.
    fn clean_title(&self, line: &str) -> String {
        self.title_prefix.replace(line, "").trim().to_string()
    }

    /// Split `text` into titled sections.
    ///
    /// Always yields at least one section: a document with no
    /// heading-like lines and no content falls back to a single section
    /// titled "Document" holding the entire text.
    pub fn segment(&self, text: &str) -> Vec<SectionDraft> {
        let mut sections = Vec::new();
        let mut current = SectionDraft {
            title: DEFAULT_SECTION_TITLE.to_string(),
            content: Vec::new(),
        };

        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            if self.is_heading(line) {
                if current.content.is_empty() {
                    // Retitle in place; never emit an empty section.
                    current.title = self.clean_title(line);
                } else {
                    sections.push(std::mem::replace(
                        &mut current,
                        SectionDraft {
                            title: self.clean_title(line),
                            content: Vec::new(),
                        },
                    ));
                }
            } else {
                current.content.push(line.to_string());
            }
        }

        if !current.content.is_empty() || current.title != DEFAULT_SECTION_TITLE {
            sections.push(current);
        }

        if sections.is_empty() {
            let content = if text.is_empty() {
                Vec::new()
            } else {
                vec![text.to_string()]
            };
            sections.push(SectionDraft {
                title: FALLBACK_SECTION_TITLE.to_string(),
                content,
            });
        }

        sections
    }
}
