//! Shared low-level text utilities: sentence splitting, word tokenization,
//! and stop-word filtering.
//!
//! The segmenter, the requirement classifier, and the Q&A index all share
//! these heuristics so that sentence and token boundaries agree across the
//! pipeline. The rules are deliberately simple and self-contained per
//! call; no look-behind state is carried between lines or sentences.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Fixed English stop-word list applied by the Q&A tokenizer.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "can",
        "of", "in", "to", "for", "with", "on", "at", "by", "from",
    ]
    .into_iter()
    .collect()
});

/// Returns true if `word` is on the fixed stop-word list.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Split text into sentences after `.`, `!`, or `?` followed by whitespace.
///
/// The terminal punctuation stays with its sentence and the whitespace run
/// is consumed. Decimal points and other mid-token punctuation never split
/// because no whitespace follows them. Honorifics like "Dr." do split;
/// downstream consumers tolerate the resulting fragments.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        match chars.peek() {
            Some(&(_, next)) if next.is_whitespace() => {}
            _ => continue,
        }
        let end = idx + c.len_utf8();
        if end > start {
            sentences.push(&text[start..end]);
        }
        while let Some(&(_, w)) = chars.peek() {
            if w.is_whitespace() {
                chars.next();
            } else {
                break;
            }
        }
        start = chars.peek().map(|&(i, _)| i).unwrap_or(text.len());
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// Lower-cased word-class tokens of length > 2.
///
/// Punctuation is stripped to whitespace first, so "opt-out" yields
/// "opt" and "out" (the latter surviving the length filter, the former
/// too). ASCII alphanumerics and underscore count as word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else if c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .map(str::to_string)
        .collect()
}

/// Tokenize and drop stop words; the shared token stream for scoring.
pub fn content_tokens(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|w| !is_stop_word(w))
        .collect()
}

/// Whitespace-delimited word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
