//! Document overview payload: excerpts, takeaways, and topic counts.
//!
//! A compact summary view derived from the analyzed document: opening and
//! closing excerpts, one takeaway per early section, how many sections
//! carry risk wording, and the most frequent entity topics.

use serde::{Deserialize, Serialize};

use crate::analysis::ExtractedData;

/// Characters taken for the introduction/conclusion excerpts.
const EXCERPT_CHARS: usize = 300;

/// Sections considered for key takeaways (after the first).
const MAX_TAKEAWAYS: usize = 4;

/// Topics listed in the frequency ranking.
const MAX_TOPICS: usize = 8;

/// A section title with its leading sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Takeaway {
    pub title: String,
    pub lead: String,
}

/// An entity name with its sections-mentioning count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCount {
    pub name: String,
    pub count: usize,
}

/// Summary payload for overview displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOverview {
    /// First characters of the opening section.
    pub introduction: String,
    /// First characters of the closing section, when distinct.
    pub conclusion: Option<String>,
    pub key_takeaways: Vec<Takeaway>,
    /// Number of sections with a nonzero risk score.
    pub sections_with_risk: usize,
    /// Entity topics by descending count.
    pub top_topics: Vec<TopicCount>,
}

impl DocumentOverview {
    /// Derive the overview from an analyzed document.
    pub fn from_analysis(data: &ExtractedData) -> Self {
        let introduction = data
            .sections
            .first()
            .map(|s| excerpt(&s.text))
            .unwrap_or_default();
        let conclusion = if data.sections.len() > 1 {
            data.sections.last().map(|s| excerpt(&s.text))
        } else {
            None
        };

        let key_takeaways = data
            .sections
            .iter()
            .skip(1)
            .take(MAX_TAKEAWAYS)
            .map(|s| Takeaway {
                title: s.title.clone(),
                lead: format!("{}.", s.text.split('.').next().unwrap_or_default()),
            })
            .collect();

        let sections_with_risk = data.sections.iter().filter(|s| s.risk_score > 0).count();

        let mut counts: Vec<(&String, &usize)> = data.entity_counts.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1));
        let top_topics = counts
            .into_iter()
            .take(MAX_TOPICS)
            .map(|(name, count)| TopicCount {
                name: name.clone(),
                count: *count,
            })
            .collect();

        Self {
            introduction,
            conclusion,
            key_takeaways,
            sections_with_risk,
            top_topics,
        }
    }
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}
