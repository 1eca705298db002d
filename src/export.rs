//! Export payload builders: CSV tables and JSON summaries.
//!
//! Flat, presentation-ready exports of the analysis results. CSV quoting
//! is minimal by design: only requirement text (free prose) is quoted,
//! with embedded quotes doubled.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::analysis::ExtractedData;
use crate::requirement::Requirement;

/// A requirement expanded into a review-checklist row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistRow {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub section: String,
    pub priority: String,
    pub rationale: String,
    pub verification: String,
}

/// Entities as a `Name,Type,Mentions` CSV table.
pub fn entities_csv(data: &ExtractedData) -> String {
    let mut lines = vec!["Name,Type,Mentions".to_string()];
    for entity in &data.entities {
        lines.push(format!(
            "{},{},{}",
            entity.name, entity.kind, entity.mentions
        ));
    }
    lines.join("\n")
}

/// Requirements as a `Text,Type,Section,Priority` CSV table.
pub fn requirements_csv(data: &ExtractedData) -> String {
    let mut lines = vec!["Text,Type,Section,Priority".to_string()];
    for req in &data.requirements {
        lines.push(format!(
            "\"{}\",{},{},{}",
            quote(&req.text),
            req.kind,
            req.section,
            req.priority
        ));
    }
    lines.join("\n")
}

/// Expand requirements into checklist rows with the fixed rationale and
/// verification columns.
pub fn requirements_checklist(requirements: &[Requirement]) -> Vec<ChecklistRow> {
    requirements
        .iter()
        .map(|req| ChecklistRow {
            text: req.text.clone(),
            kind: req.kind.to_string(),
            section: req.section.clone(),
            priority: req.priority.to_string(),
            rationale: format!("Section: {}", req.section),
            verification: "Manual review".to_string(),
        })
        .collect()
}

/// Checklist rows as a CSV table.
pub fn checklist_csv(rows: &[ChecklistRow]) -> String {
    let mut lines = vec!["Text,Type,Section,Priority,Rationale,Verification".to_string()];
    for row in rows {
        lines.push(format!(
            "\"{}\",{},{},{},{},{}",
            quote(&row.text),
            row.kind,
            row.section,
            row.priority,
            row.rationale,
            row.verification
        ));
    }
    lines.join("\n")
}

/// Checklist rows as a JSON array.
pub fn checklist_json(rows: &[ChecklistRow]) -> Value {
    Value::Array(
        rows.iter()
            .map(|row| {
                json!({
                    "text": row.text,
                    "type": row.kind,
                    "section": row.section,
                    "priority": row.priority,
                    "rationale": row.rationale,
                    "verification": row.verification,
                })
            })
            .collect(),
    )
}

/// High-level counts and metadata as a JSON summary.
pub fn summary_json(data: &ExtractedData) -> Value {
    json!({
        "sections": data.sections.len(),
        "entities": data.entities.len(),
        "requirements": data.requirements.len(),
        "metadata": data.metadata,
    })
}

fn quote(text: &str) -> String {
    text.replace('"', "\"\"")
}
