//! Relationship-graph payload linking recurring entities to sections.
//!
//! A flat node/edge view for navigation and visualization layers: one
//! node per section, one node per recurring entity (more than one
//! mention, capped), and an edge from each entity to the section where it
//! first occurs. Layout is the consumer's concern; this is data only.

use serde::{Deserialize, Serialize};

use crate::analysis::ExtractedData;

/// At most this many entity nodes are included.
pub const MAX_ENTITY_NODES: usize = 12;

/// Entities need at least this many mentions to appear.
const MIN_MENTIONS: usize = 2;

/// What a graph node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Section,
    Entity,
}

/// A node in the relationship graph.
///
/// Section nodes use `s-{id}` identifiers, entity nodes `e-{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

/// A directed edge from an entity node to a section node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// The assembled graph payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl RelationshipGraph {
    /// Build the graph from an analyzed document.
    pub fn build(data: &ExtractedData) -> Self {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();

        for section in &data.sections {
            nodes.push(GraphNode {
                id: format!("s-{}", section.id),
                label: section.title.clone(),
                kind: NodeKind::Section,
            });
        }

        let recurring = data
            .entities
            .iter()
            .filter(|e| e.mentions >= MIN_MENTIONS)
            .take(MAX_ENTITY_NODES);
        for entity in recurring {
            nodes.push(GraphNode {
                id: format!("e-{}", entity.name),
                label: entity.name.clone(),
                kind: NodeKind::Entity,
            });
            let section_id = entity.first_occurrence.section_id;
            if data.sections.iter().any(|s| s.id == section_id) {
                edges.push(GraphEdge {
                    from: format!("e-{}", entity.name),
                    to: format!("s-{section_id}"),
                });
            }
        }

        Self { nodes, edges }
    }
}
