//! Mind maps generated from notes

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::GeneratedMindMap;
use crate::notes::Note;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapNode {
    pub id: String,
    pub label: String,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMap {
    pub note_id: Uuid,
    pub note_title: String,
    pub nodes: Vec<MindMapNode>,
    pub edges: Vec<MindMapEdge>,
}

impl MindMap {
    /// Attach a generated map to its note. Duplicate node ids keep their
    /// first occurrence; edges touching unknown ids are dropped.
    pub fn from_generated(note: &Note, generated: GeneratedMindMap) -> Self {
        let mut seen = HashSet::new();
        let nodes: Vec<MindMapNode> = generated
            .nodes
            .into_iter()
            .filter(|n| seen.insert(n.id.clone()))
            .collect();

        let mut edges: Vec<MindMapEdge> = Vec::new();
        for edge in generated.edges {
            let known = seen.contains(&edge.from) && seen.contains(&edge.to);
            if known && edge.from != edge.to && !edges.contains(&edge) {
                edges.push(edge);
            } else {
                log::warn!("Dropping mind map edge {} -> {}", edge.from, edge.to);
            }
        }

        Self {
            note_id: note.id,
            note_title: note.title.clone(),
            nodes,
            edges,
        }
    }

    pub fn node(&self, id: &str) -> Option<&MindMapNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn children(&self, id: &str) -> Vec<&MindMapNode> {
        self.edges
            .iter()
            .filter(|e| e.from == id)
            .filter_map(|e| self.node(&e.to))
            .collect()
    }

    /// Level-0 nodes, or nodes nothing points to when no level-0 node exists
    pub fn roots(&self) -> Vec<&MindMapNode> {
        let top: Vec<&MindMapNode> = self.nodes.iter().filter(|n| n.level == 0).collect();
        if !top.is_empty() {
            return top;
        }
        self.nodes
            .iter()
            .filter(|n| !self.edges.iter().any(|e| e.to == n.id))
            .collect()
    }
}

/// Store a map, replacing any earlier map of the same note
pub fn store_map(maps: &mut Vec<MindMap>, map: MindMap) {
    maps.retain(|m| m.note_id != map.note_id);
    maps.push(map);
}

pub fn find_map(maps: &[MindMap], note_id: Uuid) -> Option<&MindMap> {
    maps.iter().find(|m| m.note_id == note_id)
}
