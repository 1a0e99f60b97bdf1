use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    pub background_color: String,
    pub color: String,
    pub font_size: f32,
    pub border_radius: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapNode {
    pub id: String,
    pub parent_id: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub position: Position,
    pub style: NodeStyle,
    /// Tri-state expansion flag; `None` means expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_expanded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl MapNode {
    pub fn is_collapsed(&self) -> bool {
        self.is_expanded == Some(false)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Non-hierarchical edge between two nodes, independent of the parent tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossLink {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    #[default]
    Tree,
    OrgChart,
    List,
}

impl LayoutMode {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "tree" | "mindmap" => Some(Self::Tree),
            "org-chart" | "orgchart" => Some(Self::OrgChart),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapDocument {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub theme_id: String,
    #[serde(default)]
    pub layout_mode: LayoutMode,
    pub nodes: Vec<MapNode>,
    pub connections: Vec<CrossLink>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate node id `{0}`")]
    DuplicateNodeId(String),
    #[error("duplicate connection id `{0}`")]
    DuplicateConnectionId(String),
}

/// Parses a persisted document and checks the id-uniqueness contract.
///
/// Uniqueness holds across nodes and separately across connections. Other
/// structural defects (dangling parent ids, missing root) are tolerated
/// here and degrade locally during layout instead.
pub fn parse_document(input: &str) -> Result<MindMapDocument, DocumentError> {
    let doc: MindMapDocument = serde_json::from_str(input)?;
    let mut node_ids = HashSet::new();
    for node in &doc.nodes {
        if !node_ids.insert(node.id.as_str()) {
            return Err(DocumentError::DuplicateNodeId(node.id.clone()));
        }
    }
    let mut link_ids = HashSet::new();
    for link in &doc.connections {
        if !link_ids.insert(link.id.as_str()) {
            return Err(DocumentError::DuplicateConnectionId(link.id.clone()));
        }
    }
    Ok(doc)
}

pub fn document_to_json(doc: &MindMapDocument) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(doc)?)
}
