use crate::document::{LayoutMode, MapNode};
use crate::layout::{Connector, ConnectorKind, visible_node_ids};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Machine-readable snapshot of a finished layout pass, for golden tests
/// and debugging.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub layout_mode: LayoutMode,
    pub nodes: Vec<NodeDump>,
    pub connectors: Vec<ConnectorDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub x: f32,
    pub y: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub visible: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorDump {
    pub id: String,
    pub kind: String,
    pub from: String,
    pub to: String,
    pub path: String,
    pub label_anchor: [f32; 2],
    pub label: Option<String>,
}

impl LayoutDump {
    pub fn from_snapshot(nodes: &[MapNode], connectors: &[Connector], mode: LayoutMode) -> Self {
        let visible: HashSet<String> = visible_node_ids(nodes).into_iter().collect();
        let nodes = nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                parent_id: node.parent_id.clone(),
                content: node.content.clone(),
                x: node.position.x,
                y: node.position.y,
                width: node.width,
                height: node.height,
                visible: visible.contains(&node.id),
            })
            .collect();

        let connectors = connectors
            .iter()
            .map(|connector| ConnectorDump {
                id: connector.id.clone(),
                kind: match connector.kind {
                    ConnectorKind::Branch => "branch".to_string(),
                    ConnectorKind::CrossLink => "cross-link".to_string(),
                },
                from: connector.from.clone(),
                to: connector.to.clone(),
                path: connector.path.to_svg(),
                label_anchor: [connector.label_anchor.x, connector.label_anchor.y],
                label: connector.label.clone(),
            })
            .collect();

        LayoutDump {
            layout_mode: mode,
            nodes,
            connectors,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn write_layout_dump(
    path: &Path,
    nodes: &[MapNode],
    connectors: &[Connector],
    mode: LayoutMode,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_snapshot(nodes, connectors, mode);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
