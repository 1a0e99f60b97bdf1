mod connectors;
mod index;
mod list;
mod orgchart;
mod sizing;
mod styling;
mod tree;
pub(crate) mod types;

pub use index::TreeIndex;
pub use sizing::{HeuristicMeasurer, MeasureText, SystemFontMeasurer, measure_node, wrap_content};
pub use styling::legible_text_color;
pub use types::*;

use std::collections::HashSet;

use crate::config::LayoutConfig;
use crate::document::{CrossLink, LayoutMode, MapNode};
use crate::theme::Theme;

/// Runs the full sizing + positioning pass over a node snapshot and
/// returns a new snapshot: every node gets `width`/`height` derived from
/// its content, and every node reachable from the root gets a fresh
/// `position` under the requested layout mode. Node identity, count and
/// order are preserved. A map with no root keeps all positions untouched.
///
/// The parent relation must be acyclic; a cyclic `parentId` chain
/// recurses without bound and is a caller contract violation, not a
/// recoverable error.
pub fn compute_layout(
    nodes: &[MapNode],
    mode: LayoutMode,
    config: &LayoutConfig,
    measurer: &dyn MeasureText,
) -> Vec<MapNode> {
    let mut out = nodes.to_vec();
    for node in &mut out {
        let (width, height) = sizing::measure_node(
            &node.content,
            node.style.font_size,
            measurer,
            &config.sizing,
        );
        node.width = Some(width);
        node.height = Some(height);
    }

    let tree_index = TreeIndex::build(&out);
    if tree_index.root().is_none() {
        return out;
    }
    match mode {
        LayoutMode::Tree => tree::compute_tree_layout(&mut out, &tree_index, &config.tree),
        LayoutMode::OrgChart => {
            orgchart::compute_org_chart_layout(&mut out, &tree_index, &config.org_chart)
        }
        LayoutMode::List => list::compute_list_layout(&mut out, &tree_index, &config.list),
    }
    out
}

/// Restyles a node snapshot from a theme; see `styling::apply_theme`.
pub fn apply_theme(nodes: &[MapNode], theme: &Theme) -> Vec<MapNode> {
    styling::apply_theme(nodes, theme)
}

/// Ids of all nodes visible on screen, in pre-order: a node is visible
/// when every ancestor up to a root is expanded. Collapsed nodes are
/// themselves visible; their subtrees are not.
pub fn visible_node_ids(nodes: &[MapNode]) -> Vec<String> {
    let tree_index = TreeIndex::build(nodes);
    let mut out = Vec::new();
    for root_id in tree_index.roots().to_vec() {
        collect_visible(&root_id, nodes, &tree_index, &mut out);
    }
    out
}

fn collect_visible(id: &str, nodes: &[MapNode], tree_index: &TreeIndex, out: &mut Vec<String>) {
    let Some(slot) = tree_index.slot(id) else {
        return;
    };
    out.push(id.to_string());
    if nodes[slot].is_collapsed() {
        return;
    }
    for child_id in tree_index.children_of(id) {
        collect_visible(child_id, nodes, tree_index, out);
    }
}

/// Connector geometry for the current snapshot: one branch connector per
/// visible parent-child edge, plus every cross-link whose endpoints are
/// both visible.
pub fn connector_layouts(
    nodes: &[MapNode],
    links: &[CrossLink],
    mode: LayoutMode,
    config: &LayoutConfig,
) -> Vec<Connector> {
    let tree_index = TreeIndex::build(nodes);
    let visible = visible_node_ids(nodes);
    let visible_set: HashSet<&str> = visible.iter().map(String::as_str).collect();

    let mut out = Vec::new();
    for id in &visible {
        let Some(slot) = tree_index.slot(id) else {
            continue;
        };
        let node = &nodes[slot];
        let Some(parent_id) = node.parent_id.as_deref() else {
            continue;
        };
        if !visible_set.contains(parent_id) {
            continue;
        }
        let Some(parent_slot) = tree_index.slot(parent_id) else {
            continue;
        };
        let path = connectors::branch_path(&nodes[parent_slot], node, mode, config);
        out.push(Connector {
            id: format!("{parent_id}->{id}"),
            kind: ConnectorKind::Branch,
            from: parent_id.to_string(),
            to: id.clone(),
            label_anchor: path.label_anchor(),
            path,
            label: None,
        });
    }

    for link in links {
        if !visible_set.contains(link.source_id.as_str())
            || !visible_set.contains(link.target_id.as_str())
        {
            continue;
        }
        let (Some(source_slot), Some(target_slot)) = (
            tree_index.slot(&link.source_id),
            tree_index.slot(&link.target_id),
        ) else {
            continue;
        };
        let path =
            connectors::cross_link_path(&nodes[source_slot], &nodes[target_slot], &config.connector);
        out.push(Connector {
            id: link.id.clone(),
            kind: ConnectorKind::CrossLink,
            from: link.source_id.clone(),
            to: link.target_id.clone(),
            label_anchor: path.label_anchor(),
            path,
            label: link.label.clone(),
        });
    }

    out
}
