use std::collections::HashMap;

use crate::config::OrgChartLayoutConfig;
use crate::document::{MapNode, Position};

use super::index::TreeIndex;

const DEFAULT_WIDTH: f32 = 120.0;
const DEFAULT_HEIGHT: f32 = 40.0;

/// Vertical org-chart: the rotation of the horizontal tree. Children hang
/// below their parent, sibling blocks horizontally centered on it.
pub(super) fn compute_org_chart_layout(
    nodes: &mut [MapNode],
    index: &TreeIndex,
    config: &OrgChartLayoutConfig,
) {
    let Some(root_id) = index.root().map(str::to_string) else {
        return;
    };
    let mut subtree_widths = HashMap::new();
    subtree_width(
        &root_id,
        nodes,
        index,
        &mut subtree_widths,
        config.horizontal_gap,
    );
    let Some(root_slot) = index.slot(&root_id) else {
        return;
    };
    let root_center = nodes[root_slot].position;
    place(
        &root_id,
        root_center.x,
        root_center.y,
        nodes,
        index,
        &subtree_widths,
        config,
    );
}

/// Main-axis extent of a node's visible subtree: own width, or the width
/// of the children's row when that is larger.
pub(super) fn subtree_width(
    id: &str,
    nodes: &[MapNode],
    index: &TreeIndex,
    memo: &mut HashMap<String, f32>,
    gap: f32,
) -> f32 {
    if let Some(value) = memo.get(id) {
        return *value;
    }
    let Some(slot) = index.slot(id) else {
        return 0.0;
    };
    let node = &nodes[slot];
    let own = node.width.unwrap_or(DEFAULT_WIDTH);
    let children = index.children_of(id);

    let total = if node.is_collapsed() || children.is_empty() {
        own
    } else {
        let mut block = 0.0;
        for child_id in children {
            block += subtree_width(child_id, nodes, index, memo, gap);
        }
        block += gap * (children.len() as f32 - 1.0);
        own.max(block)
    };
    memo.insert(id.to_string(), total);
    total
}

fn place(
    id: &str,
    x_center: f32,
    y: f32,
    nodes: &mut [MapNode],
    index: &TreeIndex,
    subtree_widths: &HashMap<String, f32>,
    config: &OrgChartLayoutConfig,
) {
    let Some(slot) = index.slot(id) else {
        return;
    };
    nodes[slot].position = Position { x: x_center, y };
    let parent_height = nodes[slot].height.unwrap_or(DEFAULT_HEIGHT);
    if nodes[slot].is_collapsed() {
        return;
    }
    let children = index.children_of(id);
    if children.is_empty() {
        return;
    }

    let mut block_width = 0.0;
    for child_id in children {
        block_width += subtree_widths.get(child_id).copied().unwrap_or(0.0);
    }
    block_width += config.horizontal_gap * (children.len() as f32 - 1.0);

    let mut cursor = x_center - block_width / 2.0;
    for child_id in children {
        let child_width = subtree_widths.get(child_id).copied().unwrap_or(0.0);
        let child_height = index
            .slot(child_id)
            .map(|child_slot| nodes[child_slot].height.unwrap_or(DEFAULT_HEIGHT))
            .unwrap_or(DEFAULT_HEIGHT);
        let child_x = cursor + child_width / 2.0;
        let child_y = y + parent_height / 2.0 + config.vertical_gap + child_height / 2.0;
        place(
            child_id,
            child_x,
            child_y,
            nodes,
            index,
            subtree_widths,
            config,
        );
        cursor += child_width + config.horizontal_gap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::default_node_style;

    fn sized_node(id: &str, parent: Option<&str>, width: f32, height: f32) -> MapNode {
        MapNode {
            id: id.to_string(),
            parent_id: parent.map(str::to_string),
            content: id.to_string(),
            note: None,
            position: Position::default(),
            style: default_node_style(),
            is_expanded: None,
            width: Some(width),
            height: Some(height),
        }
    }

    #[test]
    fn children_hang_below_and_split_horizontally() {
        let mut nodes = vec![
            sized_node("a", None, 120.0, 40.0),
            sized_node("b", Some("a"), 120.0, 40.0),
            sized_node("c", Some("a"), 120.0, 40.0),
        ];
        nodes[0].position = Position { x: 200.0, y: 100.0 };
        let index = TreeIndex::build(&nodes);
        compute_org_chart_layout(&mut nodes, &index, &OrgChartLayoutConfig::default());

        // 20 (half parent) + 60 (gap) + 20 (half child) = 100 below.
        assert_eq!(nodes[1].position.y, 200.0);
        assert_eq!(nodes[2].position.y, 200.0);
        // Row of 120 + 30 + 120 centered on x = 200.
        assert_eq!(nodes[1].position.x, 200.0 - 75.0);
        assert_eq!(nodes[2].position.x, 200.0 + 75.0);
    }

    #[test]
    fn subtree_width_accumulates_grandchildren() {
        let nodes = vec![
            sized_node("a", None, 120.0, 40.0),
            sized_node("b", Some("a"), 120.0, 40.0),
            sized_node("c", Some("b"), 200.0, 40.0),
            sized_node("d", Some("b"), 200.0, 40.0),
        ];
        let index = TreeIndex::build(&nodes);
        let mut memo = HashMap::new();
        // b's row: 200 + 30 + 200 = 430, wider than b itself and than a.
        assert_eq!(subtree_width("a", &nodes, &index, &mut memo, 30.0), 430.0);
    }

    #[test]
    fn collapsed_subtree_collapses_to_own_width() {
        let mut nodes = vec![
            sized_node("a", None, 120.0, 40.0),
            sized_node("b", Some("a"), 120.0, 40.0),
            sized_node("c", Some("b"), 500.0, 40.0),
        ];
        nodes[1].is_expanded = Some(false);
        let index = TreeIndex::build(&nodes);
        let mut memo = HashMap::new();
        assert_eq!(subtree_width("b", &nodes, &index, &mut memo, 30.0), 120.0);
    }

    #[test]
    fn siblings_keep_input_order_left_to_right() {
        let mut nodes = vec![
            sized_node("root", None, 120.0, 40.0),
            sized_node("first", Some("root"), 120.0, 40.0),
            sized_node("second", Some("root"), 120.0, 40.0),
        ];
        let index = TreeIndex::build(&nodes);
        compute_org_chart_layout(&mut nodes, &index, &OrgChartLayoutConfig::default());
        assert!(nodes[1].position.x < nodes[2].position.x);
    }
}
