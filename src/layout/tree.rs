use std::collections::HashMap;

use crate::config::TreeLayoutConfig;
use crate::document::{MapNode, Position};

use super::index::TreeIndex;

const DEFAULT_WIDTH: f32 = 120.0;
const DEFAULT_HEIGHT: f32 = 50.0;

/// Horizontal tree: the root keeps its current center, children fan out
/// to the right, each sibling block vertically centered on its parent.
pub(super) fn compute_tree_layout(
    nodes: &mut [MapNode],
    index: &TreeIndex,
    config: &TreeLayoutConfig,
) {
    let Some(root_id) = index.root().map(str::to_string) else {
        return;
    };
    let mut subtree_heights = HashMap::new();
    subtree_height(
        &root_id,
        nodes,
        index,
        &mut subtree_heights,
        config.vertical_gap,
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
        &subtree_heights,
        config,
    );
}

/// Cross-axis extent of a node's visible subtree: the node's own height,
/// or the height of its children's stacked blocks when that is larger.
pub(super) fn subtree_height(
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
    let own = node.height.unwrap_or(DEFAULT_HEIGHT);
    let children = index.children_of(id);

    let total = if node.is_collapsed() || children.is_empty() {
        own
    } else {
        let mut block = 0.0;
        for child_id in children {
            block += subtree_height(child_id, nodes, index, memo, gap);
        }
        block += gap * (children.len() as f32 - 1.0);
        own.max(block)
    };
    memo.insert(id.to_string(), total);
    total
}

fn place(
    id: &str,
    x: f32,
    y_center: f32,
    nodes: &mut [MapNode],
    index: &TreeIndex,
    subtree_heights: &HashMap<String, f32>,
    config: &TreeLayoutConfig,
) {
    let Some(slot) = index.slot(id) else {
        return;
    };
    nodes[slot].position = Position { x, y: y_center };
    let parent_width = nodes[slot].width.unwrap_or(DEFAULT_WIDTH);
    if nodes[slot].is_collapsed() {
        return;
    }
    let children = index.children_of(id);
    if children.is_empty() {
        return;
    }

    let mut block_height = 0.0;
    for child_id in children {
        block_height += subtree_heights.get(child_id).copied().unwrap_or(0.0);
    }
    block_height += config.vertical_gap * (children.len() as f32 - 1.0);

    let mut cursor = y_center - block_height / 2.0;
    for child_id in children {
        let child_height = subtree_heights.get(child_id).copied().unwrap_or(0.0);
        let child_width = index
            .slot(child_id)
            .map(|child_slot| nodes[child_slot].width.unwrap_or(DEFAULT_WIDTH))
            .unwrap_or(DEFAULT_WIDTH);
        let child_x = x + parent_width / 2.0 + config.horizontal_gap + child_width / 2.0;
        let child_y = cursor + child_height / 2.0;
        place(
            child_id,
            child_x,
            child_y,
            nodes,
            index,
            subtree_heights,
            config,
        );
        cursor += child_height + config.vertical_gap;
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

    fn positions(nodes: &[MapNode]) -> HashMap<String, Position> {
        nodes
            .iter()
            .map(|node| (node.id.clone(), node.position))
            .collect()
    }

    #[test]
    fn two_children_fan_out_right_and_split_vertically() {
        let mut nodes = vec![
            sized_node("a", None, 120.0, 40.0),
            sized_node("b", Some("a"), 120.0, 40.0),
            sized_node("c", Some("a"), 120.0, 40.0),
        ];
        nodes[0].position = Position { x: 400.0, y: 300.0 };
        let index = TreeIndex::build(&nodes);
        compute_tree_layout(&mut nodes, &index, &TreeLayoutConfig::default());

        let pos = positions(&nodes);
        assert_eq!(pos["a"], Position { x: 400.0, y: 300.0 });
        // 60 (half parent) + 50 (gap) + 60 (half child) = 170 to the right.
        assert_eq!(pos["b"].x, 570.0);
        assert_eq!(pos["c"].x, 570.0);
        // Sibling block of 40 + 20 + 40 centered on the parent.
        assert_eq!(pos["b"].y, 270.0);
        assert_eq!(pos["c"].y, 330.0);
    }

    #[test]
    fn root_with_no_children_keeps_its_position() {
        let mut nodes = vec![sized_node("only", None, 140.0, 52.0)];
        nodes[0].position = Position { x: 33.0, y: -7.5 };
        let index = TreeIndex::build(&nodes);
        compute_tree_layout(&mut nodes, &index, &TreeLayoutConfig::default());
        assert_eq!(nodes[0].position, Position { x: 33.0, y: -7.5 });
    }

    #[test]
    fn subtree_height_is_at_least_own_height() {
        let nodes = vec![
            sized_node("a", None, 120.0, 200.0),
            sized_node("b", Some("a"), 120.0, 40.0),
        ];
        let index = TreeIndex::build(&nodes);
        let mut memo = HashMap::new();
        let height = subtree_height("a", &nodes, &index, &mut memo, 20.0);
        assert_eq!(height, 200.0);
        // Leaf extent equals its own height.
        assert_eq!(memo["b"], 40.0);
    }

    #[test]
    fn children_block_wins_when_taller_than_parent() {
        let nodes = vec![
            sized_node("a", None, 120.0, 40.0),
            sized_node("b", Some("a"), 120.0, 40.0),
            sized_node("c", Some("a"), 120.0, 40.0),
            sized_node("d", Some("a"), 120.0, 40.0),
        ];
        let index = TreeIndex::build(&nodes);
        let mut memo = HashMap::new();
        // 3 * 40 + 2 * 20 = 160
        assert_eq!(subtree_height("a", &nodes, &index, &mut memo, 20.0), 160.0);
    }

    #[test]
    fn collapsed_parent_is_placed_but_children_stay_put() {
        let mut nodes = vec![
            sized_node("a", None, 120.0, 40.0),
            sized_node("b", Some("a"), 120.0, 40.0),
            sized_node("c", Some("b"), 120.0, 40.0),
        ];
        nodes[1].is_expanded = Some(false);
        nodes[2].position = Position { x: -99.0, y: -99.0 };
        let index = TreeIndex::build(&nodes);
        compute_tree_layout(&mut nodes, &index, &TreeLayoutConfig::default());

        let pos = positions(&nodes);
        // The collapsed node itself is positioned next to the root.
        assert_eq!(pos["b"].x, 170.0);
        // Its hidden child keeps its last known position.
        assert_eq!(pos["c"], Position { x: -99.0, y: -99.0 });
        // And the collapsed subtree occupies only the node's own extent.
        let mut memo = HashMap::new();
        assert_eq!(subtree_height("b", &nodes, &index, &mut memo, 20.0), 40.0);
    }

    #[test]
    fn siblings_keep_input_order_top_to_bottom() {
        let mut nodes = vec![
            sized_node("root", None, 120.0, 40.0),
            sized_node("first", Some("root"), 120.0, 40.0),
            sized_node("second", Some("root"), 120.0, 40.0),
            sized_node("third", Some("root"), 120.0, 40.0),
        ];
        let index = TreeIndex::build(&nodes);
        compute_tree_layout(&mut nodes, &index, &TreeLayoutConfig::default());
        let pos = positions(&nodes);
        assert!(pos["first"].y < pos["second"].y);
        assert!(pos["second"].y < pos["third"].y);
    }
}
