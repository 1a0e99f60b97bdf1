use crate::config::ListLayoutConfig;
use crate::document::{MapNode, Position};

use super::index::TreeIndex;

const DEFAULT_WIDTH: f32 = 120.0;
const DEFAULT_HEIGHT: f32 = 40.0;

/// Indented list: a single pre-order walk with a running vertical cursor.
/// The column is left-aligned at the root's incoming center x; every tree
/// level shifts one indent step right. Node anchors stay centers, so each
/// x compensates by half the node's width.
pub(super) fn compute_list_layout(
    nodes: &mut [MapNode],
    index: &TreeIndex,
    config: &ListLayoutConfig,
) {
    let Some(root_id) = index.root().map(str::to_string) else {
        return;
    };
    let Some(root_slot) = index.slot(&root_id) else {
        return;
    };
    let start_x = nodes[root_slot].position.x;
    let root_height = nodes[root_slot].height.unwrap_or(DEFAULT_HEIGHT);
    // Flow starts at the root's current top edge so the root roughly
    // keeps its place on screen.
    let mut cursor_y = nodes[root_slot].position.y - root_height / 2.0;
    place(&root_id, 0, start_x, &mut cursor_y, nodes, index, config);
}

fn place(
    id: &str,
    depth: usize,
    start_x: f32,
    cursor_y: &mut f32,
    nodes: &mut [MapNode],
    index: &TreeIndex,
    config: &ListLayoutConfig,
) {
    let Some(slot) = index.slot(id) else {
        return;
    };
    let width = nodes[slot].width.unwrap_or(DEFAULT_WIDTH);
    let height = nodes[slot].height.unwrap_or(DEFAULT_HEIGHT);
    nodes[slot].position = Position {
        x: start_x + depth as f32 * config.indent + width / 2.0,
        y: *cursor_y + height / 2.0,
    };
    *cursor_y += height + config.vertical_gap;

    if nodes[slot].is_collapsed() {
        return;
    }
    for child_id in index.children_of(id).to_vec() {
        place(&child_id, depth + 1, start_x, cursor_y, nodes, index, config);
    }
}
