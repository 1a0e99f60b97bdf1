use crate::config::{ConnectorConfig, LayoutConfig};
use crate::document::{LayoutMode, MapNode};

use super::types::{ConnectorPath, Point};

/// Box side a cross-link attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AnchorSide {
    Left,
    Right,
    Top,
    Bottom,
}

fn node_width(node: &MapNode, config: &ConnectorConfig) -> f32 {
    node.width.unwrap_or(config.fallback_width)
}

fn node_height(node: &MapNode, config: &ConnectorConfig) -> f32 {
    node.height.unwrap_or(config.fallback_height)
}

fn side_point(node: &MapNode, side: AnchorSide, config: &ConnectorConfig) -> Point {
    let half_w = node_width(node, config) / 2.0;
    let half_h = node_height(node, config) / 2.0;
    match side {
        AnchorSide::Left => Point::new(node.position.x - half_w, node.position.y),
        AnchorSide::Right => Point::new(node.position.x + half_w, node.position.y),
        AnchorSide::Top => Point::new(node.position.x, node.position.y - half_h),
        AnchorSide::Bottom => Point::new(node.position.x, node.position.y + half_h),
    }
}

/// Parent-child edge geometry; the shape follows the active layout mode.
pub(super) fn branch_path(
    parent: &MapNode,
    child: &MapNode,
    mode: LayoutMode,
    config: &LayoutConfig,
) -> ConnectorPath {
    let connector = &config.connector;
    match mode {
        LayoutMode::Tree => {
            // Right-center of the parent to left-center of the child,
            // with horizontal tangents at both ends.
            let start = side_point(parent, AnchorSide::Right, connector);
            let end = side_point(child, AnchorSide::Left, connector);
            let reach = (end.x - start.x).abs() * connector.tree_tangent_ratio;
            ConnectorPath::Cubic {
                start,
                control1: Point::new(start.x + reach, start.y),
                control2: Point::new(end.x - reach, end.y),
                end,
            }
        }
        LayoutMode::OrgChart => {
            // Bottom-center of the parent to top-center of the child,
            // vertical tangents.
            let start = side_point(parent, AnchorSide::Bottom, connector);
            let end = side_point(child, AnchorSide::Top, connector);
            let reach = (end.y - start.y).abs() * connector.org_chart_tangent_ratio;
            ConnectorPath::Cubic {
                start,
                control1: Point::new(start.x, start.y + reach),
                control2: Point::new(end.x, end.y - reach),
                end,
            }
        }
        LayoutMode::List => {
            // Down from just inside the parent's bottom-left corner, then
            // right to the child's left edge.
            let start = Point::new(
                parent.position.x - node_width(parent, connector) / 2.0 + config.list.elbow_inset,
                parent.position.y + node_height(parent, connector) / 2.0,
            );
            let end = side_point(child, AnchorSide::Left, connector);
            ConnectorPath::Elbow {
                start,
                corner: Point::new(start.x, end.y),
                end,
            }
        }
    }
}

/// Picks the facing sides for a cross-link from the center-to-center
/// deltas. Horizontal dominance attaches left/right, otherwise
/// top/bottom; a `dx == dy == 0` tie falls into the vertical branch.
pub(super) fn facing_sides(dx: f32, dy: f32) -> (AnchorSide, AnchorSide) {
    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            (AnchorSide::Right, AnchorSide::Left)
        } else {
            (AnchorSide::Left, AnchorSide::Right)
        }
    } else if dy > 0.0 {
        (AnchorSide::Bottom, AnchorSide::Top)
    } else {
        (AnchorSide::Top, AnchorSide::Bottom)
    }
}

/// Free-form link between two arbitrary nodes. Handles extend from each
/// anchor along the dominant axis by a fraction of the anchor distance,
/// giving the link its S shape.
pub(super) fn cross_link_path(
    source: &MapNode,
    target: &MapNode,
    config: &ConnectorConfig,
) -> ConnectorPath {
    let dx = target.position.x - source.position.x;
    let dy = target.position.y - source.position.y;
    let (source_side, target_side) = facing_sides(dx, dy);
    let start = side_point(source, source_side, config);
    let end = side_point(target, target_side, config);

    let distance = ((end.x - start.x).powi(2) + (end.y - start.y).powi(2)).sqrt();
    let handle = distance * config.cross_link_handle_ratio;

    let (control1, control2) = if dx.abs() > dy.abs() {
        let dir = if dx > 0.0 { 1.0 } else { -1.0 };
        (
            Point::new(start.x + handle * dir, start.y),
            Point::new(end.x - handle * dir, end.y),
        )
    } else {
        let dir = if dy > 0.0 { 1.0 } else { -1.0 };
        (
            Point::new(start.x, start.y + handle * dir),
            Point::new(end.x, end.y - handle * dir),
        )
    };

    ConnectorPath::Cubic {
        start,
        control1,
        control2,
        end,
    }
}
