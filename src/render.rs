use crate::config::Config;
use crate::document::MapNode;
use crate::layout::{
    Bounds, Connector, ConnectorKind, MeasureText, visible_node_ids, wrap_content,
};
use crate::theme::Theme;
use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;

const FALLBACK_WIDTH: f32 = 120.0;
const FALLBACK_HEIGHT: f32 = 40.0;
const LABEL_PAD_X: f32 = 6.0;
const LABEL_PAD_Y: f32 = 3.0;
const LABEL_FONT_SIZE: f32 = 12.0;

/// Renders a laid-out snapshot to SVG. Only visible nodes and the given
/// connectors are drawn; the canvas is sized from their bounding box
/// plus the configured margin.
pub fn render_svg(
    nodes: &[MapNode],
    connectors: &[Connector],
    theme: &Theme,
    config: &Config,
    measurer: &dyn MeasureText,
) -> String {
    let visible: HashSet<String> = visible_node_ids(nodes).into_iter().collect();

    let mut bounds = Bounds::empty();
    for node in nodes.iter().filter(|n| visible.contains(&n.id)) {
        let width = node.width.unwrap_or(FALLBACK_WIDTH);
        let height = node.height.unwrap_or(FALLBACK_HEIGHT);
        bounds.include_rect(
            node.position.x - width / 2.0,
            node.position.y - height / 2.0,
            width,
            height,
        );
    }
    if bounds.is_empty() {
        bounds.include_rect(0.0, 0.0, 200.0, 200.0);
    }
    let margin = config.render.margin;
    let min_x = bounds.min_x - margin;
    let min_y = bounds.min_y - margin;
    let width = bounds.width() + margin * 2.0;
    let height = bounds.height() + margin * 2.0;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"{min_x:.2} {min_y:.2} {width:.2} {height:.2}\">",
    ));
    svg.push_str(&format!(
        "<rect x=\"{min_x:.2}\" y=\"{min_y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{}\"/>",
        escape_xml(&theme.background)
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"crosslink-arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        escape_xml(&theme.line_color)
    ));
    svg.push_str("</defs>");

    for connector in connectors {
        match connector.kind {
            ConnectorKind::Branch => {
                svg.push_str(&format!(
                    "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
                    connector.path.to_svg(),
                    escape_xml(&theme.line_color),
                    config.render.edge_stroke_width
                ));
            }
            ConnectorKind::CrossLink => {
                svg.push_str(&format!(
                    "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-dasharray=\"{}\" marker-end=\"url(#crosslink-arrow)\"/>",
                    connector.path.to_svg(),
                    escape_xml(&theme.line_color),
                    config.render.edge_stroke_width,
                    escape_xml(&config.render.cross_link_dasharray)
                ));
                if let Some(label) = connector.label.as_deref() {
                    svg.push_str(&cross_link_label_svg(connector, label, theme, config));
                }
            }
        }
    }

    for node in nodes.iter().filter(|n| visible.contains(&n.id)) {
        svg.push_str(&node_svg(node, config, measurer));
    }

    svg.push_str("</svg>");
    svg
}

fn cross_link_label_svg(
    connector: &Connector,
    label: &str,
    theme: &Theme,
    config: &Config,
) -> String {
    let anchor = connector.label_anchor;
    // Rough pill sizing; the label font is fixed and small.
    let text_width = label.chars().count() as f32 * LABEL_FONT_SIZE * 0.55;
    let rect_w = text_width + LABEL_PAD_X * 2.0;
    let rect_h = LABEL_FONT_SIZE + LABEL_PAD_Y * 2.0;
    let mut out = String::new();
    out.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{rect_w:.2}\" height=\"{rect_h:.2}\" rx=\"4\" ry=\"4\" fill=\"{}\" stroke=\"{}\" stroke-width=\"0.8\"/>",
        anchor.x - rect_w / 2.0,
        anchor.y - rect_h / 2.0,
        escape_xml(&theme.background),
        escape_xml(&theme.line_color)
    ));
    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{LABEL_FONT_SIZE}\" fill=\"{}\">{}</text>",
        anchor.x,
        anchor.y + LABEL_FONT_SIZE * 0.35,
        escape_xml(&config.layout.font_family),
        escape_xml(&theme.line_color),
        escape_xml(label)
    ));
    out
}

fn node_svg(node: &MapNode, config: &Config, measurer: &dyn MeasureText) -> String {
    let width = node.width.unwrap_or(FALLBACK_WIDTH);
    let height = node.height.unwrap_or(FALLBACK_HEIGHT);
    let x = node.position.x - width / 2.0;
    let y = node.position.y - height / 2.0;
    let style = &node.style;

    let mut out = String::new();
    let stroke = match (&style.border_color, style.border_width) {
        (Some(color), Some(border_width)) if border_width > 0.0 => format!(
            " stroke=\"{}\" stroke-width=\"{}\"",
            escape_xml(color),
            border_width
        ),
        _ => String::new(),
    };
    out.push_str(&format!(
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" fill=\"{}\"{stroke}/>",
        style.border_radius,
        style.border_radius,
        escape_xml(&style.background_color)
    ));

    let lines = wrap_content(&node.content, style.font_size, measurer, &config.layout.sizing);
    let line_height = style.font_size * config.layout.sizing.line_height;
    let total_height = lines.len() as f32 * line_height;
    let start_y = node.position.y - total_height / 2.0 + style.font_size;
    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{start_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">",
        node.position.x,
        escape_xml(&config.layout.font_family),
        style.font_size,
        escape_xml(&style.color)
    ));
    for (idx, line) in lines.iter().enumerate() {
        let dy = if idx == 0 { 0.0 } else { line_height };
        out.push_str(&format!(
            "<tspan x=\"{:.2}\" dy=\"{dy:.2}\">{}</tspan>",
            node.position.x,
            escape_xml(line)
        ));
    }
    out.push_str("</text>");
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = config.layout.font_family.clone();
    opt.default_size = usvg::Size::from_wh(config.render.width, config.render.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::document::{LayoutMode, Position};
    use crate::layout::{HeuristicMeasurer, compute_layout, connector_layouts};
    use crate::theme::default_node_style;

    fn node(id: &str, parent: Option<&str>, content: &str) -> MapNode {
        MapNode {
            id: id.to_string(),
            parent_id: parent.map(str::to_string),
            content: content.to_string(),
            note: None,
            position: Position::default(),
            style: default_node_style(),
            is_expanded: None,
            width: None,
            height: None,
        }
    }

    #[test]
    fn render_svg_basic() {
        let input = vec![
            node("root", None, "Main Goal"),
            node("a", Some("root"), "Research & Prototypes"),
        ];
        let config = Config::default();
        let nodes = compute_layout(&input, LayoutMode::Tree, &config.layout, &HeuristicMeasurer);
        let connectors = connector_layouts(&nodes, &[], LayoutMode::Tree, &config.layout);
        let svg = render_svg(&nodes, &connectors, &Theme::meister(), &config, &HeuristicMeasurer);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains("Main Goal"));
        // XML escaping of node content.
        assert!(svg.contains("Research &amp; Prototypes"));
        // One branch path stroked with the theme line color.
        assert!(svg.contains(&format!("stroke=\"{}\"", Theme::meister().line_color)));
    }

    #[test]
    fn collapsed_subtrees_are_not_drawn() {
        let mut input = vec![
            node("root", None, "Root"),
            node("folded", Some("root"), "Folded"),
            node("hidden", Some("folded"), "InvisibleMarker"),
        ];
        input[1].is_expanded = Some(false);
        let config = Config::default();
        let nodes = compute_layout(&input, LayoutMode::Tree, &config.layout, &HeuristicMeasurer);
        let connectors = connector_layouts(&nodes, &[], LayoutMode::Tree, &config.layout);
        let svg = render_svg(&nodes, &connectors, &Theme::meister(), &config, &HeuristicMeasurer);
        assert!(svg.contains("Folded"));
        assert!(!svg.contains("InvisibleMarker"));
    }

    #[test]
    fn empty_map_still_produces_a_canvas() {
        let config = Config::default();
        let svg = render_svg(&[], &[], &Theme::meister(), &config, &HeuristicMeasurer);
        assert!(svg.contains("<svg"));
        assert!(svg.contains(&Theme::meister().background));
    }

    #[test]
    fn cross_link_labels_get_a_pill() {
        let input = vec![
            node("root", None, "Root"),
            node("a", Some("root"), "Left"),
            node("b", Some("root"), "Right"),
        ];
        let config = Config::default();
        let nodes = compute_layout(&input, LayoutMode::Tree, &config.layout, &HeuristicMeasurer);
        let links = vec![crate::document::CrossLink {
            id: "x".to_string(),
            source_id: "a".to_string(),
            target_id: "b".to_string(),
            label: Some("relates to".to_string()),
        }];
        let connectors = connector_layouts(&nodes, &links, LayoutMode::Tree, &config.layout);
        let svg = render_svg(&nodes, &connectors, &Theme::meister(), &config, &HeuristicMeasurer);
        assert!(svg.contains("relates to"));
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("crosslink-arrow"));
    }
}
