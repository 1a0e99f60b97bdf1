use serde::{Deserialize, Serialize};
use std::path::Path;

/// Node box estimation constants; see `layout/sizing.rs` for how they are
/// combined with measured text widths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizingConfig {
    pub min_width: f32,
    pub max_width: f32,
    pub padding_x: f32,
    pub padding_y: f32,
    pub border_allowance: f32,
    pub line_height: f32,
    /// Box height used when no measurement backend is available.
    pub fallback_height: f32,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            min_width: 120.0,
            max_width: 300.0,
            padding_x: 24.0,
            padding_y: 24.0,
            border_allowance: 4.0,
            line_height: 1.5,
            fallback_height: 40.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeLayoutConfig {
    /// Gap between a parent's right edge and its child's left edge.
    pub horizontal_gap: f32,
    /// Gap between sibling subtree blocks.
    pub vertical_gap: f32,
}

impl Default for TreeLayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_gap: 50.0,
            vertical_gap: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgChartLayoutConfig {
    /// Gap between a parent's bottom edge and its child's top edge.
    pub vertical_gap: f32,
    /// Gap between sibling subtree blocks.
    pub horizontal_gap: f32,
}

impl Default for OrgChartLayoutConfig {
    fn default() -> Self {
        Self {
            vertical_gap: 60.0,
            horizontal_gap: 30.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListLayoutConfig {
    pub vertical_gap: f32,
    /// Horizontal indent added per tree level.
    pub indent: f32,
    /// Inset of the elbow connector's drop point from the parent's left edge.
    pub elbow_inset: f32,
}

impl Default for ListLayoutConfig {
    fn default() -> Self {
        Self {
            vertical_gap: 20.0,
            indent: 40.0,
            elbow_inset: 12.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Control-point distance as a fraction of the horizontal span (tree mode).
    pub tree_tangent_ratio: f32,
    /// Control-point distance as a fraction of the vertical span (org-chart mode).
    pub org_chart_tangent_ratio: f32,
    /// Cross-link handle length as a fraction of the center-to-center distance.
    pub cross_link_handle_ratio: f32,
    /// Box dimensions assumed for nodes that have not been sized yet.
    pub fallback_width: f32,
    pub fallback_height: f32,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            tree_tangent_ratio: 0.4,
            org_chart_tangent_ratio: 0.5,
            cross_link_handle_ratio: 0.4,
            fallback_width: 120.0,
            fallback_height: 40.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub font_family: String,
    pub sizing: SizingConfig,
    pub tree: TreeLayoutConfig,
    pub org_chart: OrgChartLayoutConfig,
    pub list: ListLayoutConfig,
    pub connector: ConnectorConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font_family: "Inter, sans-serif".to_string(),
            sizing: SizingConfig::default(),
            tree: TreeLayoutConfig::default(),
            org_chart: OrgChartLayoutConfig::default(),
            list: ListLayoutConfig::default(),
            connector: ConnectorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    /// Whitespace around the laid-out map's bounding box.
    pub margin: f32,
    pub edge_stroke_width: f32,
    pub cross_link_dasharray: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            margin: 40.0,
            edge_stroke_width: 2.0,
            cross_link_dasharray: "6 4".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    /// Theme used when the document's `themeId` resolves to nothing.
    pub fallback_theme_id: Option<String>,
}

/// User-facing override file; every field optional, unset fields keep
/// their defaults. Parsed as JSON5 so trailing commas and comments are
/// accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    font_family: Option<String>,
    theme: Option<String>,
    width: Option<f32>,
    height: Option<f32>,
    margin: Option<f32>,
    sizing: Option<SizingOverrides>,
    gaps: Option<GapOverrides>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SizingOverrides {
    min_width: Option<f32>,
    max_width: Option<f32>,
    padding_x: Option<f32>,
    padding_y: Option<f32>,
    line_height: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GapOverrides {
    tree_horizontal: Option<f32>,
    tree_vertical: Option<f32>,
    org_chart_vertical: Option<f32>,
    org_chart_horizontal: Option<f32>,
    list_vertical: Option<f32>,
    list_indent: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = json5::from_str(&contents)?;

    if let Some(value) = parsed.font_family {
        config.layout.font_family = value;
    }
    if let Some(value) = parsed.theme {
        config.fallback_theme_id = Some(value);
    }
    if let Some(value) = parsed.width {
        config.render.width = value;
    }
    if let Some(value) = parsed.height {
        config.render.height = value;
    }
    if let Some(value) = parsed.margin {
        config.render.margin = value;
    }

    if let Some(sizing) = parsed.sizing {
        if let Some(value) = sizing.min_width {
            config.layout.sizing.min_width = value;
        }
        if let Some(value) = sizing.max_width {
            config.layout.sizing.max_width = value;
        }
        if let Some(value) = sizing.padding_x {
            config.layout.sizing.padding_x = value;
        }
        if let Some(value) = sizing.padding_y {
            config.layout.sizing.padding_y = value;
        }
        if let Some(value) = sizing.line_height {
            config.layout.sizing.line_height = value;
        }
    }

    if let Some(gaps) = parsed.gaps {
        if let Some(value) = gaps.tree_horizontal {
            config.layout.tree.horizontal_gap = value;
        }
        if let Some(value) = gaps.tree_vertical {
            config.layout.tree.vertical_gap = value;
        }
        if let Some(value) = gaps.org_chart_vertical {
            config.layout.org_chart.vertical_gap = value;
        }
        if let Some(value) = gaps.org_chart_horizontal {
            config.layout.org_chart.horizontal_gap = value;
        }
        if let Some(value) = gaps.list_vertical {
            config.layout.list.vertical_gap = value;
        }
        if let Some(value) = gaps.list_indent {
            config.layout.list.indent = value;
        }
    }

    Ok(config)
}
