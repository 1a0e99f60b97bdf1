use serde::{Deserialize, Serialize};

use crate::document::NodeStyle;

/// How a theme carries its branch color: `fill` paints node backgrounds,
/// `outline` paints node borders and leaves backgrounds alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    Fill,
    Outline,
}

/// Partial node style; unset fields fall through to the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f32>,
}

impl StyleOverrides {
    pub fn apply_to(&self, base: &NodeStyle) -> NodeStyle {
        NodeStyle {
            background_color: self
                .background_color
                .clone()
                .unwrap_or_else(|| base.background_color.clone()),
            color: self.color.clone().unwrap_or_else(|| base.color.clone()),
            font_size: self.font_size.unwrap_or(base.font_size),
            border_radius: self.border_radius.unwrap_or(base.border_radius),
            border_color: self.border_color.clone().or_else(|| base.border_color.clone()),
            border_width: self.border_width.or(base.border_width),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ThemeKind,
    pub background: String,
    pub line_color: String,
    pub root_style: StyleOverrides,
    pub node_style: StyleOverrides,
    pub palette: Vec<String>,
}

pub fn default_node_style() -> NodeStyle {
    NodeStyle {
        background_color: "#ffffff".to_string(),
        color: "#1f2937".to_string(),
        font_size: 14.0,
        border_radius: 8.0,
        border_color: Some("#e5e7eb".to_string()),
        border_width: Some(2.0),
    }
}

pub fn root_node_style() -> NodeStyle {
    NodeStyle {
        background_color: "#4A90E2".to_string(),
        color: "#ffffff".to_string(),
        font_size: 18.0,
        border_radius: 12.0,
        border_color: Some("#3b82f6".to_string()),
        border_width: Some(0.0),
    }
}

fn overrides(
    background_color: &str,
    color: &str,
    border_radius: f32,
    border_width: f32,
    border_color: Option<&str>,
) -> StyleOverrides {
    StyleOverrides {
        background_color: Some(background_color.to_string()),
        color: Some(color.to_string()),
        font_size: None,
        border_radius: Some(border_radius),
        border_color: border_color.map(|value| value.to_string()),
        border_width: Some(border_width),
    }
}

fn palette(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|value| value.to_string()).collect()
}

impl Theme {
    pub fn meister() -> Self {
        Self {
            id: "meister".to_string(),
            name: "Meister".to_string(),
            kind: ThemeKind::Outline,
            background: "#f8fafc".to_string(),
            line_color: "#cbd5e1".to_string(),
            root_style: overrides("#4A90E2", "#ffffff", 12.0, 0.0, None),
            node_style: overrides("#ffffff", "#334155", 8.0, 2.0, Some("#e2e8f0")),
            palette: palette(&[
                "#4A90E2", "#7ED321", "#F5A623", "#D0021B", "#9013FE", "#50E3C2",
            ]),
        }
    }

    pub fn prism() -> Self {
        Self {
            id: "prism".to_string(),
            name: "Prism".to_string(),
            kind: ThemeKind::Outline,
            background: "#111827".to_string(),
            line_color: "#374151".to_string(),
            root_style: overrides("#F472B6", "#ffffff", 12.0, 0.0, None),
            node_style: overrides("#1F2937", "#F3F4F6", 8.0, 2.0, Some("#374151")),
            palette: palette(&[
                "#F472B6", "#A78BFA", "#34D399", "#60A5FA", "#FBBF24", "#F87171",
            ]),
        }
    }

    pub fn color_burst() -> Self {
        Self {
            id: "color-burst".to_string(),
            name: "Color Burst".to_string(),
            kind: ThemeKind::Fill,
            background: "#ffffff".to_string(),
            line_color: "#e5e7eb".to_string(),
            root_style: overrides("#111827", "#ffffff", 50.0, 0.0, None),
            node_style: overrides("#f3f4f6", "#ffffff", 20.0, 0.0, None),
            palette: palette(&[
                "#ef4444", "#f59e0b", "#10b981", "#3b82f6", "#8b5cf6", "#ec4899",
            ]),
        }
    }

    pub fn midnight() -> Self {
        Self {
            id: "midnight".to_string(),
            name: "Midnight".to_string(),
            kind: ThemeKind::Fill,
            background: "#0f172a".to_string(),
            line_color: "#334155".to_string(),
            root_style: overrides("#38bdf8", "#0f172a", 8.0, 0.0, None),
            node_style: overrides("#1e293b", "#e2e8f0", 6.0, 1.0, Some("#334155")),
            palette: palette(&["#38bdf8", "#818cf8", "#c084fc", "#f472b6", "#fb7185"]),
        }
    }

    pub fn forest() -> Self {
        Self {
            id: "forest".to_string(),
            name: "Forest".to_string(),
            kind: ThemeKind::Fill,
            background: "#14251F".to_string(),
            line_color: "#4b5f54".to_string(),
            root_style: overrides("#8CAE68", "#0F2119", 20.0, 0.0, None),
            node_style: overrides("#3A5A40", "#DAD7CD", 10.0, 0.0, None),
            palette: palette(&["#8CAE68", "#A3B18A", "#588157", "#3A5A40", "#344E41"]),
        }
    }

    pub fn monochrome() -> Self {
        Self {
            id: "monochrome".to_string(),
            name: "Monochrome".to_string(),
            kind: ThemeKind::Outline,
            background: "#ffffff".to_string(),
            line_color: "#000000".to_string(),
            root_style: overrides("#000000", "#ffffff", 0.0, 0.0, None),
            node_style: overrides("#ffffff", "#000000", 0.0, 2.0, Some("#000000")),
            palette: palette(&["#000000", "#333333", "#666666"]),
        }
    }

    pub fn corporate() -> Self {
        Self {
            id: "corporate".to_string(),
            name: "Corporate".to_string(),
            kind: ThemeKind::Outline,
            background: "#F3F4F6".to_string(),
            line_color: "#9CA3AF".to_string(),
            root_style: overrides("#1F2937", "#F9FAFB", 4.0, 0.0, None),
            node_style: overrides("#FFFFFF", "#374151", 4.0, 1.0, Some("#D1D5DB")),
            palette: palette(&["#3B82F6", "#10B981", "#F59E0B", "#6366F1"]),
        }
    }

    pub fn builtin(id: &str) -> Option<Self> {
        match id {
            "meister" => Some(Self::meister()),
            "prism" => Some(Self::prism()),
            "color-burst" => Some(Self::color_burst()),
            "midnight" => Some(Self::midnight()),
            "forest" => Some(Self::forest()),
            "monochrome" => Some(Self::monochrome()),
            "corporate" => Some(Self::corporate()),
            _ => None,
        }
    }

    pub fn all_builtin() -> Vec<Self> {
        vec![
            Self::meister(),
            Self::prism(),
            Self::color_burst(),
            Self::midnight(),
            Self::forest(),
            Self::monochrome(),
            Self::corporate(),
        ]
    }
}
