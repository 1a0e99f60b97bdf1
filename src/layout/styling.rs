use std::collections::VecDeque;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{MapNode, NodeStyle};
use crate::theme::{Theme, ThemeKind, default_node_style};

use super::index::TreeIndex;

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{6})$").expect("hex color pattern")
});

const DARK_TEXT: &str = "#1f2937";
const LIGHT_TEXT: &str = "#ffffff";
/// YIQ threshold above which a background counts as bright.
const LUMINANCE_THRESHOLD: f32 = 128.0;

fn parse_hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let captures = HEX_COLOR_RE.captures(color.trim())?;
    let hex = captures.get(1)?.as_str();
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Text color that stays readable over `background`: YIQ luminance
/// `(299r + 587g + 114b) / 1000`, bright backgrounds get the dark
/// default, everything else (including unparseable colors) gets white.
pub fn legible_text_color(background: &str) -> &'static str {
    let Some((r, g, b)) = parse_hex_rgb(background) else {
        return LIGHT_TEXT;
    };
    let yiq = (299.0 * r as f32 + 587.0 * g as f32 + 114.0 * b as f32) / 1000.0;
    if yiq >= LUMINANCE_THRESHOLD {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

/// Restyles the whole tree from a theme: the root takes `rootStyle` over
/// the defaults, each first-level branch takes `palette[i mod len]`, and
/// that color is pushed breadth-first to every node under the branch.
/// Outline themes carry the color on the border, fill themes on the
/// background with a computed legible text color.
pub(super) fn apply_theme(nodes: &[MapNode], theme: &Theme) -> Vec<MapNode> {
    let mut out = nodes.to_vec();
    let index = TreeIndex::build(&out);
    let Some(root_id) = index.root().map(str::to_string) else {
        return out;
    };
    let defaults = default_node_style();
    if let Some(slot) = index.slot(&root_id) {
        out[slot].style = theme.root_style.apply_to(&defaults);
    }

    for (branch_idx, branch_id) in index.children_of(&root_id).to_vec().iter().enumerate() {
        let color = if theme.palette.is_empty() {
            None
        } else {
            Some(theme.palette[branch_idx % theme.palette.len()].as_str())
        };
        let style = branch_style(theme, &defaults, color);

        let mut queue = VecDeque::from([branch_id.clone()]);
        while let Some(id) = queue.pop_front() {
            if let Some(slot) = index.slot(&id) {
                out[slot].style = style.clone();
            }
            for child_id in index.children_of(&id) {
                queue.push_back(child_id.clone());
            }
        }
    }
    out
}

fn branch_style(theme: &Theme, defaults: &NodeStyle, color: Option<&str>) -> NodeStyle {
    let mut style = theme.node_style.apply_to(defaults);
    let Some(color) = color else {
        return style;
    };
    match theme.kind {
        ThemeKind::Outline => {
            style.border_color = Some(color.to_string());
        }
        ThemeKind::Fill => {
            style.background_color = color.to_string();
            style.color = legible_text_color(color).to_string();
        }
    }
    style
}
