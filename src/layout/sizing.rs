use crate::config::SizingConfig;
use crate::text_metrics;

/// Text width measurement capability injected into the engine.
///
/// Implementations must be deterministic for a given (text, font size)
/// pair; `None` signals that no backend is available, in which case the
/// sizer degrades to a fixed minimum box instead of failing the pass.
pub trait MeasureText {
    fn text_width(&self, text: &str, font_size: f32) -> Option<f32>;
}

/// System-font-backed measurer over the shared fontdb database.
pub struct SystemFontMeasurer {
    font_family: String,
}

impl SystemFontMeasurer {
    pub fn new(font_family: &str) -> Self {
        Self {
            font_family: font_family.to_string(),
        }
    }
}

impl MeasureText for SystemFontMeasurer {
    fn text_width(&self, text: &str, font_size: f32) -> Option<f32> {
        text_metrics::measure_text_width(text, font_size, &self.font_family)
    }
}

/// Deterministic approximation from per-character width classes; used as
/// the no-font fallback and as the stub measurer in tests.
pub struct HeuristicMeasurer;

impl MeasureText for HeuristicMeasurer {
    fn text_width(&self, text: &str, font_size: f32) -> Option<f32> {
        Some(heuristic_width(text, font_size))
    }
}

fn heuristic_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_ratio).sum::<f32>() * font_size
}

/// Approximate advance ratios for a humanist sans at 1em.
fn char_width_ratio(ch: char) -> f32 {
    match ch {
        'i' | 'j' | 'l' | 'I' | '!' | '|' | '\'' | '.' | ',' | ':' | ';' => 0.28,
        ' ' | 'f' | 't' | 'r' | '(' | ')' | '[' | ']' => 0.33,
        'm' | 'M' | 'W' | '@' | '%' | '&' => 0.92,
        'w' => 0.78,
        'A'..='Z' => 0.68,
        '0'..='9' => 0.60,
        _ => 0.55,
    }
}

/// Estimates the on-screen box for a node label.
///
/// Width is the widest estimated line plus padding and a border
/// allowance, clamped to `[min_width, max_width]`; height is the
/// estimated wrapped line count at `line_height` em per line. A single
/// word wider than the usable width is treated as force-wrapped by
/// ceiling division.
pub fn measure_node(
    content: &str,
    font_size: f32,
    measurer: &dyn MeasureText,
    sizing: &SizingConfig,
) -> (f32, f32) {
    match try_measure_node(content, font_size, measurer, sizing) {
        Some(box_size) => box_size,
        None => (
            sizing.min_width,
            sizing.fallback_height + sizing.padding_y,
        ),
    }
}

fn try_measure_node(
    content: &str,
    font_size: f32,
    measurer: &dyn MeasureText,
    sizing: &SizingConfig,
) -> Option<(f32, f32)> {
    let usable_width = sizing.max_width - sizing.padding_x;
    let words: Vec<&str> = content.split_whitespace().collect();

    let mut line = String::new();
    let mut max_line_width = 0.0f32;
    let mut line_count = 1usize;

    for (idx, word) in words.iter().enumerate() {
        let candidate = format!("{line}{word} ");
        let candidate_width = measurer.text_width(&candidate, font_size)?;
        if candidate_width > usable_width && idx > 0 {
            line = format!("{word} ");
            line_count += 1;
        } else {
            line = candidate;
            max_line_width = max_line_width.max(candidate_width);
        }
    }

    if words.len() == 1 {
        let word_width = measurer.text_width(content, font_size)?;
        if word_width > usable_width {
            let forced_lines = (word_width / usable_width).ceil() as usize;
            line_count = line_count.max(forced_lines);
            max_line_width = usable_width;
        } else {
            max_line_width = max_line_width.max(word_width);
        }
    }

    let padded = max_line_width + sizing.padding_x + sizing.border_allowance;
    let width = padded.clamp(sizing.min_width, sizing.max_width);
    let height = line_count as f32 * font_size * sizing.line_height
        + sizing.padding_y
        + sizing.border_allowance;
    Some((width, height))
}

/// Greedy word-wrap of a label into render lines against the usable
/// width; mirrors the estimate in `measure_node` so rendered text fits
/// the computed box.
pub fn wrap_content(
    content: &str,
    font_size: f32,
    measurer: &dyn MeasureText,
    sizing: &SizingConfig,
) -> Vec<String> {
    let usable_width = sizing.max_width - sizing.padding_x;
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in content.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        let width = measurer
            .text_width(&candidate, font_size)
            .unwrap_or_else(|| heuristic_width(&candidate, font_size));
        if width > usable_width && !current.is_empty() {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoFontMeasurer;

    impl MeasureText for NoFontMeasurer {
        fn text_width(&self, _text: &str, _font_size: f32) -> Option<f32> {
            None
        }
    }

    /// Fixed per-character width, independent of the character.
    struct FixedMeasurer(f32);

    impl MeasureText for FixedMeasurer {
        fn text_width(&self, text: &str, _font_size: f32) -> Option<f32> {
            Some(text.chars().count() as f32 * self.0)
        }
    }

    fn sizing() -> SizingConfig {
        SizingConfig::default()
    }

    #[test]
    fn short_text_clamps_to_min_width() {
        let (width, height) = measure_node("Hi", 14.0, &FixedMeasurer(8.0), &sizing());
        assert_eq!(width, 120.0);
        // One line: 14 * 1.5 + 24 + 4.
        assert!((height - 49.0).abs() < 1e-4);
    }

    #[test]
    fn width_never_exceeds_max() {
        let text = "a ".repeat(200);
        let (width, _) = measure_node(&text, 14.0, &FixedMeasurer(9.0), &sizing());
        assert!(width <= 300.0);
    }

    #[test]
    fn wrapping_grows_height_only() {
        let measurer = FixedMeasurer(10.0);
        let (_, one_line) = measure_node("short", 14.0, &measurer, &sizing());
        // 60 chars at 10px each must wrap against a 276px usable width.
        let long = "word ".repeat(12);
        let (width, wrapped) = measure_node(long.trim(), 14.0, &measurer, &sizing());
        assert!(wrapped > one_line);
        assert!(width <= 300.0);
    }

    #[test]
    fn single_long_word_is_force_wrapped() {
        let measurer = FixedMeasurer(10.0);
        let word = "x".repeat(60); // 600px against 276px usable => 3 lines
        let (width, height) = measure_node(&word, 14.0, &measurer, &sizing());
        assert_eq!(width, 300.0);
        let expected = 3.0 * 14.0 * 1.5 + 24.0 + 4.0;
        assert!((height - expected).abs() < 1e-4);
    }

    #[test]
    fn missing_backend_falls_back_to_minimum_box() {
        let (width, height) = measure_node("anything at all", 14.0, &NoFontMeasurer, &sizing());
        assert_eq!((width, height), (120.0, 64.0));
    }

    #[test]
    fn empty_content_is_a_single_line_minimum_box() {
        let (width, height) = measure_node("", 14.0, &FixedMeasurer(8.0), &sizing());
        assert_eq!(width, 120.0);
        assert!((height - 49.0).abs() < 1e-4);
    }

    #[test]
    fn heuristic_measurer_scales_linearly_with_font_size() {
        let narrow = HeuristicMeasurer.text_width("Hello", 14.0).unwrap();
        let wide = HeuristicMeasurer.text_width("Hello", 28.0).unwrap();
        assert!((wide - narrow * 2.0).abs() < 1e-4);
    }

    #[test]
    fn wrap_content_splits_on_usable_width() {
        let lines = wrap_content(
            "alpha beta gamma delta epsilon zeta",
            14.0,
            &FixedMeasurer(12.0),
            &sizing(),
        );
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(!line.is_empty());
        }
    }

    #[test]
    fn wrap_content_keeps_short_text_on_one_line() {
        let lines = wrap_content("tiny", 14.0, &FixedMeasurer(8.0), &sizing());
        assert_eq!(lines, vec!["tiny".to_string()]);
    }
}
