#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Drawable geometry of a single connector.
///
/// `Cubic` covers every curved edge (tree, org-chart, cross-link);
/// `Elbow` is the orthogonal down-then-right path used in list mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectorPath {
    Cubic {
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
    },
    Elbow {
        start: Point,
        corner: Point,
        end: Point,
    },
}

impl ConnectorPath {
    /// SVG path-data string for this connector.
    pub fn to_svg(&self) -> String {
        match self {
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => format!(
                "M {} {} C {} {} {} {} {} {}",
                start.x, start.y, control1.x, control1.y, control2.x, control2.y, end.x, end.y
            ),
            Self::Elbow { start, corner, end } => {
                format!("M {} {} V {} H {}", start.x, start.y, corner.y, end.x)
            }
        }
    }

    /// Stable point where a connector label is centered: the analytic
    /// `t = 0.5` point of the cubic, or the midpoint of the elbow's
    /// horizontal run.
    pub fn label_anchor(&self) -> Point {
        match self {
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => cubic_point(*start, *control1, *control2, *end, 0.5),
            Self::Elbow { corner, end, .. } => {
                Point::new(corner.x + (end.x - corner.x) / 2.0, end.y)
            }
        }
    }
}

/// Evaluates a cubic Bezier at `t` via the Bernstein form.
pub fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorKind {
    /// Parent-child edge of the hierarchy.
    Branch,
    /// Free-form link between two arbitrary nodes.
    CrossLink,
}

#[derive(Debug, Clone)]
pub struct Connector {
    pub id: String,
    pub kind: ConnectorKind,
    pub from: String,
    pub to: String,
    pub path: ConnectorPath,
    pub label_anchor: Point,
    pub label: Option<String>,
}

/// Axis-aligned bounding box accumulated over node boxes.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn empty() -> Self {
        Self {
            min_x: f32::MAX,
            min_y: f32::MAX,
            max_x: f32::MIN,
            max_y: f32::MIN,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn include_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x + width);
        self.max_y = self.max_y.max(y + height);
    }

    pub fn width(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    pub fn height(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_point_endpoints_match() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(10.0, 0.0);
        let p2 = Point::new(20.0, 10.0);
        let p3 = Point::new(30.0, 10.0);
        assert_eq!(cubic_point(p0, p1, p2, p3, 0.0), p0);
        assert_eq!(cubic_point(p0, p1, p2, p3, 1.0), p3);
    }

    #[test]
    fn cubic_midpoint_uses_bernstein_weights() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(8.0, 0.0);
        let p2 = Point::new(8.0, 8.0);
        let p3 = Point::new(16.0, 8.0);
        let mid = cubic_point(p0, p1, p2, p3, 0.5);
        // (p0 + 3 p1 + 3 p2 + p3) / 8
        assert!((mid.x - 8.0).abs() < 1e-5);
        assert!((mid.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn elbow_svg_path_is_orthogonal() {
        let path = ConnectorPath::Elbow {
            start: Point::new(10.0, 20.0),
            corner: Point::new(10.0, 50.0),
            end: Point::new(60.0, 50.0),
        };
        assert_eq!(path.to_svg(), "M 10 20 V 50 H 60");
        let anchor = path.label_anchor();
        assert_eq!(anchor, Point::new(35.0, 50.0));
    }

    #[test]
    fn bounds_accumulate_rects() {
        let mut bounds = Bounds::empty();
        assert!(bounds.is_empty());
        bounds.include_rect(0.0, 0.0, 10.0, 10.0);
        bounds.include_rect(-5.0, 20.0, 10.0, 10.0);
        assert_eq!(bounds.min_x, -5.0);
        assert_eq!(bounds.max_y, 30.0);
        assert_eq!(bounds.width(), 15.0);
        assert_eq!(bounds.height(), 30.0);
    }
}
