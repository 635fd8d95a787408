use crate::transform::Transform;
use kurbo::{CubicBez, Point};
use std::fmt;

/// One path-grammar instruction as produced by the path tokenizer.
pub type PathCommand = svgtypes::PathSegment;

/// A connected run of cubic Bezier segments.
///
/// Consecutive segments share an endpoint: `segments[i].p3 == segments[i + 1].p0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    pub segments: Vec<CubicBez>,
}

impl Subpath {
    pub fn new(segments: Vec<CubicBez>) -> Self {
        Self { segments }
    }

    pub fn start(&self) -> Option<Point> {
        self.segments.first().map(|s| s.p0)
    }

    pub fn end(&self) -> Option<Point> {
        self.segments.last().map(|s| s.p3)
    }

    /// Start point of the first segment followed by the end of every segment.
    pub fn anchors(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.segments.len() + 1);
        if let Some(start) = self.start() {
            points.push(start);
        }
        points.extend(self.segments.iter().map(|s| s.p3));
        points
    }

    pub fn transformed(&self, ts: &Transform) -> Subpath {
        Subpath {
            segments: self
                .segments
                .iter()
                .map(|s| CubicBez::new(ts.apply(s.p0), ts.apply(s.p1), ts.apply(s.p2), ts.apply(s.p3)))
                .collect(),
        }
    }
}

/// Canonical curve representation every shape primitive is lowered to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CubicPolycurve {
    pub subpaths: Vec<Subpath>,
}

impl CubicPolycurve {
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.subpaths.iter().map(|sp| sp.segments.len()).sum()
    }

    /// Affine maps carry Bezier control points to the control points of the
    /// mapped curve, so transforming the polycurve is exact.
    pub fn transformed(&self, ts: &Transform) -> CubicPolycurve {
        CubicPolycurve {
            subpaths: self.subpaths.iter().map(|sp| sp.transformed(ts)).collect(),
        }
    }
}

/// A polyline is a list of points.
pub type Polyline = Vec<Point>;

/// Line-segment approximation of a [`CubicPolycurve`], one polyline per subpath.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedPolyline {
    pub subpaths: Vec<Polyline>,
}

impl FlattenedPolyline {
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.subpaths.iter().map(Vec::len).sum()
    }
}

/// Tool-pass classification derived from the stroke color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CutStyle {
    #[default]
    Default,
    /// Pure red stroke
    Red,
    /// Pure blue stroke
    Blue,
}

impl CutStyle {
    /// Integer code understood by the code generator (1, 2 or 3).
    pub fn code(self) -> u8 {
        match self {
            CutStyle::Default => 1,
            CutStyle::Red => 2,
            CutStyle::Blue => 3,
        }
    }
}

/// Drawable primitive kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Path,
    Rect,
    Line,
    Polyline,
    Polygon,
    Circle,
    Ellipse,
}

impl ShapeKind {
    pub fn tag_name(self) -> &'static str {
        match self {
            ShapeKind::Path => "path",
            ShapeKind::Rect => "rect",
            ShapeKind::Line => "line",
            ShapeKind::Polyline => "polyline",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
        }
    }
}

/// Element name with its resolved namespace URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: Option<String>,
    pub local: String,
}

impl QualifiedName {
    pub fn new(namespace: Option<&str>, local: &str) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            local: local.to_string(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// Output unit of a lowering pass
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    /// Flattened geometry with its tool-pass classification. Degenerate
    /// shapes carry an empty polyline.
    Drawable {
        kind: ShapeKind,
        cut_style: CutStyle,
        polyline: FlattenedPolyline,
    },
    /// Registered tag that is deliberately not drawn
    Ignored { tag: QualifiedName },
    /// Traversal entered a named layer
    LayerMarker { name: String },
    /// Text and unregistered elements; a warning was reported on creation
    Unsupported { tag: QualifiedName },
}

impl Entity {
    pub fn polyline(&self) -> Option<&FlattenedPolyline> {
        match self {
            Entity::Drawable { polyline, .. } => Some(polyline),
            _ => None,
        }
    }

    pub fn cut_style(&self) -> Option<CutStyle> {
        match self {
            Entity::Drawable { cut_style, .. } => Some(*cut_style),
            _ => None,
        }
    }

    pub fn layer_name(&self) -> Option<&str> {
        match self {
            Entity::LayerMarker { name } => Some(name),
            _ => None,
        }
    }

    pub fn is_drawable(&self) -> bool {
        matches!(self, Entity::Drawable { .. })
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Drawable {
                kind,
                cut_style,
                polyline,
            } => write!(
                f,
                "{} (cut style {}, {} subpaths, {} points)",
                kind.tag_name(),
                cut_style.code(),
                polyline.subpaths.len(),
                polyline.point_count()
            ),
            Entity::Ignored { tag } => write!(f, "Ignored '{}' tag", tag),
            Entity::LayerMarker { name } => write!(f, "Layer '{}'", name),
            Entity::Unsupported { tag } => write!(f, "Unsupported '{}' tag", tag),
        }
    }
}
