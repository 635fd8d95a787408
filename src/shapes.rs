//! Shape primitive normalization
//!
//! Every primitive is rewritten as path commands and lowered through the same
//! path code, so a rectangle, a circle and a hand-written `<path>` end up in
//! the same cubic representation before flattening.

use crate::dom::Node;
use crate::error::LowerError;
use crate::flatten::flatten;
use crate::path::{parse_path_data, polycurve_from_commands};
use crate::style::classify;
use crate::transform::Transform;
use crate::types::{CubicPolycurve, Entity, PathCommand, ShapeKind};
use log::trace;
use svgtypes::{Length, LengthUnit, PointsParser};

fn malformed(tag: &str, attribute: &'static str, reason: String) -> LowerError {
    LowerError::MalformedGeometry {
        tag: tag.to_string(),
        attribute,
        reason,
    }
}

/// Read a numeric attribute. Plain numbers and `px` lengths are accepted.
fn number_attr(node: Node<'_>, tag: &str, name: &'static str) -> Result<Option<f64>, LowerError> {
    let Some(raw) = node.attribute(name) else {
        return Ok(None);
    };

    let length: Length = raw
        .trim()
        .parse()
        .map_err(|_| malformed(tag, name, format!("is not a number: \"{}\"", raw)))?;

    match length.unit {
        LengthUnit::None | LengthUnit::Px if length.number.is_finite() => Ok(Some(length.number)),
        LengthUnit::None | LengthUnit::Px => {
            Err(malformed(tag, name, format!("is not finite: \"{}\"", raw)))
        }
        _ => Err(malformed(tag, name, format!("has an unsupported unit: \"{}\"", raw))),
    }
}

fn required(node: Node<'_>, tag: &str, name: &'static str) -> Result<f64, LowerError> {
    number_attr(node, tag, name)?.ok_or_else(|| malformed(tag, name, "is missing".to_string()))
}

/// Numeric attribute defaulting to 0 when absent
pub(crate) fn optional(node: Node<'_>, tag: &str, name: &'static str) -> Result<f64, LowerError> {
    Ok(number_attr(node, tag, name)?.unwrap_or(0.0))
}

fn commands_to_polycurve(commands: Vec<PathCommand>) -> CubicPolycurve {
    // Synthesized commands are always well formed
    polycurve_from_commands(commands.into_iter().map(Ok)).unwrap_or_default()
}

fn path_polycurve(node: Node<'_>) -> Result<CubicPolycurve, LowerError> {
    let d = node.attribute("d").unwrap_or("");
    parse_path_data(d).map_err(|e| LowerError::InvalidPathData {
        tag: ShapeKind::Path.tag_name().to_string(),
        reason: e.to_string(),
    })
}

/// `M x,y l w,0 l 0,h l -w,0 Z`
pub fn rect_commands(x: f64, y: f64, w: f64, h: f64) -> Vec<PathCommand> {
    vec![
        PathCommand::MoveTo { abs: true, x, y },
        PathCommand::LineTo {
            abs: false,
            x: w,
            y: 0.0,
        },
        PathCommand::LineTo {
            abs: false,
            x: 0.0,
            y: h,
        },
        PathCommand::LineTo {
            abs: false,
            x: -w,
            y: 0.0,
        },
        PathCommand::ClosePath { abs: true },
    ]
}

/// `M x1,y1 L x2,y2`
pub fn line_commands(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<PathCommand> {
    vec![
        PathCommand::MoveTo {
            abs: true,
            x: x1,
            y: y1,
        },
        PathCommand::LineTo {
            abs: true,
            x: x2,
            y: y2,
        },
    ]
}

/// Move to the first point, line to every other one, closing polygons.
pub fn points_commands(points: &str, close: bool) -> Vec<PathCommand> {
    let mut commands: Vec<PathCommand> = PointsParser::from(points)
        .enumerate()
        .map(|(i, (x, y))| {
            if i == 0 {
                PathCommand::MoveTo { abs: true, x, y }
            } else {
                PathCommand::LineTo { abs: true, x, y }
            }
        })
        .collect();

    if close && commands.len() > 1 {
        commands.push(PathCommand::ClosePath { abs: true });
    }
    commands
}

/// Two half-turn arcs starting and ending at the leftmost point.
/// A zero radius yields no commands.
pub fn ellipse_commands(cx: f64, cy: f64, rx: f64, ry: f64) -> Vec<PathCommand> {
    if rx == 0.0 || ry == 0.0 {
        return Vec::new();
    }

    let x1 = cx - rx;
    let x2 = cx + rx;
    let half_turn = |x: f64| PathCommand::EllipticalArc {
        abs: true,
        rx,
        ry,
        x_axis_rotation: 0.0,
        large_arc: true,
        sweep: false,
        x,
        y: cy,
    };

    vec![
        PathCommand::MoveTo {
            abs: true,
            x: x1,
            y: cy,
        },
        half_turn(x2),
        half_turn(x1),
    ]
}

/// Express a primitive in its own user space as a cubic polycurve.
///
/// Degenerate shapes (zero radius, no points, empty path data) give an
/// empty polycurve. Missing required or unparsable attributes are errors.
pub fn shape_polycurve(kind: ShapeKind, node: Node<'_>) -> Result<CubicPolycurve, LowerError> {
    let tag = kind.tag_name();
    let curve = match kind {
        ShapeKind::Path => path_polycurve(node)?,
        ShapeKind::Rect => {
            let x = optional(node, tag, "x")?;
            let y = optional(node, tag, "y")?;
            let w = required(node, tag, "width")?;
            let h = required(node, tag, "height")?;
            commands_to_polycurve(rect_commands(x, y, w, h))
        }
        ShapeKind::Line => {
            let x1 = optional(node, tag, "x1")?;
            let y1 = optional(node, tag, "y1")?;
            let x2 = optional(node, tag, "x2")?;
            let y2 = optional(node, tag, "y2")?;
            commands_to_polycurve(line_commands(x1, y1, x2, y2))
        }
        ShapeKind::Polyline | ShapeKind::Polygon => {
            let points = node.attribute("points").unwrap_or("");
            commands_to_polycurve(points_commands(points, kind == ShapeKind::Polygon))
        }
        ShapeKind::Circle => {
            let r = optional(node, tag, "r")?;
            let cx = optional(node, tag, "cx")?;
            let cy = optional(node, tag, "cy")?;
            commands_to_polycurve(ellipse_commands(cx, cy, r, r))
        }
        ShapeKind::Ellipse => {
            let rx = optional(node, tag, "rx")?;
            let ry = optional(node, tag, "ry")?;
            let cx = optional(node, tag, "cx")?;
            let cy = optional(node, tag, "cy")?;
            commands_to_polycurve(ellipse_commands(cx, cy, rx, ry))
        }
    };

    trace!(
        "shape_polycurve: <{}> -> {} subpaths, {} segments",
        kind.tag_name(),
        curve.subpaths.len(),
        curve.segment_count()
    );
    Ok(curve)
}

/// Build the drawable entity for a shape node.
///
/// The cut style is taken from the node's stroke before the geometry is
/// mapped through `ts` and flattened with `tolerance`.
pub fn lower_shape(
    kind: ShapeKind,
    node: Node<'_>,
    ts: &Transform,
    tolerance: f64,
) -> Result<Entity, LowerError> {
    let cut_style = classify(node.attribute("style"), node.attribute("stroke"));
    let curve = shape_polycurve(kind, node)?;
    let polyline = flatten(&curve.transformed(ts), tolerance);

    Ok(Entity::Drawable {
        kind,
        cut_style,
        polyline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::types::CutStyle;
    use kurbo::Point;

    fn with_shape<T>(markup: &str, f: impl FnOnce(Node<'_>) -> T) -> T {
        let text = format!("<svg>{}</svg>", markup);
        let doc = Document::parse(&text).unwrap();
        let node = doc.root().children().next().unwrap();
        f(node)
    }

    fn points(entity: &Entity) -> Vec<Vec<(f64, f64)>> {
        entity
            .polyline()
            .unwrap()
            .subpaths
            .iter()
            .map(|sp| sp.iter().map(|p| (p.x, p.y)).collect())
            .collect()
    }

    #[test]
    fn test_rect_outline() {
        let entity = with_shape(r#"<rect x="0" y="0" width="10" height="5"/>"#, |n| {
            lower_shape(ShapeKind::Rect, n, &Transform::identity(), 0.2).unwrap()
        });
        assert_eq!(
            points(&entity),
            vec![vec![(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0), (0.0, 0.0)]]
        );
        assert_eq!(entity.cut_style(), Some(CutStyle::Default));
    }

    #[test]
    fn test_rect_position_defaults_to_origin() {
        let entity = with_shape(r#"<rect width="2" height="3"/>"#, |n| {
            lower_shape(ShapeKind::Rect, n, &Transform::identity(), 0.2).unwrap()
        });
        assert_eq!(points(&entity)[0][2], (2.0, 3.0));
    }

    #[test]
    fn test_rect_without_width_is_malformed() {
        let err = with_shape(r#"<rect x="0" y="0" height="5"/>"#, |n| {
            lower_shape(ShapeKind::Rect, n, &Transform::identity(), 0.2).unwrap_err()
        });
        assert_eq!(
            err,
            LowerError::MalformedGeometry {
                tag: "rect".to_string(),
                attribute: "width",
                reason: "is missing".to_string(),
            }
        );
    }

    #[test]
    fn test_unparsable_number_is_malformed() {
        let err = with_shape(r#"<rect width="wide" height="5"/>"#, |n| {
            shape_polycurve(ShapeKind::Rect, n).unwrap_err()
        });
        assert!(matches!(
            err,
            LowerError::MalformedGeometry {
                attribute: "width",
                ..
            }
        ));

        let err = with_shape(r#"<circle r="3mm"/>"#, |n| {
            shape_polycurve(ShapeKind::Circle, n).unwrap_err()
        });
        assert!(err.to_string().contains("unsupported unit"));
    }

    #[test]
    fn test_px_lengths_accepted() {
        let curve = with_shape(r#"<rect width="10px" height="5"/>"#, |n| {
            shape_polycurve(ShapeKind::Rect, n).unwrap()
        });
        assert_eq!(curve.subpaths[0].end(), Some(Point::new(0.0, 0.0)));
        assert_eq!(curve.subpaths[0].segments[0].p3, Point::new(10.0, 0.0));
    }

    #[test]
    fn test_line() {
        let entity = with_shape(r#"<line x1="1" y1="2" x2="7" y2="9" style="stroke:#0000ff"/>"#, |n| {
            lower_shape(ShapeKind::Line, n, &Transform::identity(), 0.2).unwrap()
        });
        assert_eq!(points(&entity), vec![vec![(1.0, 2.0), (7.0, 9.0)]]);
        assert_eq!(entity.cut_style(), Some(CutStyle::Blue));
    }

    #[test]
    fn test_polyline_and_polygon() {
        let open = with_shape(r#"<polyline points="0,0 10,0 10,10"/>"#, |n| {
            lower_shape(ShapeKind::Polyline, n, &Transform::identity(), 0.2).unwrap()
        });
        assert_eq!(points(&open), vec![vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]]);

        let closed = with_shape(r#"<polygon points="0 0 10 0 10 10"/>"#, |n| {
            lower_shape(ShapeKind::Polygon, n, &Transform::identity(), 0.2).unwrap()
        });
        assert_eq!(
            points(&closed),
            vec![vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]]
        );
    }

    #[test]
    fn test_empty_points_are_degenerate() {
        for markup in [r#"<polyline points=""/>"#, r#"<polyline/>"#, r#"<polygon points="  "/>"#] {
            let entity = with_shape(markup, |n| {
                let kind = if markup.contains("polygon") {
                    ShapeKind::Polygon
                } else {
                    ShapeKind::Polyline
                };
                lower_shape(kind, n, &Transform::identity(), 0.2).unwrap()
            });
            assert!(entity.polyline().unwrap().is_empty(), "{}", markup);
        }
    }

    #[test]
    fn test_circle_is_closed_loop_on_radius() {
        let entity = with_shape(r#"<circle cx="10" cy="10" r="5"/>"#, |n| {
            lower_shape(ShapeKind::Circle, n, &Transform::identity(), 0.05).unwrap()
        });
        let flat = entity.polyline().unwrap();
        assert_eq!(flat.subpaths.len(), 1);
        let sp = &flat.subpaths[0];
        assert!(sp.len() > 8);
        assert_eq!(sp.first(), Some(&Point::new(5.0, 10.0)));
        assert_eq!(sp.last(), Some(&Point::new(5.0, 10.0)));
        for p in sp {
            assert!((p.distance(Point::new(10.0, 10.0)) - 5.0).abs() < 1e-2);
        }
        // Second anchor run passes through the rightmost point
        assert!(sp.contains(&Point::new(15.0, 10.0)));
    }

    #[test]
    fn test_zero_radius_is_degenerate() {
        for (kind, markup) in [
            (ShapeKind::Ellipse, r#"<ellipse cx="5" cy="5" rx="0" ry="4"/>"#),
            (ShapeKind::Ellipse, r#"<ellipse rx="3"/>"#),
            (ShapeKind::Circle, r#"<circle cx="5" cy="5"/>"#),
        ] {
            let entity = with_shape(markup, |n| {
                lower_shape(kind, n, &Transform::identity(), 0.2).unwrap()
            });
            assert!(entity.polyline().unwrap().is_empty(), "{}", markup);
        }
    }

    #[test]
    fn test_path_classification_and_transform() {
        let entity = with_shape(r#"<path d="M 0 0 L 10 0" style="fill:none;stroke:#ff0000"/>"#, |n| {
            lower_shape(ShapeKind::Path, n, &Transform::translate(1.0, 1.0), 0.2).unwrap()
        });
        assert_eq!(entity.cut_style(), Some(CutStyle::Red));
        assert_eq!(points(&entity), vec![vec![(1.0, 1.0), (11.0, 1.0)]]);
    }

    #[test]
    fn test_path_without_data_is_degenerate() {
        let entity = with_shape(r#"<path style="stroke:#ff0000"/>"#, |n| {
            lower_shape(ShapeKind::Path, n, &Transform::identity(), 0.2).unwrap()
        });
        assert!(entity.polyline().unwrap().is_empty());
        assert_eq!(entity.cut_style(), Some(CutStyle::Red));
    }

    #[test]
    fn test_bad_path_data() {
        let err = with_shape(r#"<path d="M 0 0 L oops"/>"#, |n| {
            shape_polycurve(ShapeKind::Path, n).unwrap_err()
        });
        assert!(matches!(err, LowerError::InvalidPathData { .. }));
    }

    #[test]
    fn test_tolerance_applies_in_output_units() {
        // A scaled-up circle needs more points for the same tolerance
        let small = with_shape(r#"<circle r="5"/>"#, |n| {
            lower_shape(ShapeKind::Circle, n, &Transform::identity(), 0.2).unwrap()
        });
        let large = with_shape(r#"<circle r="5"/>"#, |n| {
            lower_shape(ShapeKind::Circle, n, &Transform::scale(20.0, 20.0), 0.2).unwrap()
        });
        assert!(
            large.polyline().unwrap().point_count() > small.polyline().unwrap().point_count()
        );
    }
}
