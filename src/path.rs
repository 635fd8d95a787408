//! Path data to cubic polycurve conversion
//!
//! Every drawing command is expressed as cubic Bezier segments: lines get
//! their control points on the endpoints, quadratics are degree-raised and
//! elliptical arcs are approximated by kurbo.

use crate::types::{CubicPolycurve, PathCommand, Subpath};
use kurbo::{Arc, CubicBez, PathEl, Point, QuadBez, SvgArc, Vec2};
use svgtypes::PathParser;

/// Accuracy of the arc-to-cubic approximation, in user units
const ARC_TOLERANCE: f64 = 1e-3;

fn reflect(ctrl: Point, about: Point) -> Point {
    about + (about - ctrl)
}

/// Accumulates cubic segments while tracking pen position and the reflection
/// state smooth curves depend on.
#[derive(Debug)]
struct PolycurveBuilder {
    subpaths: Vec<Subpath>,
    current: Vec<CubicBez>,
    start: Point,
    pen: Point,
    last_cubic_ctrl: Option<Point>,
    last_quad_ctrl: Option<Point>,
}

impl PolycurveBuilder {
    fn new() -> Self {
        Self {
            subpaths: Vec::new(),
            current: Vec::new(),
            start: Point::ZERO,
            pen: Point::ZERO,
            last_cubic_ctrl: None,
            last_quad_ctrl: None,
        }
    }

    fn resolve(&self, abs: bool, x: f64, y: f64) -> Point {
        if abs {
            Point::new(x, y)
        } else {
            Point::new(self.pen.x + x, self.pen.y + y)
        }
    }

    /// Push the subpath under construction, if it drew anything.
    fn finish_subpath(&mut self) {
        if !self.current.is_empty() {
            let segments = std::mem::take(&mut self.current);
            self.subpaths.push(Subpath::new(segments));
        }
    }

    fn move_to(&mut self, p: Point) {
        self.finish_subpath();
        self.start = p;
        self.pen = p;
    }

    fn line_to(&mut self, p: Point) {
        self.current.push(CubicBez::new(self.pen, self.pen, p, p));
        self.pen = p;
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.current.push(CubicBez::new(self.pen, c1, c2, p));
        self.pen = p;
    }

    fn quad_to(&mut self, q: Point, p: Point) {
        self.current.push(QuadBez::new(self.pen, q, p).raise());
        self.pen = p;
    }

    fn arc_to(&mut self, radii: Vec2, x_rotation_deg: f64, large_arc: bool, sweep: bool, p: Point) {
        let svg_arc = SvgArc {
            from: self.pen,
            to: p,
            radii,
            x_rotation: x_rotation_deg.to_radians(),
            large_arc,
            sweep,
        };

        match Arc::from_svg_arc(&svg_arc) {
            Some(arc) => {
                let curves: Vec<(Point, Point, Point)> = arc
                    .append_iter(ARC_TOLERANCE)
                    .filter_map(|el| match el {
                        PathEl::CurveTo(c1, c2, end) => Some((c1, c2, end)),
                        _ => None,
                    })
                    .collect();
                let last = curves.len().saturating_sub(1);
                for (i, (c1, c2, end)) in curves.into_iter().enumerate() {
                    // Land exactly on the requested endpoint
                    let end = if i == last { p } else { end };
                    self.curve_to(c1, c2, end);
                }
            }
            // Zero radius draws a straight line; identical endpoints draw nothing.
            None if self.pen != p => self.line_to(p),
            None => {}
        }
    }

    fn close(&mut self) {
        if !self.current.is_empty() && self.pen != self.start {
            self.line_to(self.start);
        }
        self.finish_subpath();
        self.pen = self.start;
    }

    fn command(&mut self, cmd: PathCommand) {
        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;

        match cmd {
            PathCommand::MoveTo { abs, x, y } => {
                let p = self.resolve(abs, x, y);
                self.move_to(p);
            }
            PathCommand::LineTo { abs, x, y } => {
                let p = self.resolve(abs, x, y);
                self.line_to(p);
            }
            PathCommand::HorizontalLineTo { abs, x } => {
                let p = if abs {
                    Point::new(x, self.pen.y)
                } else {
                    Point::new(self.pen.x + x, self.pen.y)
                };
                self.line_to(p);
            }
            PathCommand::VerticalLineTo { abs, y } => {
                let p = if abs {
                    Point::new(self.pen.x, y)
                } else {
                    Point::new(self.pen.x, self.pen.y + y)
                };
                self.line_to(p);
            }
            PathCommand::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let c1 = self.resolve(abs, x1, y1);
                let c2 = self.resolve(abs, x2, y2);
                let p = self.resolve(abs, x, y);
                self.curve_to(c1, c2, p);
                cubic_ctrl = Some(c2);
            }
            PathCommand::SmoothCurveTo { abs, x2, y2, x, y } => {
                // Mirror the previous second control point, or start at the pen
                let c1 = self
                    .last_cubic_ctrl
                    .map_or(self.pen, |prev| reflect(prev, self.pen));
                let c2 = self.resolve(abs, x2, y2);
                let p = self.resolve(abs, x, y);
                self.curve_to(c1, c2, p);
                cubic_ctrl = Some(c2);
            }
            PathCommand::Quadratic { abs, x1, y1, x, y } => {
                let q = self.resolve(abs, x1, y1);
                let p = self.resolve(abs, x, y);
                self.quad_to(q, p);
                quad_ctrl = Some(q);
            }
            PathCommand::SmoothQuadratic { abs, x, y } => {
                let q = self
                    .last_quad_ctrl
                    .map_or(self.pen, |prev| reflect(prev, self.pen));
                let p = self.resolve(abs, x, y);
                self.quad_to(q, p);
                quad_ctrl = Some(q);
            }
            PathCommand::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let p = self.resolve(abs, x, y);
                self.arc_to(Vec2::new(rx, ry), x_axis_rotation, large_arc, sweep, p);
            }
            PathCommand::ClosePath { .. } => self.close(),
        }

        self.last_cubic_ctrl = cubic_ctrl;
        self.last_quad_ctrl = quad_ctrl;
    }

    fn finish(mut self) -> CubicPolycurve {
        self.finish_subpath();
        CubicPolycurve {
            subpaths: self.subpaths,
        }
    }
}

/// Lower a stream of path commands to a cubic polycurve.
///
/// Move-to commands that are not followed by any drawing command leave no
/// subpath behind.
pub fn polycurve_from_commands<I>(commands: I) -> Result<CubicPolycurve, svgtypes::Error>
where
    I: IntoIterator<Item = Result<PathCommand, svgtypes::Error>>,
{
    let mut builder = PolycurveBuilder::new();
    for cmd in commands {
        builder.command(cmd?);
    }
    Ok(builder.finish())
}

/// Parse SVG path data (the `d` attribute) into a cubic polycurve.
pub fn parse_path_data(d: &str) -> Result<CubicPolycurve, svgtypes::Error> {
    polycurve_from_commands(PathParser::from(d))
}
