//! Adaptive flattening of cubic polycurves
//!
//! Each segment is bisected at t = 0.5 until its control points lie within
//! the tolerance of its chord. The rewrite runs on an explicit worklist so
//! arbitrarily long or badly conditioned paths cannot exhaust the stack.

use crate::types::{CubicPolycurve, FlattenedPolyline, Subpath};
use kurbo::{CubicBez, ParamCurve, Point};
use log::trace;

/// Default flatness tolerance in output units
pub const DEFAULT_TOLERANCE: f64 = 0.2;

/// Bisection depth after which a segment is accepted as it is
const MAX_DEPTH: u32 = 20;

/// Control-point spread, in units of the coordinate's float spacing, below
/// which bisection can no longer make progress
const PRECISION_ULPS: f64 = 1024.0;

/// Distance from `p` to the line segment `a`-`b`.
fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Upper bound on how far the curve strays from its chord.
///
/// The curve lies inside the convex hull of its control points, so the
/// farther inner control point bounds the deviation.
pub fn flatness(seg: &CubicBez) -> f64 {
    let d1 = distance_to_segment(seg.p1, seg.p0, seg.p3);
    let d2 = distance_to_segment(seg.p2, seg.p0, seg.p3);
    // f64::max would swallow a NaN
    if d1.is_nan() || d2.is_nan() {
        return f64::NAN;
    }
    d1.max(d2)
}

fn is_flat(seg: &CubicBez, tolerance: f64) -> bool {
    let d = flatness(seg);
    // Non-finite coordinates never converge; take them as they are.
    !d.is_finite() || d <= tolerance
}

/// Whether the segment is too small relative to its coordinates for halving
/// to change it meaningfully.
fn at_float_resolution(seg: &CubicBez) -> bool {
    let pts = [seg.p0, seg.p1, seg.p2, seg.p3];
    let magnitude = pts
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(0.0, f64::max);
    let spread = pts[1..]
        .iter()
        .map(|p| (p.x - seg.p0.x).abs().max((p.y - seg.p0.y).abs()))
        .fold(0.0, f64::max);
    spread <= magnitude * f64::EPSILON * PRECISION_ULPS
}

/// Rewrite a subpath so that every segment is flat within `tolerance`.
///
/// Segments keep their order; a segment that is not flat is replaced by its
/// two halves, and the first half is tested again before moving on.
/// Segments at the limit of float precision, or [`MAX_DEPTH`] halvings deep,
/// are kept as they are.
pub fn subdivide_subpath(subpath: &Subpath, tolerance: f64) -> Subpath {
    let mut out = Vec::with_capacity(subpath.segments.len());
    let mut pending: Vec<(CubicBez, u32)> = Vec::new();

    for seg in &subpath.segments {
        pending.push((*seg, 0));
        while let Some((seg, depth)) = pending.pop() {
            if is_flat(&seg, tolerance) || depth >= MAX_DEPTH || at_float_resolution(&seg) {
                out.push(seg);
            } else {
                let (first, second) = seg.subdivide();
                pending.push((second, depth + 1));
                pending.push((first, depth + 1));
            }
        }
    }

    trace!(
        "subdivide_subpath: {} segments -> {}",
        subpath.segments.len(),
        out.len()
    );
    Subpath::new(out)
}

/// Flatten one subpath to its anchor points.
pub fn flatten_subpath(subpath: &Subpath, tolerance: f64) -> Vec<Point> {
    subdivide_subpath(subpath, tolerance).anchors()
}

/// Flatten every subpath of a polycurve.
pub fn flatten(curve: &CubicPolycurve, tolerance: f64) -> FlattenedPolyline {
    FlattenedPolyline {
        subpaths: curve
            .subpaths
            .iter()
            .map(|sp| flatten_subpath(sp, tolerance))
            .filter(|points| !points.is_empty())
            .collect(),
    }
}
